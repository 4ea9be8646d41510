//! Entry page template
//!
//! The page bootstraps `SwaggerUIBundle` from the assets served next to it
//! (relative `./` links), so it renders identically at any mount prefix.

use crate::error::Result;
use crate::ui::config::{OAuthConfig, UiConfig};
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;
use serde_json::Value;

const INDEX_NAME: &str = "swagger_index.html";

const INDEX_TEMPLATE: &str = r##"<!-- HTML for static distribution bundle build -->
<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{{title}}</title>
  <link rel="stylesheet" type="text/css" href="./swagger-ui.css" />
  <link rel="stylesheet" type="text/css" href="./index.css" />
  <link rel="icon" type="image/png" href="./favicon-32x32.png" sizes="32x32" />
  <link rel="icon" type="image/png" href="./favicon-16x16.png" sizes="16x16" />
{{#if custom_style}}
  <style>
{{{custom_style}}}
  </style>
{{/if}}
{{#if custom_script}}
  <script>
{{{custom_script}}}
  </script>
{{/if}}
</head>

<body>
  <div id="swagger-ui"></div>

  <script src="./swagger-ui-bundle.js" charset="UTF-8"></script>
  <script src="./swagger-ui-standalone-preset.js" charset="UTF-8"></script>
  <script>
  window.onload = function() {
    const config = {{{json config}}};
    config.dom_id = "#swagger-ui";
    config.plugins = [
{{#each plugins}}
      {{{this}}},
{{/each}}
    ];
    config.presets = [
{{#each presets}}
      {{{this}}},
{{/each}}
    ];
    config.filter = {{{json filter}}};
    config.syntaxHighlight = {{{json syntax_highlight}}};
{{#if tags_sorter}}
    config.tagsSorter = {{{tags_sorter}}};
{{/if}}
{{#if request_interceptor}}
    config.requestInterceptor = {{{request_interceptor}}};
{{/if}}
{{#if response_interceptor}}
    config.responseInterceptor = {{{response_interceptor}}};
{{/if}}
{{#if model_property_macro}}
    config.modelPropertyMacro = {{{model_property_macro}}};
{{/if}}
{{#if parameter_macro}}
    config.parameterMacro = {{{parameter_macro}}};
{{/if}}
    config.onComplete = function() {
{{#if preauthorize_basic}}
      ({{{preauthorize_basic}}})(window.ui.preauthorizeBasic);
{{/if}}
{{#if preauthorize_api_key}}
      ({{{preauthorize_api_key}}})(window.ui.preauthorizeApiKey);
{{/if}}
{{#if on_complete}}
      ({{{on_complete}}})();
{{/if}}
    };

    const ui = SwaggerUIBundle(config);
{{#if oauth}}
    ui.initOAuth({{{json oauth}}});
{{/if}}
    window.ui = ui;
  };
  </script>
</body>
</html>
"##;

// JSON embedded in a <script> block must not close it early
handlebars_helper!(json: |value: Json| {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
});

/// Data bound to the entry template
#[derive(Serialize)]
struct IndexContext<'a> {
    title: &'a str,
    config: &'a UiConfig,
    plugins: &'a [String],
    presets: &'a [String],
    filter: Value,
    syntax_highlight: Value,
    oauth: Option<&'a OAuthConfig>,
    tags_sorter: &'a str,
    on_complete: &'a str,
    request_interceptor: &'a str,
    response_interceptor: &'a str,
    model_property_macro: &'a str,
    parameter_macro: &'a str,
    preauthorize_basic: &'a str,
    preauthorize_api_key: &'a str,
    custom_style: &'a str,
    custom_script: &'a str,
}

impl<'a> IndexContext<'a> {
    fn new(config: &'a UiConfig) -> Self {
        Self {
            title: &config.title,
            config,
            plugins: config.plugins(),
            presets: config.presets(),
            filter: config.filter.value(),
            syntax_highlight: config.syntax_highlight_value(),
            oauth: config.oauth.as_ref(),
            tags_sorter: &config.tags_sorter,
            on_complete: &config.on_complete,
            request_interceptor: &config.request_interceptor,
            response_interceptor: &config.response_interceptor,
            model_property_macro: &config.model_property_macro,
            parameter_macro: &config.parameter_macro,
            preauthorize_basic: &config.preauthorize_basic,
            preauthorize_api_key: &config.preauthorize_api_key,
            custom_style: &config.custom_style,
            custom_script: &config.custom_script,
        }
    }
}

/// Parsed entry template
pub struct IndexTemplate {
    registry: Handlebars<'static>,
}

impl IndexTemplate {
    /// Parse the packaged template
    pub fn parse() -> Result<Self> {
        Self::parse_source(INDEX_TEMPLATE)
    }

    pub(crate) fn parse_source(source: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_helper("json", Box::new(json));
        registry.register_template_string(INDEX_NAME, source)?;
        Ok(Self { registry })
    }

    /// Render the page for a fully resolved configuration
    pub fn render(&self, config: &UiConfig) -> Result<String> {
        let html = self
            .registry
            .render(INDEX_NAME, &IndexContext::new(config))?;
        Ok(html)
    }
}

impl std::fmt::Debug for IndexTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexTemplate").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::config::{config_default, FilterConfig, SyntaxHighlightConfig};

    fn render(config: &UiConfig) -> String {
        IndexTemplate::parse().unwrap().render(config).unwrap()
    }

    #[test]
    fn test_renders_defaults() {
        let config = UiConfig {
            url: "/swagger/doc.json".to_string(),
            ..UiConfig::default()
        };
        let html = render(&config);

        assert!(html.contains("<title>Swagger UI</title>"));
        assert!(html.contains(r#""url":"/swagger/doc.json""#));
        assert!(html.contains(r#""layout":"StandaloneLayout""#));
        assert!(html.contains("SwaggerUIBundle.plugins.DownloadUrl,"));
        assert!(html.contains("SwaggerUIStandalonePreset,"));
        assert!(html.contains("config.filter = false;"));
        assert!(html.contains(r#"config.syntaxHighlight = {"activate":true,"theme":"agate"};"#));
        assert!(!html.contains("initOAuth"));
        assert!(!html.contains("<style>"));
        assert!(html.contains(r##"config.dom_id = "#swagger-ui";"##));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_title_is_escaped() {
        let config = config_default(Some(UiConfig {
            title: "<b>API</b>".to_string(),
            ..UiConfig::default()
        }));
        let html = render(&config);
        assert!(html.contains("<title>&lt;b&gt;API&lt;/b&gt;</title>"));
    }

    #[test]
    fn test_scripts_are_injected_verbatim() {
        let config = UiConfig {
            request_interceptor: "(req) => { req.headers['X-A'] = \"1\"; return req; }".to_string(),
            tags_sorter: "\"alpha\"".to_string(),
            custom_style: ".topbar { display: none; }".to_string(),
            preauthorize_api_key: "(f) => f('api_key', 'abc')".to_string(),
            ..UiConfig::default()
        };
        let html = render(&config);

        assert!(html.contains(
            "config.requestInterceptor = (req) => { req.headers['X-A'] = \"1\"; return req; };"
        ));
        assert!(html.contains("config.tagsSorter = \"alpha\";"));
        assert!(html.contains(".topbar { display: none; }"));
        assert!(html.contains("((f) => f('api_key', 'abc'))(window.ui.preauthorizeApiKey);"));
    }

    #[test]
    fn test_reduced_options() {
        let config = UiConfig {
            filter: FilterConfig {
                enabled: true,
                expression: "store".to_string(),
            },
            syntax_highlight: Some(SyntaxHighlightConfig {
                activate: false,
                theme: String::new(),
            }),
            oauth: Some(OAuthConfig {
                client_id: "docs".to_string(),
                use_pkce_with_authorization_code_grant: true,
                ..OAuthConfig::default()
            }),
            ..UiConfig::default()
        };
        let html = render(&config);

        assert!(html.contains(r#"config.filter = "store";"#));
        assert!(html.contains("config.syntaxHighlight = false;"));
        assert!(html.contains(
            r#"ui.initOAuth({"clientId":"docs","usePkceWithAuthorizationCodeGrant":true});"#
        ));
    }

    #[test]
    fn test_json_cannot_close_script_block() {
        let config = UiConfig {
            validator_url: "</script><script>alert(1)</script>".to_string(),
            ..UiConfig::default()
        };
        let html = render(&config);
        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains(r"<\/script>"));
    }

    #[test]
    fn test_broken_template_fails_to_parse() {
        assert!(IndexTemplate::parse_source("{{#if title}}unclosed").is_err());
    }
}
