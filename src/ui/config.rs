//! Swagger UI configuration model
//!
//! `UiConfig` mirrors the Swagger UI option set. Serializing it yields the JSON
//! blob handed to `SwaggerUIBundle`; script-valued options (plugins, hooks,
//! interceptors) are skipped there and injected verbatim by the entry template.
//!
//! Deserialization takes `snake_case` keys so the record can live in a config
//! file next to the server settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Process-wide default configuration, built once and never mutated
pub static CONFIG_DEFAULT: LazyLock<UiConfig> = LazyLock::new(UiConfig::builtin);

/// Swagger UI configuration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct UiConfig {
    /// Name of the registered document instance (empty = default instance)
    #[serde(skip_serializing)]
    pub instance_name: String,

    /// Page title
    #[serde(skip_serializing)]
    pub title: String,

    /// URL to fetch an external configuration document from
    #[serde(skip_serializing_if = "String::is_empty")]
    pub config_url: String,

    /// URL of the API definition. Empty means `<mount prefix>/doc.json`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// Allow overriding options through URL search params
    #[serde(skip_serializing_if = "is_false")]
    pub query_config_enabled: bool,

    /// Top-level layout component
    #[serde(skip_serializing_if = "String::is_empty")]
    pub layout: String,

    /// Plugin expressions, injected as raw script
    #[serde(skip_serializing)]
    pub plugins: Option<Vec<String>>,

    /// Preset expressions, injected as raw script
    #[serde(skip_serializing)]
    pub presets: Option<Vec<String>>,

    pub deep_linking: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub display_operation_id: bool,

    /// Expansion depth for models, -1 hides them entirely
    pub default_models_expand_depth: i32,

    /// Expansion depth for the model on the model-example section
    pub default_model_expand_depth: i32,

    /// `example` or `model`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_model_rendering: String,

    #[serde(skip_serializing_if = "is_false")]
    pub display_request_duration: bool,

    /// `list`, `full` or `none`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc_expansion: String,

    #[serde(skip_serializing)]
    pub filter: FilterConfig,

    /// Limit on tagged operations shown, 0 shows all
    #[serde(skip_serializing_if = "is_zero")]
    pub max_displayed_tags: u32,

    #[serde(skip_serializing_if = "is_false")]
    pub show_extensions: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub show_common_extensions: bool,

    /// `"alpha"` or a sort function, injected as raw script
    #[serde(skip_serializing)]
    pub tags_sorter: String,

    /// Called once a definition has rendered, injected as raw script
    #[serde(skip_serializing)]
    pub on_complete: String,

    #[serde(skip_serializing)]
    pub syntax_highlight: Option<SyntaxHighlightConfig>,

    #[serde(skip_serializing_if = "is_false")]
    pub try_it_out_enabled: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub request_snippets_enabled: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub oauth2_redirect_url: String,

    /// `(request) => request`, injected as raw script
    #[serde(skip_serializing)]
    pub request_interceptor: String,

    /// Extra curl flags for generated snippets
    #[serde(rename(serialize = "request.curlOptions"), skip_serializing_if = "Option::is_none")]
    pub request_curl_options: Option<Vec<String>>,

    /// `(response) => response`, injected as raw script
    #[serde(skip_serializing)]
    pub response_interceptor: String,

    pub show_mutated_request: bool,

    /// Methods with "Try it out" enabled. `None` keeps the UI default (all),
    /// an empty list disables it everywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_submit_methods: Option<Vec<String>>,

    /// Validator badge URL; `none`, `127.0.0.1` or `localhost` disables validation
    #[serde(skip_serializing_if = "String::is_empty")]
    pub validator_url: String,

    /// Send browser credentials with CORS requests
    #[serde(skip_serializing_if = "is_false")]
    pub with_credentials: bool,

    #[serde(skip_serializing)]
    pub model_property_macro: String,

    #[serde(skip_serializing)]
    pub parameter_macro: String,

    #[serde(skip_serializing_if = "is_false")]
    pub persist_authorization: bool,

    /// Passed to `ui.initOAuth` when set
    #[serde(skip_serializing)]
    pub oauth: Option<OAuthConfig>,

    /// `(preauthorizeBasic) => ...`, called once the UI has rendered
    #[serde(skip_serializing)]
    pub preauthorize_basic: String,

    /// `(preauthorizeApiKey) => ...`, called once the UI has rendered
    #[serde(skip_serializing)]
    pub preauthorize_api_key: String,

    /// Extra CSS appended to the page head
    #[serde(skip_serializing)]
    pub custom_style: String,

    /// Extra script appended to the page head
    #[serde(skip_serializing)]
    pub custom_script: String,
}

/// Operation filter: either a fixed expression or an on/off switch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub enabled: bool,
    pub expression: String,
}

impl FilterConfig {
    /// Reduce to the value Swagger UI expects: the expression if set, the flag otherwise
    pub fn value(&self) -> Value {
        if self.expression.is_empty() {
            Value::Bool(self.enabled)
        } else {
            Value::String(self.expression.clone())
        }
    }
}

/// Highlight.js settings for example payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxHighlightConfig {
    pub activate: bool,
    /// One of `agate`, `arta`, `monokai`, `nord`, `obsidian`, `tomorrow-night`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub theme: String,
}

impl Default for SyntaxHighlightConfig {
    fn default() -> Self {
        Self {
            activate: true,
            theme: "agate".to_string(),
        }
    }
}

impl SyntaxHighlightConfig {
    /// Reduce to the full settings object when active, `false` otherwise
    pub fn value(&self) -> Value {
        if self.activate {
            serde_json::to_value(self).unwrap_or(Value::Bool(false))
        } else {
            Value::Bool(false)
        }
    }
}

/// OAuth2 settings passed to `initOAuth`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct OAuthConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_id: String,

    /// Exposed to every browser loading the page; keep it to dev/test setups.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_secret: String,

    /// Shown in the authorization popup
    #[serde(skip_serializing_if = "String::is_empty")]
    pub app_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub realm: String,

    /// Initially selected scopes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,

    /// Added to `authorizationUrl` and `tokenUrl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_query_string_params: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "is_false")]
    pub use_basic_authentication_with_access_code_grant: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub use_pkce_with_authorization_code_grant: bool,
}

impl UiConfig {
    fn builtin() -> Self {
        Self {
            instance_name: String::new(),
            title: "Swagger UI".to_string(),
            config_url: String::new(),
            url: String::new(),
            query_config_enabled: false,
            layout: "StandaloneLayout".to_string(),
            plugins: Some(vec!["SwaggerUIBundle.plugins.DownloadUrl".to_string()]),
            presets: Some(vec![
                "SwaggerUIBundle.presets.apis".to_string(),
                "SwaggerUIStandalonePreset".to_string(),
            ]),
            deep_linking: true,
            display_operation_id: false,
            default_models_expand_depth: 1,
            default_model_expand_depth: 1,
            default_model_rendering: "example".to_string(),
            display_request_duration: false,
            doc_expansion: "list".to_string(),
            filter: FilterConfig::default(),
            max_displayed_tags: 0,
            show_extensions: false,
            show_common_extensions: false,
            tags_sorter: String::new(),
            on_complete: String::new(),
            syntax_highlight: Some(SyntaxHighlightConfig::default()),
            try_it_out_enabled: false,
            request_snippets_enabled: false,
            oauth2_redirect_url: String::new(),
            request_interceptor: String::new(),
            request_curl_options: None,
            response_interceptor: String::new(),
            show_mutated_request: true,
            supported_submit_methods: None,
            validator_url: String::new(),
            with_credentials: false,
            model_property_macro: String::new(),
            parameter_macro: String::new(),
            persist_authorization: false,
            oauth: None,
            preauthorize_basic: String::new(),
            preauthorize_api_key: String::new(),
            custom_style: String::new(),
            custom_script: String::new(),
        }
    }

    /// Plugins after defaulting
    pub fn plugins(&self) -> &[String] {
        self.plugins.as_deref().unwrap_or_default()
    }

    /// Presets after defaulting
    pub fn presets(&self) -> &[String] {
        self.presets.as_deref().unwrap_or_default()
    }

    /// Reduced `syntaxHighlight` value
    pub fn syntax_highlight_value(&self) -> Value {
        self.syntax_highlight
            .as_ref()
            .map_or(Value::Bool(false), SyntaxHighlightConfig::value)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        CONFIG_DEFAULT.clone()
    }
}

/// Fill in the defaulted fields of an optional user record
///
/// Only title, layout, model rendering, doc expansion, plugins, presets and
/// syntax highlight fall back, and only when empty. Everything else is kept
/// as given, including `false` flags and zero depths.
pub fn config_default(config: Option<UiConfig>) -> UiConfig {
    let Some(mut cfg) = config else {
        return CONFIG_DEFAULT.clone();
    };

    let defaults = &*CONFIG_DEFAULT;

    if cfg.title.is_empty() {
        cfg.title.clone_from(&defaults.title);
    }
    if cfg.layout.is_empty() {
        cfg.layout.clone_from(&defaults.layout);
    }
    if cfg.default_model_rendering.is_empty() {
        cfg.default_model_rendering
            .clone_from(&defaults.default_model_rendering);
    }
    if cfg.doc_expansion.is_empty() {
        cfg.doc_expansion.clone_from(&defaults.doc_expansion);
    }
    if cfg.plugins.is_none() {
        cfg.plugins.clone_from(&defaults.plugins);
    }
    if cfg.presets.is_none() {
        cfg.presets.clone_from(&defaults.presets);
    }
    if cfg.syntax_highlight.is_none() {
        cfg.syntax_highlight.clone_from(&defaults.syntax_highlight);
    }

    cfg
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &u32) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blank() -> UiConfig {
        UiConfig {
            title: String::new(),
            layout: String::new(),
            default_model_rendering: String::new(),
            doc_expansion: String::new(),
            plugins: None,
            presets: None,
            syntax_highlight: None,
            deep_linking: false,
            show_mutated_request: false,
            default_models_expand_depth: 0,
            default_model_expand_depth: 0,
            ..UiConfig::default()
        }
    }

    #[test]
    fn test_no_config_returns_defaults() {
        assert_eq!(config_default(None), *CONFIG_DEFAULT);
        assert_eq!(CONFIG_DEFAULT.title, "Swagger UI");
        assert_eq!(CONFIG_DEFAULT.layout, "StandaloneLayout");
    }

    #[test]
    fn test_empty_fields_fall_back() {
        let cfg = config_default(Some(blank()));
        assert_eq!(cfg.title, "Swagger UI");
        assert_eq!(cfg.layout, "StandaloneLayout");
        assert_eq!(cfg.default_model_rendering, "example");
        assert_eq!(cfg.doc_expansion, "list");
        assert_eq!(cfg.plugins(), ["SwaggerUIBundle.plugins.DownloadUrl"]);
        assert_eq!(cfg.presets().len(), 2);
        assert_eq!(cfg.syntax_highlight, Some(SyntaxHighlightConfig::default()));
    }

    #[test]
    fn test_explicit_false_and_zero_are_kept() {
        let cfg = config_default(Some(blank()));
        assert!(!cfg.deep_linking);
        assert!(!cfg.show_mutated_request);
        assert_eq!(cfg.default_models_expand_depth, 0);
        assert_eq!(cfg.default_model_expand_depth, 0);
    }

    #[test]
    fn test_non_empty_values_are_preserved() {
        for title in ["Petstore", " ", "API docs"] {
            let cfg = config_default(Some(UiConfig {
                title: title.to_string(),
                ..blank()
            }));
            assert_eq!(cfg.title, title);
        }
    }

    #[test]
    fn test_empty_plugin_list_is_not_defaulted() {
        let cfg = config_default(Some(UiConfig {
            plugins: Some(Vec::new()),
            ..blank()
        }));
        assert!(cfg.plugins().is_empty());
    }

    #[test]
    fn test_filter_value() {
        assert_eq!(FilterConfig::default().value(), json!(false));
        let enabled = FilterConfig {
            enabled: true,
            expression: String::new(),
        };
        assert_eq!(enabled.value(), json!(true));
        let expr = FilterConfig {
            enabled: false,
            expression: "pets".to_string(),
        };
        assert_eq!(expr.value(), json!("pets"));
    }

    #[test]
    fn test_syntax_highlight_value() {
        assert_eq!(
            SyntaxHighlightConfig::default().value(),
            json!({"activate": true, "theme": "agate"})
        );
        let off = SyntaxHighlightConfig {
            activate: false,
            theme: "nord".to_string(),
        };
        assert_eq!(off.value(), json!(false));
    }

    #[test]
    fn test_serialized_blob_uses_ui_option_names() {
        let cfg = UiConfig {
            url: "/swagger/doc.json".to_string(),
            display_operation_id: true,
            request_curl_options: Some(vec!["-g".to_string()]),
            oauth2_redirect_url: "/cb".to_string(),
            ..UiConfig::default()
        };
        let blob = serde_json::to_value(&cfg).unwrap();

        assert_eq!(blob["url"], "/swagger/doc.json");
        assert_eq!(blob["displayOperationId"], true);
        assert_eq!(blob["request.curlOptions"], json!(["-g"]));
        assert_eq!(blob["oauth2RedirectUrl"], "/cb");
        assert_eq!(blob["deepLinking"], true);
        assert_eq!(blob["showMutatedRequest"], true);
        assert_eq!(blob["defaultModelsExpandDepth"], 1);
        // script-valued and page-level options stay out of the blob
        assert!(blob.get("title").is_none());
        assert!(blob.get("plugins").is_none());
        assert!(blob.get("instanceName").is_none());
        // omitted when empty
        assert!(blob.get("configUrl").is_none());
        assert!(blob.get("withCredentials").is_none());
    }

    #[test]
    fn test_deserialize_partial_record() {
        let cfg: UiConfig = serde_json::from_value(json!({
            "title": "Accounts",
            "doc_expansion": "none",
            "oauth": { "client_id": "web", "scopes": ["read"] }
        }))
        .unwrap();
        assert_eq!(cfg.title, "Accounts");
        assert_eq!(cfg.doc_expansion, "none");
        assert_eq!(cfg.layout, "StandaloneLayout");
        let oauth = serde_json::to_value(cfg.oauth.unwrap()).unwrap();
        assert_eq!(oauth, json!({"clientId": "web", "scopes": ["read"]}));
    }
}
