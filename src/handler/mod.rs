//! Swagger UI request handler
//!
//! `SwaggerUi` is mounted under a wildcard route such as `/swagger/*` and
//! serves the entry page, the API document, a redirect to the entry page, and
//! the packaged UI assets.
//!
//! ```no_run
//! use swagger_handler::{spec, SwaggerUi};
//!
//! spec::register("", spec::FileDoc::new("openapi.json")).unwrap();
//! let ui = SwaggerUi::new("/swagger/*");
//! ```

pub mod prefix;
pub mod router;
pub mod static_files;

use crate::assets::{AssetProvider, EmbeddedAssets};
use crate::error::Result;
use crate::logger;
use crate::spec::{GlobalRegistry, SpecSource};
use crate::ui::{config_default, IndexTemplate, UiConfig};
use hyper::HeaderMap;
use std::sync::{Arc, OnceLock};

/// Entry page file name under the mount prefix
pub const DEFAULT_INDEX: &str = "index.html";
/// API document file name under the mount prefix
pub const DEFAULT_DOC_URL: &str = "doc.json";

/// State fixed by the first request a handler sees
#[derive(Debug)]
struct MountState {
    prefix: String,
    config: UiConfig,
}

/// Mountable Swagger UI handler
pub struct SwaggerUi {
    route: String,
    /// Request paths under this base are dispatched
    base: String,
    config: UiConfig,
    mount: OnceLock<MountState>,
    template: IndexTemplate,
    assets: Arc<dyn AssetProvider>,
    spec: Arc<dyn SpecSource>,
}

impl SwaggerUi {
    /// Handler with the default configuration
    ///
    /// # Panics
    /// When the packaged entry template does not parse.
    pub fn new(route: impl Into<String>) -> Self {
        Self::with_config(route, UiConfig::default())
    }

    /// Handler with a caller supplied configuration, defaulted first
    ///
    /// # Panics
    /// When the packaged entry template does not parse.
    pub fn with_config(route: impl Into<String>, config: UiConfig) -> Self {
        Self::expect_template(route.into(), Some(config), IndexTemplate::parse())
    }

    pub fn try_new(route: impl Into<String>, config: Option<UiConfig>) -> Result<Self> {
        Ok(Self::from_parts(
            route.into(),
            config_default(config),
            IndexTemplate::parse()?,
        ))
    }

    fn expect_template(
        route: String,
        config: Option<UiConfig>,
        template: Result<IndexTemplate>,
    ) -> Self {
        match template {
            Ok(template) => Self::from_parts(route, config_default(config), template),
            Err(e) => panic!("swagger ui: {e}"),
        }
    }

    fn from_parts(route: String, config: UiConfig, template: IndexTemplate) -> Self {
        Self {
            base: prefix::strip_wildcard(&route),
            route,
            config,
            mount: OnceLock::new(),
            template,
            assets: Arc::new(EmbeddedAssets),
            spec: Arc::new(GlobalRegistry),
        }
    }

    /// Replace the document source (the process-wide registry by default)
    #[must_use]
    pub fn spec_source(mut self, spec: Arc<dyn SpecSource>) -> Self {
        self.spec = spec;
        self
    }

    /// Replace the static asset provider (the packaged bundle by default)
    #[must_use]
    pub fn assets(mut self, assets: Arc<dyn AssetProvider>) -> Self {
        self.assets = assets;
        self
    }

    /// Route pattern this handler was registered under
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Configuration as supplied, after defaulting
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Mount prefix, once the first request has fixed it
    pub fn prefix(&self) -> Option<&str> {
        self.mount.get().map(|m| m.prefix.as_str())
    }

    /// Document URL handed to the UI, once the first request has fixed it
    pub fn doc_url(&self) -> Option<&str> {
        self.mount.get().map(|m| m.config.url.as_str())
    }

    /// Whether `path` falls under this handler's route
    pub fn matches(&self, path: &str) -> bool {
        self.relative_path(path).is_some()
    }

    /// Request path relative to the route, `None` when outside it
    pub(crate) fn relative_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        if let Some(rest) = path.strip_prefix(self.base.as_str()) {
            return Some(rest);
        }
        // `/swagger` for a `/swagger/` base
        let bare = self.base.trim_end_matches('/');
        (!bare.is_empty() && path == bare).then_some("")
    }

    fn mount_state(&self, headers: &HeaderMap) -> &MountState {
        self.mount.get_or_init(|| {
            let mut prefix = self.base.clone();
            if let Some(forwarded) = prefix::forwarded_prefix(headers) {
                prefix = forwarded + &prefix;
            }

            let mut config = self.config.clone();
            if config.url.is_empty() {
                config.url = prefix::join_path(&[&prefix, DEFAULT_DOC_URL]);
            }

            logger::log_mount_prefix(&self.route, &prefix, &config.url);
            MountState { prefix, config }
        })
    }
}

impl std::fmt::Debug for SwaggerUi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwaggerUi")
            .field("route", &self.route)
            .field("instance_name", &self.config.instance_name)
            .field("mount", &self.mount.get())
            .finish_non_exhaustive()
    }
}
