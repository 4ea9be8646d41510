//! Swagger UI page model
//!
//! Configuration record, its defaulting rules, and the entry page template.

pub mod config;
pub mod template;

pub use config::{
    config_default, FilterConfig, OAuthConfig, SyntaxHighlightConfig, UiConfig, CONFIG_DEFAULT,
};
pub use template::IndexTemplate;
