//! Swagger UI for hyper services
//!
//! Mount [`SwaggerUi`] under a wildcard route and it serves the UI entry page,
//! the API document from a [`spec::SpecSource`], and the packaged Swagger UI
//! bundle:
//!
//! ```no_run
//! use swagger_handler::{spec, SwaggerUi, UiConfig};
//!
//! spec::register("", spec::StaticDoc::new(r#"{"openapi":"3.0.3"}"#)).unwrap();
//!
//! let ui = SwaggerUi::with_config(
//!     "/swagger/*",
//!     UiConfig {
//!         title: "Orders API".to_string(),
//!         ..UiConfig::default()
//!     },
//! );
//!
//! let req = hyper::Request::get("/swagger/index.html").body(()).unwrap();
//! let resp = ui.handle(&req).unwrap();
//! assert_eq!(resp.status(), 200);
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod spec;
pub mod ui;

pub use error::{Error, Result};
pub use handler::SwaggerUi;
pub use ui::{config_default, UiConfig};
