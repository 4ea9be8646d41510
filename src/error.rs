//! Error types
//!
//! Per-request failures are handed back to the host instead of being logged
//! here. `Error::status` and `http::build_error_response` give hosts a default
//! rendering.

use hyper::StatusCode;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The packaged entry template does not parse
    #[error("swagger ui: index template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// The entry template failed to render with the bound configuration
    #[error("swagger ui: index render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Nothing is registered under the requested instance name
    #[error("no swagger document registered under instance '{instance}'")]
    DocNotFound { instance: String },

    /// A document source could not produce its document
    #[error("failed to read swagger document '{instance}': {source}")]
    DocRead {
        instance: String,
        #[source]
        source: std::io::Error,
    },

    /// A second source was registered under an existing instance name
    #[error("swagger document instance '{instance}' is already registered")]
    DuplicateInstance { instance: String },

    #[error("failed to build response: {0}")]
    Response(#[from] hyper::http::Error),
}

impl Error {
    /// Status code a host should answer with
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Template(_)
            | Self::Render(_)
            | Self::DocNotFound { .. }
            | Self::DocRead { .. }
            | Self::DuplicateInstance { .. }
            | Self::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}
