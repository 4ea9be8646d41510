//! HTTP protocol layer module
//!
//! Cache validators, MIME lookup, Range parsing and response builders shared by
//! the handler and the bundled server.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use range::parse_range_header;
pub use response::{
    apply_cors, build_304_response, build_404_response, build_405_response, build_416_response,
    build_error_response, build_html_response, build_json_response, build_options_response,
    build_redirect_response, build_redirect_response_with_code,
};
