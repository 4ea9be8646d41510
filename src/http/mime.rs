//! MIME type detection
//!
//! Content-Type by file extension, covering what a UI bundle ships.

use std::path::Path;

/// Content-Type for a file extension
///
/// # Examples
/// ```
/// use swagger_handler::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("png")), "image/png");
/// assert_eq!(get_content_type(Some("js")), "application/javascript");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("js" | "mjs") => "application/javascript",
        Some("json" | "map") => "application/json",
        Some("yaml" | "yml") => "application/yaml",
        Some("wasm") => "application/wasm",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        _ => "application/octet-stream",
    }
}

/// Content-Type for a request path
pub fn content_type_for_path(path: &str) -> &'static str {
    get_content_type(Path::new(path).extension().and_then(|e| e.to_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_types() {
        assert_eq!(content_type_for_path("favicon-16x16.png"), "image/png");
        assert_eq!(content_type_for_path("swagger-ui.css"), "text/css");
        assert_eq!(
            content_type_for_path("swagger-ui-bundle.js"),
            "application/javascript"
        );
        assert_eq!(
            content_type_for_path("oauth2-redirect.html"),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for_path("swagger-ui.css.map"), "application/json");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type_for_path("notfound"), "application/octet-stream");
        assert_eq!(get_content_type(Some("xyz")), "application/octet-stream");
    }
}
