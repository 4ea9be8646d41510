//! HTTP response building module
//!
//! Builders for each status the handler produces. Builders with fixed headers
//! fall back to a bare response and log on failure; those carrying
//! request-derived header values return the build error instead.

use super::cache::CachePolicy;
use super::range::ByteRange;
use crate::error::Error;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::Response;

const ALLOW: &str = "GET, HEAD, OPTIONS";

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, last_modified: Option<&str>) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", CachePolicy::ASSETS.to_header_value());
    if let Some(last_modified) = last_modified {
        builder = builder.header("Last-Modified", last_modified);
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("304", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", ALLOW)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", ALLOW)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Add permissive CORS headers to a response
pub fn apply_cors(response: &mut Response<Full<Bytes>>) {
    let headers = response.headers_mut();
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert("Access-Control-Allow-Methods", HeaderValue::from_static(ALLOW));
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type, Range"),
    );
    headers.insert("Access-Control-Max-Age", HeaderValue::from_static("86400"));
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("Range Not Satisfiable")))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::from("Range Not Satisfiable")))
        })
}

/// Build redirect response with an explicit status code
pub fn build_redirect_response_with_code(
    target: &str,
    code: u16,
) -> Result<Response<Full<Bytes>>, hyper::http::Error> {
    Response::builder()
        .status(code)
        .header("Location", target)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Redirecting...")))
}

/// Build 301 Moved Permanently response
pub fn build_redirect_response(target: &str) -> Result<Response<Full<Bytes>>, hyper::http::Error> {
    build_redirect_response_with_code(target, 301)
}

/// Build the rendered entry page response
pub fn build_html_response(
    content: String,
    is_head: bool,
) -> Result<Response<Full<Bytes>>, hyper::http::Error> {
    build_dynamic_response(Bytes::from(content), "text/html; charset=utf-8", is_head)
}

/// Build the API document response
pub fn build_json_response(
    content: String,
    is_head: bool,
) -> Result<Response<Full<Bytes>>, hyper::http::Error> {
    build_dynamic_response(Bytes::from(content), "application/json", is_head)
}

fn build_dynamic_response(
    data: Bytes,
    content_type: &str,
    is_head: bool,
) -> Result<Response<Full<Bytes>>, hyper::http::Error> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Cache-Control", CachePolicy::DYNAMIC.to_header_value())
        .body(Full::new(body))
}

/// Build success response with cache validators
pub fn build_cached_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", CachePolicy::ASSETS.to_header_value());
    if let Some(last_modified) = last_modified {
        builder = builder.header("Last-Modified", last_modified);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 206 Partial Content response
pub fn build_partial_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    range: ByteRange,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let ByteRange { start, end } = range;
    let content_length = range.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", CachePolicy::ASSETS.to_header_value())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Default rendering of a handler error for hosts
pub fn build_error_response(error: &Error) -> Response<Full<Bytes>> {
    let status = error.status();
    let body = status.canonical_reason().unwrap_or("Error").to_string();

    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
