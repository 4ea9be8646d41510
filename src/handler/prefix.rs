//! Mount prefix computation
//!
//! Route patterns, `X-Forwarded-Prefix` handling and slash-joining of URL paths.

use hyper::HeaderMap;

pub const FORWARDED_PREFIX_HEADER: &str = "x-forwarded-prefix";

/// Mount prefix of a route pattern: every `*` removed, so `/swagger/*` gives `/swagger/`
pub fn strip_wildcard(route: &str) -> String {
    route.replace('*', "")
}

/// Concatenated `X-Forwarded-Prefix` values, or `None` when absent
///
/// Repeated header lines and comma separated values are both accepted. Each
/// value loses its trailing slashes, always keeping its first character.
pub fn forwarded_prefix(headers: &HeaderMap) -> Option<String> {
    let prefix: String = headers
        .get_all(FORWARDED_PREFIX_HEADER)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(trim_trailing_slashes)
        .collect();

    (!prefix.is_empty()).then_some(prefix)
}

fn trim_trailing_slashes(value: &str) -> &str {
    let mut end = value.len();
    while end > 1 && value.as_bytes()[end - 1] == b'/' {
        end -= 1;
    }
    &value[..end]
}

/// Join URL path elements and clean the result
///
/// Empty elements are ignored, duplicate slashes collapse, `.` and `..` are
/// resolved lexically and the trailing slash is dropped.
///
/// ```
/// use swagger_handler::handler::prefix::join_path;
/// assert_eq!(join_path(&["/swagger/", "index.html"]), "/swagger/index.html");
/// assert_eq!(join_path(&["/a//b/../c/", "doc.json"]), "/a/c/doc.json");
/// assert_eq!(join_path(&["", "doc.json"]), "doc.json");
/// ```
pub fn join_path(elements: &[&str]) -> String {
    let joined = elements
        .iter()
        .filter(|e| !e.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        return String::new();
    }
    clean_path(&joined)
}

fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{body}"),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}
