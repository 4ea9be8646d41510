//! HTTP cache validators
//!
//! `ETag` generation, `Last-Modified` formatting, and conditional request checks.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Generate a quoted `ETag` from content, e.g. `"9f2c01ab"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Quoted `ETag` from a precomputed SHA-256, using its first 16 bytes
pub fn etag_from_sha256(hash: &[u8; 32]) -> String {
    let hex: String = hash[..16].iter().map(|b| format!("{b:02x}")).collect();
    format!("\"{hex}\"")
}

/// Check `If-None-Match` against the server `ETag`
///
/// Accepts a single tag, a comma separated list, weak tags, or `*`.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client| {
        client.split(',').map(str::trim).any(|candidate| {
            candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
        })
    })
}

/// Format a Unix timestamp as an HTTP date
pub fn format_http_date(secs: u64) -> Option<String> {
    let secs = i64::try_from(secs).ok()?;
    DateTime::<Utc>::from_timestamp(secs, 0).map(|t| t.format(HTTP_DATE_FORMAT).to_string())
}

/// True when the resource has not changed since the client's `If-Modified-Since`
///
/// Unparseable dates count as modified so the full body is sent.
pub fn not_modified_since(if_modified_since: Option<&str>, last_modified: Option<u64>) -> bool {
    let (Some(header), Some(modified)) = (if_modified_since, last_modified) else {
        return false;
    };
    let Ok(since) = DateTime::parse_from_rfc2822(header.trim()) else {
        return false;
    };
    u64::try_from(since.timestamp()).is_ok_and(|since| modified <= since)
}

/// Cache-Control policy per response kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Shared caches may keep it for the given seconds
    Public(u32),
    /// Always revalidate
    NoCache,
}

impl CachePolicy {
    /// Bundle files are immutable for a given build
    pub const ASSETS: Self = Self::Public(3600);
    /// Entry page and document depend on config and live spec content
    pub const DYNAMIC: Self = Self::NoCache;

    pub fn to_header_value(self) -> String {
        match self {
            Self::Public(max_age) => format!("public, max-age={max_age}"),
            Self::NoCache => "no-cache".to_string(),
        }
    }
}
