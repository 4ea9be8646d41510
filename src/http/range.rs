//! HTTP Range parsing
//!
//! Single `bytes=` ranges per RFC 7233. Multi-range requests fall back to the
//! full body.

/// Inclusive byte range, already clamped to the resource size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub(crate) const fn len(self) -> usize {
        self.end - self.start + 1
    }
}

/// Outcome of parsing a Range header
#[derive(Debug, PartialEq, Eq)]
pub enum RangeParseResult {
    Valid(ByteRange),
    /// Answer 416
    NotSatisfiable,
    /// Absent, malformed or unsupported: serve the whole body
    None,
}

/// Parse a Range header against a resource of `size` bytes
///
/// # Examples
/// ```
/// use swagger_handler::http::range::{parse_range_header, ByteRange, RangeParseResult};
///
/// assert_eq!(
///     parse_range_header(Some("bytes=0-99"), 1000),
///     RangeParseResult::Valid(ByteRange { start: 0, end: 99 })
/// );
/// assert_eq!(parse_range_header(None, 1000), RangeParseResult::None);
/// ```
pub fn parse_range_header(range_header: Option<&str>, size: usize) -> RangeParseResult {
    let Some(spec) = range_header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeParseResult::None;
    };
    if spec.contains(',') {
        return RangeParseResult::None;
    }
    let Some((first, last)) = spec.split_once('-') else {
        return RangeParseResult::None;
    };
    let (first, last) = (first.trim(), last.trim());

    if size == 0 {
        return RangeParseResult::NotSatisfiable;
    }

    if first.is_empty() {
        // suffix: last N bytes
        return match last.parse::<usize>() {
            Ok(0) => RangeParseResult::NotSatisfiable,
            Ok(n) => RangeParseResult::Valid(ByteRange {
                start: size.saturating_sub(n),
                end: size - 1,
            }),
            Err(_) => RangeParseResult::None,
        };
    }

    let Ok(start) = first.parse::<usize>() else {
        return RangeParseResult::None;
    };
    if start >= size {
        return RangeParseResult::NotSatisfiable;
    }

    let end = if last.is_empty() {
        size - 1
    } else {
        match last.parse::<usize>() {
            Ok(end) if end < start => return RangeParseResult::NotSatisfiable,
            Ok(end) => end.min(size - 1),
            Err(_) => return RangeParseResult::None,
        }
    };

    RangeParseResult::Valid(ByteRange { start, end })
}
