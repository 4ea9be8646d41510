//! Static asset serving
//!
//! Serves files from an `AssetProvider` with `ETag`, `Last-Modified` and Range support.

use crate::assets::{Asset, AssetProvider};
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range::RangeParseResult};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Serve `path` from the provider, 404 when it has no such file
pub fn serve_asset(
    ctx: &RequestContext<'_>,
    assets: &dyn AssetProvider,
    path: &str,
) -> Response<Full<Bytes>> {
    match assets.get(path) {
        Some(asset) => build_asset_response(ctx, path, asset),
        None => http::build_404_response(),
    }
}

/// Build static file response with `ETag` and Range support
fn build_asset_response(
    ctx: &RequestContext<'_>,
    path: &str,
    asset: Asset,
) -> Response<Full<Bytes>> {
    let content_type = mime::content_type_for_path(path);
    let etag = asset.sha256.as_ref().map_or_else(
        || cache::generate_etag(&asset.data),
        cache::etag_from_sha256,
    );
    let last_modified = asset.last_modified.and_then(cache::format_http_date);
    let total_size = asset.data.len();

    // If-None-Match takes precedence over If-Modified-Since
    let not_modified = if ctx.if_none_match.is_some() {
        cache::check_etag_match(ctx.if_none_match, &etag)
    } else {
        cache::not_modified_since(ctx.if_modified_since, asset.last_modified)
    };
    if not_modified {
        return http::build_304_response(&etag, last_modified.as_deref());
    }

    match http::parse_range_header(ctx.range_header, total_size) {
        RangeParseResult::Valid(range) => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                Bytes::copy_from_slice(&asset.data[range.start..=range.end])
            };

            return http::response::build_partial_response(
                body,
                content_type,
                &etag,
                range,
                total_size,
                ctx.is_head,
            );
        }
        RangeParseResult::NotSatisfiable => {
            return http::build_416_response(total_size);
        }
        RangeParseResult::None => {}
    }

    let data = match asset.data {
        std::borrow::Cow::Borrowed(bytes) => Bytes::from_static(bytes),
        std::borrow::Cow::Owned(bytes) => Bytes::from(bytes),
    };
    http::response::build_cached_response(
        data,
        content_type,
        &etag,
        last_modified.as_deref(),
        ctx.is_head,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    struct OneFile;

    impl AssetProvider for OneFile {
        fn get(&self, path: &str) -> Option<Asset> {
            (path == "app.js").then(|| Asset {
                data: Cow::Borrowed(b"0123456789"),
                last_modified: Some(784_111_777),
                sha256: None,
            })
        }
    }

    fn ctx() -> RequestContext<'static> {
        RequestContext {
            is_head: false,
            if_none_match: None,
            if_modified_since: None,
            range_header: None,
        }
    }

    #[test]
    fn test_full_response() {
        let resp = serve_asset(&ctx(), &OneFile, "app.js");
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/javascript");
        assert_eq!(resp.headers()["Content-Length"], "10");
        assert_eq!(resp.headers()["Last-Modified"], "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(resp.headers()["Cache-Control"], "public, max-age=3600");
    }

    #[test]
    fn test_missing_asset_is_404() {
        assert_eq!(serve_asset(&ctx(), &OneFile, "other.js").status(), 404);
    }

    #[test]
    fn test_etag_revalidation() {
        let etag = cache::generate_etag(b"0123456789");
        let ctx = RequestContext {
            if_none_match: Some(&etag),
            ..ctx()
        };
        assert_eq!(serve_asset(&ctx, &OneFile, "app.js").status(), 304);
    }

    #[test]
    fn test_etag_uses_provider_hash() {
        struct Hashed;

        impl AssetProvider for Hashed {
            fn get(&self, _path: &str) -> Option<Asset> {
                Some(Asset {
                    data: Cow::Borrowed(b"0123456789"),
                    last_modified: None,
                    sha256: Some([7; 32]),
                })
            }
        }

        let resp = serve_asset(&ctx(), &Hashed, "app.js");
        let etag = cache::etag_from_sha256(&[7; 32]);
        assert_eq!(resp.headers()["ETag"], etag.as_str());

        let ctx = RequestContext {
            if_none_match: Some(&etag),
            ..ctx()
        };
        assert_eq!(serve_asset(&ctx, &Hashed, "app.js").status(), 304);
    }

    #[test]
    fn test_stale_etag_ignores_if_modified_since() {
        let ctx = RequestContext {
            if_none_match: Some("\"stale\""),
            if_modified_since: Some("Sun, 06 Nov 1994 08:49:37 GMT"),
            ..ctx()
        };
        assert_eq!(serve_asset(&ctx, &OneFile, "app.js").status(), 200);
    }

    #[test]
    fn test_if_modified_since() {
        let ctx = RequestContext {
            if_modified_since: Some("Mon, 07 Nov 1994 08:49:37 GMT"),
            ..ctx()
        };
        assert_eq!(serve_asset(&ctx, &OneFile, "app.js").status(), 304);
    }

    #[test]
    fn test_range_requests() {
        let partial = RequestContext {
            range_header: Some("bytes=2-5"),
            ..ctx()
        };
        let resp = serve_asset(&partial, &OneFile, "app.js");
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 2-5/10");
        assert_eq!(resp.headers()["Content-Length"], "4");

        let beyond = RequestContext {
            range_header: Some("bytes=20-"),
            ..ctx()
        };
        let resp = serve_asset(&beyond, &OneFile, "app.js");
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["Content-Range"], "bytes */10");
    }
}
