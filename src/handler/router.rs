//! Request routing dispatch module
//!
//! Method validation, then dispatch on the path below the mount point.

use super::{static_files, SwaggerUi, DEFAULT_DOC_URL, DEFAULT_INDEX};
use crate::error::Result;
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{HeaderMap, Method, Request, Response};

/// Request headers the asset server needs
pub struct RequestContext<'a> {
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
    pub if_modified_since: Option<&'a str>,
    pub range_header: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    fn from_headers(headers: &'a HeaderMap, is_head: bool) -> Self {
        let header = move |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
        Self {
            is_head,
            if_none_match: header("if-none-match"),
            if_modified_since: header("if-modified-since"),
            range_header: header("range"),
        }
    }
}

impl SwaggerUi {
    /// Handle one request routed to this handler
    ///
    /// The first call fixes the mount prefix from its route and any
    /// `X-Forwarded-Prefix` header. Document source failures and entry page
    /// render failures come back as `Err` for the host to answer.
    pub fn handle<B>(&self, req: &Request<B>) -> Result<Response<Full<Bytes>>> {
        let method = req.method();
        if let Some(resp) = check_http_method(method) {
            return Ok(resp);
        }
        let is_head = *method == Method::HEAD;

        let mount = self.mount_state(req.headers());

        let Some(path) = self.relative_path(req.uri().path()) else {
            return Ok(http::build_404_response());
        };

        match path {
            DEFAULT_INDEX => {
                let html = self.template.render(&mount.config)?;
                Ok(http::build_html_response(html, is_head)?)
            }
            DEFAULT_DOC_URL => {
                let doc = self.spec.fetch_document(&mount.config.instance_name)?;
                Ok(http::build_json_response(doc, is_head)?)
            }
            "" | "/" => {
                let target = super::prefix::join_path(&[&mount.prefix, DEFAULT_INDEX]);
                Ok(http::build_redirect_response(&target)?)
            }
            asset => {
                let ctx = RequestContext::from_headers(req.headers(), is_head);
                Ok(static_files::serve_asset(&ctx, self.assets.as_ref(), asset))
            }
        }
    }
}

/// Answer OPTIONS and unsupported methods directly
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => Some(http::build_405_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Registry, StaticDoc};
    use std::sync::Arc;

    fn ui() -> SwaggerUi {
        let registry = Registry::new();
        registry.register("", StaticDoc::new(r#"{"swagger":"2.0"}"#)).unwrap();
        SwaggerUi::new("/swag/*").spec_source(Arc::new(registry))
    }

    fn get(path: &str) -> Request<()> {
        Request::get(path).body(()).unwrap()
    }

    #[test]
    fn test_dispatch_statuses() {
        let ui = ui();
        assert_eq!(ui.handle(&get("/swag/index.html")).unwrap().status(), 200);
        assert_eq!(ui.handle(&get("/swag/doc.json")).unwrap().status(), 200);
        assert_eq!(ui.handle(&get("/swag/")).unwrap().status(), 301);
        assert_eq!(ui.handle(&get("/swag")).unwrap().status(), 301);
        assert_eq!(ui.handle(&get("/swag//")).unwrap().status(), 301);
        assert_eq!(ui.handle(&get("/swag/swagger-ui.css")).unwrap().status(), 200);
        assert_eq!(ui.handle(&get("/swag/missing.js")).unwrap().status(), 404);
        assert_eq!(ui.handle(&get("/elsewhere")).unwrap().status(), 404);
    }

    #[test]
    fn test_nested_index_is_an_asset_lookup() {
        let ui = ui();
        assert_eq!(ui.handle(&get("/swag/v1/index.html")).unwrap().status(), 404);
    }

    #[test]
    fn test_method_checks() {
        let ui = ui();
        let options = Request::options("/swag/index.html").body(()).unwrap();
        let resp = ui.handle(&options).unwrap();
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");

        let post = Request::post("/swag/doc.json").body(()).unwrap();
        assert_eq!(ui.handle(&post).unwrap().status(), 405);
        assert_eq!(ui.prefix(), None);
    }

    #[test]
    fn test_unknown_instance_is_an_error() {
        let ui = SwaggerUi::new("/swag/*").spec_source(Arc::new(Registry::new()));
        let err = ui.handle(&get("/swag/doc.json")).unwrap_err();
        assert!(matches!(err, crate::Error::DocNotFound { .. }));
    }
}
