use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Request, StatusCode};
use hyper_util::rt::TokioIo;
use swagger_handler::config::Config;
use swagger_handler::server::{create_reusable_listener, start_server_loop, AppState};
use swagger_handler::spec::{Registry, StaticDoc};
use swagger_handler::SwaggerUi;
use tokio::sync::Notify;

async fn start() -> (SocketAddr, Arc<Notify>) {
    let mut config = Config::load_from("does-not-exist.toml").unwrap();
    config.logging.access_log = false;

    let registry = Registry::new();
    registry.register("", StaticDoc::new(r#"{"openapi":"3.0.3"}"#)).unwrap();
    let swagger = SwaggerUi::new(config.swagger.route.clone()).spec_source(Arc::new(registry));

    let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Arc::new(Notify::new());
    let state = Arc::new(AppState::new(config, swagger));
    tokio::spawn(start_server_loop(listener, state, Arc::clone(&shutdown)));
    (addr, shutdown)
}

async fn send(addr: SocketAddr, req: Request<Empty<Bytes>>) -> hyper::Response<hyper::body::Incoming> {
    let stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();
    tokio::spawn(conn);
    sender.send_request(req).await.unwrap()
}

fn get(addr: SocketAddr, path: &str, forwarded: Option<&str>) -> Request<Empty<Bytes>> {
    let mut builder = Request::get(path).header("host", addr.to_string());
    if let Some(prefix) = forwarded {
        builder = builder.header("x-forwarded-prefix", prefix);
    }
    builder.body(Empty::new()).unwrap()
}

#[tokio::test]
async fn it_serves_the_mount_over_tcp() {
    let (addr, shutdown) = start().await;

    let resp = send(addr, get(addr, "/swagger/", Some("/edge/"))).await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(resp.headers()["location"], "/edge/swagger/index.html");

    let resp = send(addr, get(addr, "/swagger/doc.json", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], br#"{"openapi":"3.0.3"}"#);

    let resp = send(addr, get(addr, "/swagger/index.html", None)).await;
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#""url":"/edge/swagger/doc.json""#));

    let resp = send(addr, get(addr, "/elsewhere", None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    shutdown.notify_one();
}
