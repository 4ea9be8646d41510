// Connection handling module
// Accepts TCP connections and serves HTTP/1.1 requests on them

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;

use super::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Accept a connection, enforcing the connection limit, and serve it on its own task
pub fn accept_connection(stream: tokio::net::TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    // Increment first, then check, so concurrent accepts cannot overshoot
    let prev_count = state.active_connections.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            state.active_connections.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    if state.config.logging.access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    handle_connection(stream, peer_addr, Arc::clone(state));
}

/// Serve one connection with keep-alive and an overall timeout
fn handle_connection(stream: tokio::net::TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let performance = &state.config.performance;
        let timeout_duration = Duration::from_secs(std::cmp::max(
            performance.read_timeout,
            performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        builder.keep_alive(performance.keep_alive_timeout > 0);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&service_state);
                async move { handle_request(&req, &state, peer_addr) }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout_duration.as_secs()
            )),
        }

        state.active_connections.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Route a request to the Swagger UI mount, 404 elsewhere
pub fn handle_request<B>(
    req: &Request<B>,
    state: &AppState,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let mut response = if state.swagger.matches(req.uri().path()) {
        state.swagger.handle(req).unwrap_or_else(|e| {
            logger::log_error(&format!("{} {}: {e}", req.method(), req.uri().path()));
            http::build_error_response(&e)
        })
    } else {
        http::build_404_response()
    };

    if state.config.http.enable_cors {
        http::apply_cors(&mut response);
    }

    if state.config.logging.access_log {
        log_access(req, &response, peer_addr, started, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn log_access<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    format: &str,
) {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
        .unwrap_or(usize::MAX);
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, format);
}
