// Server module entry point
// Bundled HTTP server hosting a Swagger UI mount

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use crate::config::Config;
use crate::handler::SwaggerUi;

pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;

/// State shared by every connection task
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub swagger: SwaggerUi,
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub const fn new(config: Config, swagger: SwaggerUi) -> Self {
        Self {
            config,
            swagger,
            active_connections: AtomicUsize::new(0),
        }
    }
}

/// Bind, install signal handlers and serve until SIGINT/SIGTERM
pub async fn run(config: Config, swagger: SwaggerUi) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;
    crate::logger::log_server_start(&listener.local_addr()?, &config);

    let shutdown = Arc::new(tokio::sync::Notify::new());
    signal::start_signal_handler(Arc::clone(&shutdown));

    let state = Arc::new(AppState::new(config, swagger));
    start_server_loop(listener, state, shutdown).await?;
    Ok(())
}
