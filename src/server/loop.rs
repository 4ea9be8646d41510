// Server loop module
// Accepts connections until shutdown is requested, then drains

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use super::AppState;
use crate::logger;

const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Accept connections until `shutdown` fires
///
/// Open connections get up to the configured write timeout to finish.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> std::io::Result<()> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = shutdown.notified() => break,
        }
    }

    drop(listener);
    logger::log_server_stop(state.active_connections.load(Ordering::SeqCst));

    let grace = Duration::from_secs(state.config.performance.write_timeout);
    let drained = tokio::time::timeout(grace, async {
        while state.active_connections.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(DRAIN_POLL).await;
        }
    })
    .await;

    if drained.is_err() {
        logger::log_warning(&format!(
            "{} connection(s) still open after {}s, exiting",
            state.active_connections.load(Ordering::SeqCst),
            grace.as_secs()
        ));
    }
    Ok(())
}
