//! Logger module
//!
//! Server lifecycle, mount initialization, access and error logging, written
//! to stdout/stderr or to files.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use writer::LogWriter;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Swagger UI server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Swagger UI: http://{addr}{}", config.swagger.route));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.swagger.doc_file {
        write_info(&format!("API document: {path}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_server_stop(active_connections: usize) {
    write_info(&format!(
        "[Shutdown] Listener closed, {active_connections} connection(s) still open"
    ));
}

/// Write to the access log only when a writer is installed
fn write_installed(writer: Option<&LogWriter>, message: &str) -> bool {
    let Some(w) = writer else {
        return false;
    };
    w.write_access(message);
    true
}

/// Logged once per handler, when the first request fixes its prefix
///
/// Silent in hosts that embed the handler without calling [`init`].
pub fn log_mount_prefix(route: &str, prefix: &str, doc_url: &str) {
    write_installed(
        writer::get(),
        &format!("[Swagger] Route {route} mounted at {prefix} (document: {doc_url})"),
    );
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_info(message: &str) {
    write_info(message);
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
