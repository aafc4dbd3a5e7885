//! Logger module
//!
//! Provides logging utilities for the application shell:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Unhandled request error reporting
//! - Error and warning logging

mod format;
pub mod writer;

pub use format::{unhandled_error_line, AccessLogEntry};

use crate::config::Config;
use std::net::SocketAddr;

/// Attach the process-wide log sink.
///
/// Called exactly once at application startup.
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
    write_info("samui application server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    write_info(&format!("Debug mode: {}", config.app.debug));
    write_info(&format!("Static root: {}", config.static_files.root));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info("Route groups: / /api/sa/data /api/sa/rules /api/sa/oauth");
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
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

pub fn log_api_request(method: &str, path: &str, status: u16) {
    write_info(&format!("[API] {method} {path} - {status}"));
}

/// Log a request error that escaped its route group.
///
/// The line is pre-rendered by `unhandled_error_line`; this sink must never
/// fail the request.
pub fn log_unhandled_error(line: &str) {
    write_error(&format!("[ERROR] {line}"));
}
