//! Logger module
//!
//! Provides logging utilities including:
//! - Cloaked handler errors written to a `LogSink`
//! - Response construction failures
//! - Server lifecycle and connection logging for the demo binary

pub mod writer;

pub use writer::LogSink;

use chrono::Local;
use std::fmt::Display;
use std::net::SocketAddr;

use crate::config::Config;

/// Write a timestamped error line, dropping it when no sink is configured
fn write_error(sink: Option<&LogSink>, message: &str) {
    if let Some(sink) = sink {
        let now = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        sink.write_line(&format!("{now} [ERROR] {message}"));
    }
}

fn write_warning(sink: Option<&LogSink>, message: &str) {
    if let Some(sink) = sink {
        let now = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        sink.write_line(&format!("{now} [WARN] {message}"));
    }
}

/// Error hidden from the client
pub fn log_internal_error(sink: Option<&LogSink>, err: &dyn Display) {
    write_error(sink, &format!("internal error: {err}"));
}

/// Transport failure while reading a request body
pub fn log_body_read_error(sink: Option<&LogSink>, err: &dyn Display) {
    write_warning(sink, &format!("failed to read request body: {err}"));
}

/// Request body that is not valid JSON for the handler's payload
pub fn log_decode_error(sink: Option<&LogSink>, err: &serde_json::Error) {
    write_warning(sink, &format!("failed to decode request body: {err}"));
}

/// Failure to encode a response or error body
pub fn log_encode_error(sink: Option<&LogSink>, what: &str, err: &serde_json::Error) {
    write_error(sink, &format!("failed to serialize {what}: {err}"));
}

/// A status write after the handler already committed one
pub fn log_superfluous_status(sink: Option<&LogSink>, ignored: hyper::StatusCode) {
    write_warning(
        sink,
        &format!("superfluous status write ignored: {}", ignored.as_u16()),
    );
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("JSON handler demo server started");
    println!("Listening on: http://{addr}");
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    if let Some(ref path) = config.logging.error_log_file {
        println!("Error log: {path}");
    }
    println!("Max body size: {} bytes", config.http.max_body_size);
    println!("======================================\n");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
