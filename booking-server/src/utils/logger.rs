//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize console-only logging (tests, local runs)
pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_target(false)
        .init();
}

/// Initialize logging with console output plus a daily-rolling file
///
/// The returned guard must be held for the lifetime of the process;
/// dropping it stops the background writer and loses buffered lines.
pub fn init_logger_with_file(default_level: &str, log_dir: impl AsRef<Path>) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir.as_ref(), "booking-server");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(false)
        .with_ansi(false)
        .with_writer(file_writer.and(std::io::stdout))
        .init();

    guard
}
