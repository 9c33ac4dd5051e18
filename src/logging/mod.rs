//! Application logging functionality
//!
//! Logs go to stderr, and additionally to a daily log file under
//! ~/.config/ghht/logs/ once the config directory has been created with
//! --new-config.

use crate::core::config_file::ConfigFile;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::config_dir().join("logs")
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d");
    logs_dir().join(format!("ghht.log.{}", timestamp))
}

/// Initialize the logs directory
pub fn initialize_logs_directory() -> anyhow::Result<()> {
    fs::create_dir_all(logs_dir())?;
    Ok(())
}

/// Filter from RUST_LOG, falling back to info (debug when verbose)
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), level))
    })
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer when dropped and must be
/// kept alive until the program ends.
pub fn init(verbose: bool) -> Option<WorkerGuard> {
    let (file_layer, guard) = match file_writer() {
        Some((writer, guard)) => (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            Some(guard),
        ),
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .try_init();
    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    } else if guard.is_some() {
        tracing::debug!("Writing logs to {}", current_log_file().display());
    }

    guard
}

/// Daily rolling file writer, only when the config directory exists
fn file_writer() -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !ConfigFile::config_dir().exists() {
        return None;
    }
    if let Err(e) = initialize_logs_directory() {
        eprintln!("Failed to create logs directory: {}", e);
        return None;
    }
    let appender = tracing_appender::rolling::daily(logs_dir(), "ghht.log");
    Some(tracing_appender::non_blocking(appender))
}
