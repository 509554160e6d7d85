use anyhow::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize file-based tracing. The terminal belongs to the TUI, so
/// everything goes to a daily-rolling file under the user data dir.
/// The returned guard must stay alive for the process lifetime or
/// buffered lines are lost.
pub fn init_tracing(config: &LoggingConfig) -> Result<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let dir = logs_dir();
    std::fs::create_dir_all(&dir).ok();
    let file_appender = tracing_appender::rolling::daily(dir, "veritui.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("tracing initialized");
    Ok(guard)
}

fn logs_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("veritui").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
