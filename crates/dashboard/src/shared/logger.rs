use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::config::LoggingConfig;

pub const LOG_FILE_NAME: &str = "dashboard.log";

/// Installs the global subscriber: stderr plus an append-mode log file.
///
/// stdout stays clean for the JSON the runner prints. Returns the log file path.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<PathBuf> {
    // Создаем директорию для логов
    let log_dir = Path::new(&config.dir);
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log dir {}", log_dir.display()))?;

    let log_file_path = log_dir.join(LOG_FILE_NAME);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .with_context(|| format!("failed to open {}", log_file_path.display()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .try_init()
        .context("logging already initialised")?;

    Ok(log_file_path)
}
