//! File-backed tracing setup.
//!
//! The terminal UI owns stdout, so events go to
//! `~/.local/state/typerush/typerush.log`. `TYPERUSH_LOG` takes an
//! `EnvFilter` directive (default `info`).

use crate::app_dirs::AppDirs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "TYPERUSH_LOG";
const LOG_FILE: &str = "typerush.log";

/// Install the global subscriber. Hold the guard until exit so buffered
/// lines get flushed. Returns `None` when no log directory is usable, in
/// which case logging stays off.
pub fn init() -> Option<WorkerGuard> {
    let dir = AppDirs::log_dir()?;
    init_in(&dir)
}

pub fn init_in(dir: &Path) -> Option<WorkerGuard> {
    std::fs::create_dir_all(dir).ok()?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .try_init()
        .ok()?;

    tracing::info!(log_dir = ?dir, "logging initialized");
    Some(guard)
}
