//! File logging
//!
//! stdout and stderr belong to the full-screen UI, so everything goes to a
//! log file through a non-blocking writer.

use std::path::{Path, PathBuf};

use anyhow::Context;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Environment variable that overrides the configured filter
pub const LOG_ENV: &str = "CAFFEETERIA_LOG";

const LOG_FILE_NAME: &str = "caffeeteria.log";

/// Resolve where the log file goes
pub fn log_file_path(settings: &LogSettings) -> Option<PathBuf> {
    settings.file.clone().or_else(|| {
        dirs::cache_dir().map(|dir| dir.join("caffeeteria").join(LOG_FILE_NAME))
    })
}

/// Install the global subscriber.
///
/// The returned guard flushes pending lines when dropped and must be held
/// until the program exits. Returns `None` when logging is disabled, no log
/// location exists, or a subscriber is already installed.
pub fn init_logging(settings: &LogSettings) -> anyhow::Result<Option<WorkerGuard>> {
    if !settings.enabled {
        return Ok(None);
    }
    let Some(path) = log_file_path(settings) else {
        return Ok(None);
    };

    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // Global subscriber already installed; drop guard so writer shuts down.
        Err(_) => Ok(None),
    }
}
