//! Logging configuration using tracing
//!
//! Every run appends to a single log file. The launcher is usually started by
//! a GUI log viewer with no console attached, so the file is the only place
//! where matches, launched commands and failures become visible.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Name of the append-mode log file.
pub const LOG_FILE_NAME: &str = "lineopen.log";

/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "LINEOPEN_LOG_DIR";

/// Environment variable holding tracing filter directives.
pub const LOG_FILTER_ENV: &str = "LINEOPEN_LOG";

const DEFAULT_FILTER: &str = "lineopen=info,lineopen_app=info,lineopen_core=info,warn";

/// Initialize the logging subsystem
///
/// Logs are appended to `lineopen.log` in `$LINEOPEN_LOG_DIR`, or in
/// `~/.local/share/line-opener/logs/` (platform equivalent) when unset.
/// Log level is controlled by the `LINEOPEN_LOG` environment variable.
///
/// # Examples
/// ```bash
/// LINEOPEN_LOG=debug lineopen '...'
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    // NEVER rotation opens a single file in append mode.
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(&log_dir)
        .map_err(|e| Error::logging(e.to_string()))?;

    let env_filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::logging(e.to_string()))?;

    tracing::debug!("Log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
pub fn log_directory() -> PathBuf {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("line-opener").join("logs")
}
