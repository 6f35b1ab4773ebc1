//! File logging.
//!
//! The widget owns the terminal, so log output can only go to a file.
//! Without a log file nothing is installed and `tracing` macros are no-ops.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::level_filters::LevelFilter;

/// Parses a log level name, case-insensitively.
///
/// # Example
///
/// ```
/// use linepick::logging::parse_level;
/// use tracing::level_filters::LevelFilter;
///
/// assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::DEBUG);
/// assert!(parse_level("loud").is_err());
/// ```
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .parse::<LevelFilter>()
        .map_err(|_| anyhow!("Unknown log level {:?}", level))
}

/// Creates the file appender. Wrapping it in a non-blocking writer would
/// lose lines written right before exit, so it is used directly.
fn file_appender(path: &Path) -> Result<tracing_appender::rolling::RollingFileAppender> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Log file path {} has no file name", path.display()))?;

    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create log directory {}", parent.display()))?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}

/// Installs a global subscriber writing to `path` at `level`.
///
/// # Errors
///
/// Returns an error for an unknown level, an unusable path, or when a
/// subscriber is already installed.
pub fn init(path: &Path, level: &str) -> Result<()> {
    let level = parse_level(level)?;
    let appender = file_appender(path)?;

    tracing_subscriber::fmt()
        .with_writer(appender)
        .with_max_level(level)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("logging to {} at {}", path.display(), level);
    Ok(())
}
