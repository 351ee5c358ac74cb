//! Logging setup.
//!
//! Everything logs through the `log` facade. When logging is enabled in the
//! configuration, a `fern` dispatch writes timestamped lines to the log file;
//! otherwise records are discarded.

use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::{Config, LoggingConfig};

/// Parse a configured level name; unknown names fall back to `info`.
pub fn level_filter(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Resolve the log file location for `config`.
pub fn log_file_path(config: &LoggingConfig) -> Result<PathBuf> {
    match &config.file {
        Some(path) => Ok(path.clone()),
        None => Ok(Config::get_data_dir()?.join("taskboard.log")),
    }
}

/// Build the dispatch for `config` without installing it.
///
/// Returns `None` when logging is disabled.
pub fn build_dispatch(config: &LoggingConfig) -> Result<Option<fern::Dispatch>> {
    if !config.enabled {
        return Ok(None);
    }

    let path = log_file_path(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level_filter(&config.level))
        // sqlx/sea-orm query logging is noisy at info
        .level_for("sqlx", LevelFilter::Warn)
        .level_for("sea_orm", LevelFilter::Warn)
        .chain(file);

    Ok(Some(dispatch))
}

/// Install the global logger. Call once at startup.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if let Some(dispatch) = build_dispatch(config)? {
        dispatch.apply().context("Failed to install logger")?;
    }
    Ok(())
}
