//! File-backed tracing setup.
//!
//! The UI owns the whole terminal, so log output goes to a file and never to
//! stdout/stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{self, LogConfig};

/// Resolve where the log file goes, if anywhere.
pub fn log_file(cfg: &LogConfig) -> Option<PathBuf> {
    if !cfg.enabled {
        return None;
    }
    match &cfg.file {
        Some(path) => Some(PathBuf::from(path)),
        None => config::log_path(),
    }
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(cfg: &LogConfig) -> Result<Option<WorkerGuard>> {
    let Some(path) = log_file(cfg) else {
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .context("Log file path has no file name")?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logging_has_no_file() {
        let cfg = LogConfig {
            enabled: false,
            ..LogConfig::default()
        };
        assert_eq!(log_file(&cfg), None);
    }

    #[test]
    fn test_explicit_log_file() {
        let cfg = LogConfig {
            file: Some("/var/tmp/mview-test.log".to_string()),
            ..LogConfig::default()
        };
        assert_eq!(log_file(&cfg), Some(PathBuf::from("/var/tmp/mview-test.log")));
    }
}
