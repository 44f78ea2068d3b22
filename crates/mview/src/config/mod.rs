//! Configuration module for mview.
//!
//! Handles loading configuration from:
//! - Default values
//! - Config file (~/.config/mview/config.toml, or an explicit `--config` path)
//! - Environment variables (`MVIEW_CONFIG_DIR`, `RUST_LOG`)

mod schema;

pub use schema::{
    BrowseConfig, Config, ConnectionConfig, DisplayConfig, LogConfig, DEFAULT_DOCUMENT_LIMIT,
    MIN_PANE_WIDTH,
};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Returns the config directory path.
///
/// Checks `MVIEW_CONFIG_DIR` environment variable first, then falls back
/// to the system default (~/.config/mview on Linux).
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("MVIEW_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|p| p.join("mview"))
}

/// Returns the default config file path (~/.config/mview/config.toml)
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Returns the default log file path (~/.config/mview/mview.log)
pub fn log_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("mview.log"))
}

/// Load configuration from the default path or return defaults
pub fn load_config() -> Result<Config> {
    if let Some(path) = config_path() {
        if path.exists() {
            return load_config_from(&path);
        }
    }
    Ok(Config::default())
}

/// Load configuration from a specific path
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.browse.document_limit, 400);
        assert_eq!(config.connection.connect_timeout_secs, 5);
        assert!(config.display.show_help);
    }

    #[test]
    #[serial]
    fn test_config_paths_follow_env_override() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("MVIEW_CONFIG_DIR", dir.path());

        assert_eq!(config_dir().unwrap(), dir.path());
        assert_eq!(config_path().unwrap(), dir.path().join("config.toml"));
        assert_eq!(log_path().unwrap(), dir.path().join("mview.log"));

        // No file there yet: defaults.
        assert_eq!(load_config().unwrap(), Config::default());

        std::env::remove_var("MVIEW_CONFIG_DIR");
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[browse]
document_limit = 25
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.browse.document_limit, 25);
        // Other fields should be default
        assert_eq!(config.display.pane_width, 24);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[browse]\ndocument_limit = 0").unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.browse.document_limit, DEFAULT_DOCUMENT_LIMIT);
    }

    #[test]
    fn test_load_config_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_from_invalid_toml_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[browse\ndocument_limit = ").unwrap();

        let err = load_config_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
