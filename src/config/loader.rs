//! Configuration file loading

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::Config;

const CONFIG_DIR_NAME: &str = "marker-hover";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur during config loading
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Invalid TOML in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}

/// `<config dir>/marker-hover/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No config file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    parse_config(&content, &path)
}

/// Parse TOML config text; `path` is only used in error messages
pub fn parse_config(content: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: e.message().to_string(),
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod loader_tests;
