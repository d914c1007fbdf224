use thiserror::Error;

use crate::config::ConfigError;

/// Custom error types for marker-hover
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarkerHoverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid scene file: {0}")]
    InvalidScene(String),

    #[error("Script line {line}: {message}")]
    InvalidScript { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MarkerHoverError {
    fn from(err: std::io::Error) -> Self {
        MarkerHoverError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MarkerHoverError {
    fn from(err: serde_json::Error) -> Self {
        MarkerHoverError::InvalidScene(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
