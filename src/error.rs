//! Error types for the configuration accessor.

use crate::types::ValueType;
use thiserror::Error;

/// Errors reported by every configuration operation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Path too long: {len} bytes (max {max})")]
    PathTooLong { len: usize, max: usize },

    #[error("No value or default for: {0}")]
    NotFound(String),

    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: ValueType,
        found: String,
    },

    #[error("String array too large: {len} elements (max {max})")]
    ArrayTooLarge { len: usize, max: usize },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Backing store error: {0}")]
    BackingStore(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl ConfigError {
    pub(crate) fn mismatch(path: &str, expected: ValueType, found: impl ToString) -> Self {
        ConfigError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: found.to_string(),
        }
    }

    /// Errors the caller can recover from by falling back to its own value
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConfigError::NotFound(_) | ConfigError::TypeMismatch { .. }
        )
    }
}

impl From<sled::Error> for ConfigError {
    fn from(err: sled::Error) -> Self {
        ConfigError::BackingStore(format!("sled: {}", err))
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::BackingStore(format!("json: {}", err))
    }
}

impl From<bincode::Error> for ConfigError {
    fn from(err: bincode::Error) -> Self {
        ConfigError::BackingStore(format!("value encoding: {}", err))
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::BackingStore(format!("I/O: {}", err))
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Settings(err.to_string())
    }
}
