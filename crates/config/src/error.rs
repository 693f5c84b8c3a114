//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during settings
//! loading, parsing, and validation.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a settings file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a settings file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 settings.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Failed to serialize settings to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// A setting is outside its accepted range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending setting.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "ghost.opacity",
            reason: "2 is outside 0..=1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for ghost.opacity: 2 is outside 0..=1"
        );
    }
}
