//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Timeout value is zero or otherwise unusable.
    #[error("invalid request timeout '{value}': must be a positive number of seconds")]
    InvalidTimeout { value: String },

    /// Timeout string could not be parsed as a number.
    #[error("failed to parse request timeout '{value}': {source}")]
    TimeoutParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
