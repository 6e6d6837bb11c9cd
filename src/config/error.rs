//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::similarity::SimilarityError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Similarity strategy name is not recognized.
    #[error("invalid similarity strategy: {0}")]
    InvalidSimilarity(#[from] SimilarityError),

    /// Timeout must be a positive number of milliseconds.
    #[error("invalid score timeout '{value}': must be a positive integer (milliseconds)")]
    InvalidTimeout { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
