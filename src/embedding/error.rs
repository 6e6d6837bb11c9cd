use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading an embedding model or embedding a batch of texts.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding model directory not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("embedding model directory {path} is missing {file}")]
    IncompleteModel { path: PathBuf, file: &'static str },

    #[error("failed to load embedding model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelLoadFailed {
            reason: format!("reading model files: {}", err),
        }
    }
}
