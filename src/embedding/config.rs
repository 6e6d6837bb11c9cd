use std::path::PathBuf;

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};

use super::error::EmbeddingError;

/// Configuration for [`BertEmbedder`](super::BertEmbedder) and [`StubEmbedder`](super::StubEmbedder).
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_path: Option<PathBuf>,
    /// Max tokens per text; longer inputs are truncated.
    pub max_seq_len: usize,
    /// Output dimension of the stub embedder. Ignored when a model is loaded.
    pub stub_dim: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            stub_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl EmbedderConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    /// Returns `true` when no model directory is configured.
    pub fn is_stub(&self) -> bool {
        self.model_path.is_none()
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than 0".to_string(),
            });
        }

        if self.stub_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "stub_dim must be greater than 0".to_string(),
            });
        }

        let Some(path) = &self.model_path else {
            return Ok(());
        };

        if path.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path cannot be empty when provided".to_string(),
            });
        }

        if !path.is_dir() {
            return Err(EmbeddingError::ModelNotFound { path: path.clone() });
        }

        for file in ["config.json", "model.safetensors", "tokenizer.json"] {
            if !path.join(file).exists() {
                return Err(EmbeddingError::IncompleteModel {
                    path: path.clone(),
                    file,
                });
            }
        }

        Ok(())
    }
}
