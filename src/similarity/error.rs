use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("embedder returned {actual} vectors for {expected} texts")]
    BatchSizeMismatch { expected: usize, actual: usize },

    #[error("unknown similarity strategy '{value}': expected 'lexical' or 'embedding'")]
    UnknownStrategy { value: String },
}
