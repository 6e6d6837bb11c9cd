use thiserror::Error;

use crate::similarity::SimilarityError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("semantic similarity failed: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("similarity returned {actual} scores for {expected} descriptions")]
    SimilarityCountMismatch { expected: usize, actual: usize },
}
