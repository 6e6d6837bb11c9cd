//! Pluggable semantic-similarity strategies.
//!
//! The scoring engine only sees [`TextSimilarity`]. Which implementation backs it is
//! decided once, at construction, from [`SimilarityStrategy`].

pub mod embedding;
pub mod error;
pub mod lexical;


pub use embedding::{EmbeddingSimilarity, cosine_similarity, remap_cosine};
pub use error::SimilarityError;
pub use lexical::{LexicalSimilarity, jaccard};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::embedding::{EmbedderConfig, load_embedder};

/// Similarity between a text and a reference text, in `[0, 1]`.
pub trait TextSimilarity: Send + Sync + fmt::Debug {
    /// Short strategy name for logs.
    fn name(&self) -> &'static str;

    fn similarity(&self, text: &str, reference: &str) -> Result<f64, SimilarityError>;

    /// Scores `text` against each reference, in order.
    ///
    /// Implementations backed by a model should override this to batch the work.
    fn similarity_batch(
        &self,
        text: &str,
        references: &[&str],
    ) -> Result<Vec<f64>, SimilarityError> {
        references
            .iter()
            .map(|reference| self.similarity(text, reference))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimilarityStrategy {
    /// Word-set overlap; no model required.
    #[default]
    Lexical,
    /// Cosine similarity of sentence embeddings.
    Embedding,
}

impl SimilarityStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityStrategy::Lexical => "lexical",
            SimilarityStrategy::Embedding => "embedding",
        }
    }
}

impl fmt::Display for SimilarityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityStrategy {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" => Ok(SimilarityStrategy::Lexical),
            "embedding" => Ok(SimilarityStrategy::Embedding),
            _ => Err(SimilarityError::UnknownStrategy {
                value: s.to_string(),
            }),
        }
    }
}

/// Builds the similarity implementation for `strategy`.
///
/// `embedder` is only consulted for [`SimilarityStrategy::Embedding`].
pub fn build_similarity(
    strategy: SimilarityStrategy,
    embedder: &EmbedderConfig,
) -> Result<Arc<dyn TextSimilarity>, SimilarityError> {
    let similarity: Arc<dyn TextSimilarity> = match strategy {
        SimilarityStrategy::Lexical => Arc::new(LexicalSimilarity::new()),
        SimilarityStrategy::Embedding => {
            Arc::new(EmbeddingSimilarity::new(load_embedder(embedder)?))
        }
    };

    info!(strategy = %strategy, "Similarity strategy ready");
    Ok(similarity)
}
