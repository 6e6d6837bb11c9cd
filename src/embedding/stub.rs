use std::hash::{DefaultHasher, Hash, Hasher};

use tracing::debug;

use super::error::EmbeddingError;
use super::{Embedder, l2_normalize};

/// Deterministic embedder that needs no model files.
///
/// Each text is hashed into a seed for a linear congruential sequence, so identical texts
/// map to identical unit vectors. Distances carry no semantic meaning.
#[derive(Debug, Clone)]
pub struct StubEmbedder {
    dim: usize,
}

impl StubEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish();

        let mut embedding = Vec::with_capacity(self.dim);
        for _ in 0..self.dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        l2_normalize(&mut embedding);
        embedding
    }
}

impl Embedder for StubEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        debug!(batch_size = texts.len(), "Generating stub embeddings");
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }

    fn is_stub(&self) -> bool {
        true
    }
}
