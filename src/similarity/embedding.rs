use std::sync::Arc;

use tracing::debug;

use crate::embedding::Embedder;

use super::TextSimilarity;
use super::error::SimilarityError;

/// Cosine similarity of embeddings, remapped from `[-1, 1]` to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct EmbeddingSimilarity {
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingSimilarity {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }
}

impl TextSimilarity for EmbeddingSimilarity {
    fn name(&self) -> &'static str {
        "embedding"
    }

    fn similarity(&self, text: &str, reference: &str) -> Result<f64, SimilarityError> {
        let scores = self.similarity_batch(text, &[reference])?;
        scores
            .into_iter()
            .next()
            .ok_or(SimilarityError::BatchSizeMismatch {
                expected: 1,
                actual: 0,
            })
    }

    /// Embeds `text` and every distinct reference in a single embedder call.
    fn similarity_batch(
        &self,
        text: &str,
        references: &[&str],
    ) -> Result<Vec<f64>, SimilarityError> {
        if references.is_empty() {
            return Ok(Vec::new());
        }

        let mut batch: Vec<&str> = Vec::with_capacity(references.len() + 1);
        batch.push(text);
        let slots: Vec<usize> = references
            .iter()
            .map(|reference| match batch.iter().position(|t| t == reference) {
                Some(pos) => pos,
                None => {
                    batch.push(*reference);
                    batch.len() - 1
                }
            })
            .collect();

        let vectors = self.embedder.embed_batch(&batch)?;
        if vectors.len() != batch.len() {
            return Err(SimilarityError::BatchSizeMismatch {
                expected: batch.len(),
                actual: vectors.len(),
            });
        }

        debug!(
            references = references.len(),
            embedded = batch.len(),
            "Computed embedding similarities"
        );

        let text_vector = &vectors[0];
        Ok(slots
            .into_iter()
            .map(|slot| remap_cosine(cosine_similarity(text_vector, &vectors[slot])))
            .collect())
    }
}

/// Cosine similarity of two vectors; `0.0` for empty, mismatched or zero-norm inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Maps a cosine value onto `[0, 1]` via `(sim + 1) / 2`.
pub fn remap_cosine(sim: f32) -> f64 {
    ((f64::from(sim) + 1.0) / 2.0).clamp(0.0, 1.0)
}
