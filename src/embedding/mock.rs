use std::collections::HashMap;

use parking_lot::Mutex;

use super::error::EmbeddingError;
use super::{Embedder, l2_normalize};

/// Test embedder with scripted vectors, call recording and failure injection.
///
/// Texts without a scripted vector embed to the first basis vector.
#[derive(Debug, Default)]
pub struct MockEmbedder {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
    failure: Option<String>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Default::default()
        }
    }

    /// Scripts the (normalized) vector returned for `text`.
    pub fn with_vector(mut self, text: impl Into<String>, mut vector: Vec<f32>) -> Self {
        assert_eq!(vector.len(), self.dim, "scripted vector has wrong dimension");
        l2_normalize(&mut vector);
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Makes every call fail with [`EmbeddingError::InferenceFailed`].
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    /// Batches received so far, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn default_vector(&self) -> Vec<f32> {
        let mut vector = vec![0.0; self.dim];
        if let Some(first) = vector.first_mut() {
            *first = 1.0;
        }
        vector
    }
}

impl Embedder for MockEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls
            .lock()
            .push(texts.iter().map(|t| t.to_string()).collect());

        if let Some(reason) = &self.failure {
            return Err(EmbeddingError::InferenceFailed {
                reason: reason.clone(),
            });
        }

        Ok(texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(*text)
                    .cloned()
                    .unwrap_or_else(|| self.default_vector())
            })
            .collect())
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }

    fn is_stub(&self) -> bool {
        true
    }
}
