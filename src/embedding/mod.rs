//! Text embedding capability used by embedding-based similarity.
//!
//! - [`BertEmbedder`] runs a local BERT checkpoint with candle.
//! - [`StubEmbedder`] is a deterministic stand-in when no model is configured.

/// BERT sentence embedder.
pub mod bert;
/// Embedder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod stub;


pub use bert::BertEmbedder;
pub use config::EmbedderConfig;
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use stub::StubEmbedder;

use std::sync::Arc;

use tracing::warn;

/// Maps texts to fixed-length vectors.
///
/// Implementations must be deterministic for a given model version and return one vector
/// per input text, in input order.
pub trait Embedder: Send + Sync + std::fmt::Debug {
    /// Embeds every text of the batch in one model invocation.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    fn embedding_dim(&self) -> usize;

    /// Returns `true` if the vectors carry no semantic meaning.
    fn is_stub(&self) -> bool;
}

/// Builds the embedder described by `config`, falling back to [`StubEmbedder`]
/// when no model path is set.
pub fn load_embedder(config: &EmbedderConfig) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    config.validate()?;

    if config.is_stub() {
        warn!("No embedding model configured, running embedder in STUB mode");
        return Ok(Arc::new(StubEmbedder::new(config.stub_dim)));
    }

    Ok(Arc::new(BertEmbedder::load(config)?))
}

pub(crate) fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
