//! Transcript scorer library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`Rubric`], [`Criterion`], [`RubricProvider`] - Rubric model and loading
//! - [`RubricScorer`], [`ScoreReport`] - Scoring engine and its output
//!
//! ## Similarity & Embedding
//! - [`TextSimilarity`], [`SimilarityStrategy`] - Pluggable semantic sub-score
//! - [`Embedder`], [`BertEmbedder`], [`StubEmbedder`] - Sentence embeddings
//!
//! ## HTTP
//! - [`create_router_with_state`], [`HandlerState`] - Axum gateway
//!
//! ## Test/Mock Support
//! [`MockEmbedder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod rubric;
pub mod scoring;
pub mod similarity;

pub use config::{Config, ConfigError};
pub use embedding::{
    BertEmbedder, Embedder, EmbedderConfig, EmbeddingError, StubEmbedder, load_embedder,
};
pub use gateway::{GatewayError, HandlerState, ScoreRequest, create_router_with_state};
pub use rubric::{Criterion, MemoryRubricStore, Rubric, RubricError, RubricProvider, RubricStore};
pub use scoring::{
    CriterionResult, RubricScorer, ScoreBreakdown, ScoreReport, ScoringError, SubScores,
};
pub use similarity::{
    EmbeddingSimilarity, LexicalSimilarity, SimilarityError, SimilarityStrategy, TextSimilarity,
    build_similarity,
};

#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
