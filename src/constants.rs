//! Cross-cutting, shared constants.
//!
//! The combination weights and smoothing coefficients are part of the scoring contract:
//! reports produced by different deployments are only comparable when these match.

/// Weight of the keyword sub-score in the linear combination.
pub const KEYWORD_WEIGHT: f64 = 0.25;
/// Weight of the semantic sub-score in the linear combination.
pub const SEMANTIC_WEIGHT: f64 = 0.55;
/// Weight of the length sub-score in the linear combination.
pub const LENGTH_WEIGHT: f64 = 0.20;

/// Linear term of the smoothing curve `a*x + b*x^2`.
pub const SMOOTHING_LINEAR: f64 = 0.6;
/// Quadratic term of the smoothing curve `a*x + b*x^2`.
pub const SMOOTHING_QUADRATIC: f64 = 0.4;

/// Semantic score used when there is nothing meaningful to compare against.
pub const NEUTRAL_SEMANTIC_SCORE: f64 = 0.5;

/// Decimal places kept for per-criterion and overall scores.
pub const SCORE_DECIMALS: i32 = 2;
/// Decimal places kept for breakdown sub-scores.
pub const BREAKDOWN_DECIMALS: i32 = 1;

/// Identifier used when a request or rubric document does not name one.
pub const DEFAULT_RUBRIC_ID: &str = "default";

/// Rubric file used when `SCORER_RUBRIC_PATH` is not set.
pub const DEFAULT_RUBRIC_PATH: &str = "rubric_config.json";

/// Criterion weight used when a rubric document omits it.
pub const DEFAULT_CRITERION_WEIGHT: f64 = 1.0;

/// Default embedding dimension of the stub embedder (matches MiniLM-class models).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the BERT embedder per text.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Default per-request scoring timeout in milliseconds.
pub const DEFAULT_SCORE_TIMEOUT_MS: u64 = 10_000;

/// Response header carrying a short machine-readable outcome.
pub const SCORER_STATUS_HEADER: &str = "x-scorer-status";
/// Header value for a healthy `/health` response.
pub const SCORER_STATUS_HEALTHY: &str = "healthy";
/// Header value for a successful `/score` response.
pub const SCORER_STATUS_SCORED: &str = "scored";
/// Header value for a successful `/rubrics/{id}` response.
pub const SCORER_STATUS_FOUND: &str = "found";
