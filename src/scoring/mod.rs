//! Rubric scoring engine.
//!
//! Each criterion gets three sub-scores in `[0, 1]`:
//!
//! - **keyword**: fraction of the criterion's keywords found (case-insensitive substring)
//! - **semantic**: [`TextSimilarity`](crate::similarity::TextSimilarity) between the transcript
//!   and the criterion description, or `0.5` when the description is blank
//! - **length**: word count relative to the criterion's `min_words`, capped at `1.0`
//!
//! They are combined as `0.25*k + 0.55*s + 0.20*l`, passed through `0.6*x + 0.4*x²` and
//! scaled to `[0, 100]`. The overall score is the weight-normalized mean of the criterion
//! scores (or `0.0` when the weights sum to zero).

pub mod error;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use scorer::{RubricScorer, keyword_score, length_score, round_to, word_count};
pub use types::{CriterionResult, ScoreBreakdown, ScoreReport, SubScores, smooth};
