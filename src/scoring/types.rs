use serde::{Deserialize, Serialize};

use crate::constants::{
    KEYWORD_WEIGHT, LENGTH_WEIGHT, SEMANTIC_WEIGHT, SMOOTHING_LINEAR, SMOOTHING_QUADRATIC,
};

/// Raw sub-scores of one criterion, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    /// Fraction of keywords found.
    pub keyword: f64,
    /// Similarity to the criterion description.
    pub semantic: f64,
    /// Length adequacy.
    pub length: f64,
}

impl SubScores {
    /// Weighted, smoothed combination in `[0, 1]`.
    pub fn combined(&self) -> f64 {
        let linear = KEYWORD_WEIGHT * self.keyword
            + SEMANTIC_WEIGHT * self.semantic
            + LENGTH_WEIGHT * self.length;
        smooth(linear)
    }
}

/// Monotonic reward curve on `[0, 1]`: compresses low scores, stretches high ones.
pub fn smooth(x: f64) -> f64 {
    SMOOTHING_LINEAR * x + SMOOTHING_QUADRATIC * x * x
}

/// Per-criterion breakdown, scaled to `[0, 100]` and rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_score: f64,
    pub semantic_score: f64,
    pub length_score: f64,
    /// The criterion's weight, unscaled.
    pub weight: f64,
}

/// Score of one rubric criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    /// Criterion id.
    pub id: String,
    /// Criterion name.
    pub name: String,
    /// Combined score in `[0, 100]`, rounded to two decimals.
    pub score: f64,
    /// Sub-score breakdown.
    pub breakdown: ScoreBreakdown,
}

/// Outcome of scoring a transcript against a rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Id of the rubric used.
    pub rubric_id: String,
    /// Weight-normalized mean of criterion scores, rounded to two decimals.
    pub overall_score: f64,
    /// One entry per criterion, in rubric order. Empty for blank transcripts.
    pub criteria_scores: Vec<CriterionResult>,
}

impl ScoreReport {
    /// Report for a transcript with no content.
    pub fn empty(rubric_id: impl Into<String>) -> Self {
        Self {
            rubric_id: rubric_id.into(),
            overall_score: 0.0,
            criteria_scores: Vec::new(),
        }
    }

    /// Returns the result for criterion `id`, if present.
    pub fn criterion(&self, id: &str) -> Option<&CriterionResult> {
        self.criteria_scores.iter().find(|c| c.id == id)
    }
}
