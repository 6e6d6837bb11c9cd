use std::sync::Arc;

use tracing::{debug, info};

use crate::constants::{BREAKDOWN_DECIMALS, NEUTRAL_SEMANTIC_SCORE, SCORE_DECIMALS};
use crate::rubric::{Criterion, Rubric};
use crate::similarity::{LexicalSimilarity, TextSimilarity};

use super::error::ScoringError;
use super::types::{CriterionResult, ScoreBreakdown, ScoreReport, SubScores};

/// Scores transcripts against rubrics.
///
/// Holds no mutable state; one instance can serve concurrent callers.
#[derive(Clone)]
pub struct RubricScorer {
    similarity: Arc<dyn TextSimilarity>,
}

impl std::fmt::Debug for RubricScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RubricScorer")
            .field("similarity", &self.similarity.name())
            .finish()
    }
}

impl Default for RubricScorer {
    fn default() -> Self {
        Self::lexical()
    }
}

impl RubricScorer {
    pub fn new(similarity: Arc<dyn TextSimilarity>) -> Self {
        Self { similarity }
    }

    /// Scorer using [`LexicalSimilarity`] for the semantic sub-score.
    pub fn lexical() -> Self {
        Self::new(Arc::new(LexicalSimilarity::new()))
    }

    pub fn similarity(&self) -> &dyn TextSimilarity {
        self.similarity.as_ref()
    }

    /// Scores `transcript` against every criterion of `rubric`.
    ///
    /// A blank transcript yields an empty report with an overall score of `0.0`.
    pub fn score(&self, transcript: &str, rubric: &Rubric) -> Result<ScoreReport, ScoringError> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            debug!(rubric_id = %rubric.id, "Blank transcript, returning empty report");
            return Ok(ScoreReport::empty(rubric.id.clone()));
        }

        let semantic_scores = self.semantic_scores(transcript, rubric)?;
        let words = word_count(transcript);

        // Weights are scaled by the largest one; the sums stay finite for any finite weights.
        let max_weight = rubric.max_weight();
        let mut results = Vec::with_capacity(rubric.len());
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for (criterion, semantic) in rubric.criteria.iter().zip(semantic_scores) {
            let sub = SubScores {
                keyword: keyword_score(transcript, &criterion.keywords),
                semantic,
                length: length_score(words, criterion.min_words),
            };
            let combined_100 = sub.combined() * 100.0;

            debug!(
                criterion = %criterion.id,
                keyword = sub.keyword,
                semantic = sub.semantic,
                length = sub.length,
                combined = combined_100,
                "Scored criterion"
            );

            if max_weight > 0.0 {
                let scaled = criterion.weight / max_weight;
                weighted_sum += combined_100 * scaled;
                total_weight += scaled;
            }
            results.push(criterion_result(criterion, &sub, combined_100));
        }

        let overall = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        };

        info!(
            rubric_id = %rubric.id,
            criteria = results.len(),
            word_count = words,
            overall = overall,
            similarity = self.similarity.name(),
            "Transcript scored"
        );

        Ok(ScoreReport {
            rubric_id: rubric.id.clone(),
            overall_score: round_to(overall, SCORE_DECIMALS),
            criteria_scores: results,
        })
    }

    /// One semantic score per criterion, with a single similarity call for the
    /// non-blank descriptions.
    fn semantic_scores(&self, transcript: &str, rubric: &Rubric) -> Result<Vec<f64>, ScoringError> {
        let references: Vec<&str> = rubric
            .criteria
            .iter()
            .map(|c| c.description.as_str())
            .filter(|d| !d.trim().is_empty())
            .collect();

        let computed = self.similarity.similarity_batch(transcript, &references)?;
        if computed.len() != references.len() {
            return Err(ScoringError::SimilarityCountMismatch {
                expected: references.len(),
                actual: computed.len(),
            });
        }

        let mut computed = computed.into_iter();
        Ok(rubric
            .criteria
            .iter()
            .map(|c| {
                if c.description.trim().is_empty() {
                    NEUTRAL_SEMANTIC_SCORE
                } else {
                    computed
                        .next()
                        .map_or(NEUTRAL_SEMANTIC_SCORE, |s| s.clamp(0.0, 1.0))
                }
            })
            .collect())
    }
}

fn criterion_result(criterion: &Criterion, sub: &SubScores, combined_100: f64) -> CriterionResult {
    CriterionResult {
        id: criterion.id.clone(),
        name: criterion.name.clone(),
        score: round_to(combined_100, SCORE_DECIMALS),
        breakdown: ScoreBreakdown {
            keyword_score: round_to(sub.keyword * 100.0, BREAKDOWN_DECIMALS),
            semantic_score: round_to(sub.semantic * 100.0, BREAKDOWN_DECIMALS),
            length_score: round_to(sub.length * 100.0, BREAKDOWN_DECIMALS),
            weight: criterion.weight,
        },
    }
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Fraction of `keywords` occurring in `transcript`, ignoring case.
///
/// An empty keyword list scores `0.0`.
pub fn keyword_score(transcript: &str, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let transcript_lower = transcript.to_lowercase();

    let hits = keywords
        .iter()
        .filter(|kw| transcript_lower.contains(kw.to_lowercase().as_str()))
        .count();

    hits as f64 / keywords.len() as f64
}

/// `1.0` once `word_count` reaches `min_words`, proportional below it.
pub fn length_score(word_count: usize, min_words: usize) -> f64 {
    if min_words == 0 {
        return 1.0;
    }

    (word_count as f64 / min_words as f64).min(1.0)
}

/// Rounds to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
