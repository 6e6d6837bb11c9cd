use std::collections::HashSet;

use crate::constants::NEUTRAL_SEMANTIC_SCORE;

use super::TextSimilarity;
use super::error::SimilarityError;

/// Jaccard similarity of lower-cased, whitespace-delimited word sets.
///
/// Punctuation stays attached to words, so `"clear."` and `"clear"` are different tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSimilarity;

impl LexicalSimilarity {
    pub fn new() -> Self {
        Self
    }
}

impl TextSimilarity for LexicalSimilarity {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn similarity(&self, text: &str, reference: &str) -> Result<f64, SimilarityError> {
        Ok(jaccard(text, reference))
    }
}

/// `|A ∩ B| / |A ∪ B|` over token sets; [`NEUTRAL_SEMANTIC_SCORE`] if either set is empty.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let a_tokens: HashSet<&str> = a_lower.split_whitespace().collect();
    let b_tokens: HashSet<&str> = b_lower.split_whitespace().collect();

    if a_tokens.is_empty() || b_tokens.is_empty() {
        return NEUTRAL_SEMANTIC_SCORE;
    }

    let intersection = a_tokens.intersection(&b_tokens).count();
    let union = a_tokens.union(&b_tokens).count();

    intersection as f64 / union as f64
}
