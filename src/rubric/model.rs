use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CRITERION_WEIGHT, DEFAULT_RUBRIC_ID};

use super::error::RubricError;

/// A single rubric criterion.
///
/// Serializes to the external document format (`id`, `name`, `description`, `weight`,
/// `keywords`, `min_words`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criterion {
    /// Unique id within the rubric.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Reference text for semantic comparison. May be empty.
    pub description: String,
    /// Contribution to the overall score. Always finite and `>= 0`.
    pub weight: f64,
    /// Phrases matched case-insensitively against the transcript.
    pub keywords: Vec<String>,
    /// Word count at which the length sub-score saturates. `0` disables the check.
    pub min_words: usize,
}

impl Criterion {
    /// Creates a criterion with default weight and no keywords, description or length floor.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            weight: DEFAULT_CRITERION_WEIGHT,
            keywords: Vec::new(),
            min_words: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the weight. Checked by [`Criterion::validate`] when the rubric is built.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    pub fn validate(&self) -> Result<(), RubricError> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(RubricError::InvalidWeight {
                id: self.id.clone(),
                weight: self.weight,
            });
        }

        Ok(())
    }
}

/// An immutable, validated rubric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rubric {
    /// Rubric identifier, echoed back in score reports.
    #[serde(rename = "rubric_id")]
    pub id: String,
    /// Criteria in document order.
    pub criteria: Vec<Criterion>,
}

impl Rubric {
    /// Creates a rubric, rejecting invalid weights and duplicate criterion ids.
    pub fn new(id: impl Into<String>, criteria: Vec<Criterion>) -> Result<Self, RubricError> {
        let mut seen = HashSet::with_capacity(criteria.len());
        for criterion in &criteria {
            criterion.validate()?;
            if !seen.insert(criterion.id.as_str()) {
                return Err(RubricError::DuplicateCriterion {
                    id: criterion.id.clone(),
                });
            }
        }

        Ok(Self {
            id: id.into(),
            criteria,
        })
    }

    /// Parses and validates a rubric document.
    ///
    /// `origin` names the source in parse errors (usually the file path).
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, RubricError> {
        let document: RubricDocument =
            serde_json::from_str(json).map_err(|source| RubricError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        Self::try_from(document)
    }

    /// Serializes the rubric back into its external document format.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Largest criterion weight, `0.0` for an empty rubric.
    pub fn max_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }
}

/// Wire shape of a rubric file before validation.
#[derive(Debug, Deserialize)]
pub(crate) struct RubricDocument {
    #[serde(default)]
    rubric_id: Option<String>,
    #[serde(default)]
    criteria: Vec<CriterionDocument>,
}

/// `id` and `name` are optional here so their absence surfaces as
/// [`RubricError::MissingCriterionField`] instead of a generic parse error.
#[derive(Debug, Deserialize)]
pub(crate) struct CriterionDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
    #[serde(default)]
    min_words: Option<usize>,
}

impl TryFrom<RubricDocument> for Rubric {
    type Error = RubricError;

    fn try_from(document: RubricDocument) -> Result<Self, Self::Error> {
        let mut criteria = Vec::with_capacity(document.criteria.len());

        for (index, raw) in document.criteria.into_iter().enumerate() {
            let id = raw.id.ok_or(RubricError::MissingCriterionField { index, field: "id" })?;
            let name = raw
                .name
                .ok_or(RubricError::MissingCriterionField { index, field: "name" })?;

            criteria.push(Criterion {
                id,
                name,
                description: raw.description.unwrap_or_default(),
                weight: raw.weight.unwrap_or(DEFAULT_CRITERION_WEIGHT),
                keywords: raw.keywords.unwrap_or_default(),
                min_words: raw.min_words.unwrap_or(0),
            });
        }

        let id = document
            .rubric_id
            .unwrap_or_else(|| DEFAULT_RUBRIC_ID.to_string());
        Self::new(id, criteria)
    }
}
