use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, validating or resolving rubrics.
#[derive(Debug, Error)]
pub enum RubricError {
    /// The rubric file does not exist.
    #[error("rubric file not found: {path}")]
    NotFound { path: PathBuf },

    /// The rubric file exists but could not be read.
    #[error("failed to read rubric file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rubric document is not well-formed JSON of the expected shape.
    #[error("failed to parse rubric {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// A criterion lacks one of the fields that cannot be defaulted (`id`, `name`).
    #[error("criterion #{index} is missing required field '{field}'")]
    MissingCriterionField { index: usize, field: &'static str },

    /// Two criteria share the same id.
    #[error("duplicate criterion id '{id}'")]
    DuplicateCriterion { id: String },

    /// A criterion weight is negative or not a finite number.
    #[error("criterion '{id}' has invalid weight {weight}: must be finite and >= 0")]
    InvalidWeight { id: String, weight: f64 },

    /// No rubric is registered under the requested id.
    #[error("unknown rubric '{id}'")]
    UnknownRubric { id: String },

    /// The requested id contains characters that cannot name a rubric file.
    #[error("invalid rubric id '{id}': only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidRubricId { id: String },
}

impl RubricError {
    /// Returns `true` for errors caused by the caller's choice of rubric id.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RubricError::UnknownRubric { .. } | RubricError::InvalidRubricId { .. }
        )
    }
}
