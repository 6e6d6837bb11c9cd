use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::constants::DEFAULT_RUBRIC_ID;

use super::error::RubricError;
use super::model::Rubric;
use super::store::{MemoryRubricStore, RubricStore};

/// Loads rubric files once and serves them from a [`RubricStore`].
///
/// Ids other than `"default"` resolve to `<rubric_dir>/<id>.json`.
pub struct RubricProvider {
    store: Arc<dyn RubricStore>,
    default_path: PathBuf,
    rubric_dir: Option<PathBuf>,
}

impl std::fmt::Debug for RubricProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RubricProvider")
            .field("default_path", &self.default_path)
            .field("rubric_dir", &self.rubric_dir)
            .finish()
    }
}

impl RubricProvider {
    /// Creates a provider backed by a fresh [`MemoryRubricStore`].
    pub fn new<P: Into<PathBuf>>(default_path: P) -> Self {
        Self::with_store(default_path, Arc::new(MemoryRubricStore::new()))
    }

    /// Creates a provider backed by a caller-supplied store.
    pub fn with_store<P: Into<PathBuf>>(default_path: P, store: Arc<dyn RubricStore>) -> Self {
        Self {
            store,
            default_path: default_path.into(),
            rubric_dir: None,
        }
    }

    /// Enables lookup of non-default rubric ids in `dir`.
    pub fn with_rubric_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.rubric_dir = Some(dir.into());
        self
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    pub fn rubric_dir(&self) -> Option<&Path> {
        self.rubric_dir.as_deref()
    }

    /// Returns the rubric stored at `path`, reading and parsing it on first use.
    pub fn load(&self, path: &Path) -> Result<Arc<Rubric>, RubricError> {
        if let Some(rubric) = self.store.get(path) {
            debug!(path = %path.display(), "Rubric cache hit");
            return Ok(rubric);
        }

        let rubric = Arc::new(read_rubric(path)?);

        info!(
            path = %path.display(),
            rubric_id = %rubric.id,
            criteria = rubric.len(),
            "Rubric loaded"
        );

        self.store.insert(path.to_path_buf(), Arc::clone(&rubric));
        Ok(rubric)
    }

    /// Resolves a request-level rubric id to a loaded rubric.
    pub fn resolve(&self, rubric_id: &str) -> Result<Arc<Rubric>, RubricError> {
        let rubric_id = rubric_id.trim();
        if rubric_id.is_empty() || rubric_id == DEFAULT_RUBRIC_ID {
            return self.load(&self.default_path);
        }

        validate_rubric_id(rubric_id)?;

        let Some(dir) = &self.rubric_dir else {
            return Err(RubricError::UnknownRubric {
                id: rubric_id.to_string(),
            });
        };

        let path = dir.join(format!("{rubric_id}.json"));
        match self.load(&path) {
            Err(RubricError::NotFound { .. }) => Err(RubricError::UnknownRubric {
                id: rubric_id.to_string(),
            }),
            other => other,
        }
    }
}

fn read_rubric(path: &Path) -> Result<Rubric, RubricError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            RubricError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            RubricError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    Rubric::from_json_str(&content, &path.display().to_string())
}

fn validate_rubric_id(id: &str) -> Result<(), RubricError> {
    let valid = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(RubricError::InvalidRubricId { id: id.to_string() })
    }
}
