use std::path::{Path, PathBuf};
use std::sync::Arc;

use moka::sync::Cache;

use super::model::Rubric;

/// Backing map of a [`RubricProvider`](super::RubricProvider), keyed by file path.
///
/// Entries are never invalidated: a rubric stays cached for as long as the store lives.
pub trait RubricStore: Send + Sync {
    /// Returns the cached rubric for `path`, if any.
    fn get(&self, path: &Path) -> Option<Arc<Rubric>>;

    /// Caches `rubric` under `path`, replacing any previous entry.
    fn insert(&self, path: PathBuf, rubric: Arc<Rubric>);
}

/// Thread-safe in-memory store without eviction.
pub struct MemoryRubricStore {
    entries: Cache<PathBuf, Arc<Rubric>>,
}

impl MemoryRubricStore {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
        }
    }

    /// Returns the number of cached rubrics (eventually consistent).
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryRubricStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryRubricStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRubricStore")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl RubricStore for MemoryRubricStore {
    fn get(&self, path: &Path) -> Option<Arc<Rubric>> {
        self.entries.get(path)
    }

    fn insert(&self, path: PathBuf, rubric: Arc<Rubric>) {
        self.entries.insert(path, rubric);
    }
}
