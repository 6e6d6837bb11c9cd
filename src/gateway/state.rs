use std::sync::Arc;
use std::time::Duration;

use crate::constants::DEFAULT_SCORE_TIMEOUT_MS;
use crate::rubric::RubricProvider;
use crate::scoring::RubricScorer;

#[derive(Debug, Clone)]
pub struct HandlerState {
    pub rubrics: Arc<RubricProvider>,

    pub scorer: Arc<RubricScorer>,

    pub score_timeout: Duration,
}

impl HandlerState {
    pub fn new(rubrics: Arc<RubricProvider>, scorer: Arc<RubricScorer>) -> Self {
        Self {
            rubrics,
            scorer,
            score_timeout: Duration::from_millis(DEFAULT_SCORE_TIMEOUT_MS),
        }
    }

    pub fn with_score_timeout(mut self, score_timeout: Duration) -> Self {
        self.score_timeout = score_timeout;
        self
    }
}
