use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::constants::{
    DEFAULT_RUBRIC_ID, SCORER_STATUS_FOUND, SCORER_STATUS_HEADER, SCORER_STATUS_SCORED,
};
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::scoring::ScoreReport;

/// Body of `POST /score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub transcript: String,
    #[serde(default)]
    pub rubric_id: Option<String>,
}

impl ScoreRequest {
    /// Requested rubric id, `"default"` when absent.
    pub fn rubric_id(&self) -> &str {
        self.rubric_id.as_deref().unwrap_or(DEFAULT_RUBRIC_ID)
    }
}

#[instrument(skip(state, body), fields(rubric_id = tracing::field::Empty))]
pub async fn score_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: ScoreRequest = serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let rubric_id = request.rubric_id().to_string();
    tracing::Span::current().record("rubric_id", tracing::field::display(&rubric_id));

    debug!(
        transcript_len = request.transcript.len(),
        "Processing score request"
    );

    let rubrics = Arc::clone(&state.rubrics);
    let scorer = Arc::clone(&state.scorer);
    let task = tokio::task::spawn_blocking(move || -> Result<ScoreReport, GatewayError> {
        let rubric = rubrics.resolve(&rubric_id)?;
        Ok(scorer.score(&request.transcript, &rubric)?)
    });

    let report = match tokio::time::timeout(state.score_timeout, task).await {
        Ok(joined) => joined
            .map_err(|e| GatewayError::InternalError(format!("Scoring task failed: {}", e)))??,
        Err(_) => {
            warn!(
                timeout_ms = state.score_timeout.as_millis() as u64,
                "Scoring exceeded timeout"
            );
            return Err(GatewayError::Timeout(state.score_timeout));
        }
    };

    info!(
        overall_score = report.overall_score,
        criteria = report.criteria_scores.len(),
        "Score request complete"
    );

    Ok(make_response(StatusCode::OK, SCORER_STATUS_SCORED, report))
}

#[instrument(skip(state))]
pub async fn rubric_handler(
    State(state): State<HandlerState>,
    Path(rubric_id): Path<String>,
) -> Result<Response, GatewayError> {
    let rubrics = Arc::clone(&state.rubrics);
    let rubric = tokio::task::spawn_blocking(move || rubrics.resolve(&rubric_id))
        .await
        .map_err(|e| GatewayError::InternalError(format!("Rubric lookup failed: {}", e)))??;

    Ok(make_response(
        StatusCode::OK,
        SCORER_STATUS_FOUND,
        rubric.as_ref().clone(),
    ))
}

pub(crate) fn make_response<T: Serialize>(
    status: StatusCode,
    scorer_status: &'static str,
    body: T,
) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        SCORER_STATUS_HEADER,
        HeaderValue::from_static(scorer_status),
    );

    (status, headers, Json(body)).into_response()
}
