use std::time::Duration;

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::SCORER_STATUS_HEADER;
use crate::rubric::RubricError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("rubric error: {0}")]
    Rubric(#[from] RubricError),

    #[error("scoring failed: {0}")]
    ScoringFailed(#[from] ScoringError),

    #[error("scoring timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::Rubric(err) if err.is_client_error() => match err {
                RubricError::InvalidRubricId { .. } => {
                    (StatusCode::BAD_REQUEST, "invalid_rubric_id")
                }
                _ => (StatusCode::NOT_FOUND, "unknown_rubric"),
            },
            GatewayError::Rubric(_) => (StatusCode::INTERNAL_SERVER_ERROR, "rubric_error"),
            GatewayError::ScoringFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "scoring_error"),
            GatewayError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, scorer_status) = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            SCORER_STATUS_HEADER,
            HeaderValue::from_static(scorer_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
