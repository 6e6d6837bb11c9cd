//! HTTP gateway (Axum) exposing the scorer.
//!
//! Routes:
//! - `GET /health`: liveness check
//! - `POST /score`: score a transcript against a rubric
//! - `GET /rubrics/{rubric_id}`: return a rubric in its document format
//!
//! CORS is fully open.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Router,
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{ScoreRequest, rubric_handler, score_handler};
pub use state::HandlerState;

use crate::constants::SCORER_STATUS_HEALTHY;
use handler::make_response;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/score", post(score_handler))
        .route("/rubrics/{rubric_id}", get(rubric_handler))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    make_response(
        StatusCode::OK,
        SCORER_STATUS_HEALTHY,
        HealthResponse {
            status: "ok".to_string(),
        },
    )
}
