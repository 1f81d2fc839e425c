//! Health endpoint.

use axum::{extract::State, response::Json};

use super::router::AppState;
use super::types::HealthResponse;

/// GET /health - service status and store counters.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        corpus_entries: state.corpus().len(),
        unknown_entries: state.corpus().unknown().len(),
        intents: state.catalog().intents.len(),
        classifier_ready: state.classifier_ready(),
    })
}
