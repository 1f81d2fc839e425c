//! Glossary lookups and the read-only precomputed documents.

use axum::{extract::State, response::Json};
use serde_json::Value;

use super::router::AppState;
use super::types::{GlossaryRequest, GlossaryResponse};
use crate::errors::AppError;
use crate::validation;

/// POST /glossary - exact-key term lookup.
pub async fn glossary_lookup(
    State(state): State<AppState>,
    Json(req): Json<GlossaryRequest>,
) -> Result<Json<GlossaryResponse>, AppError> {
    let term = validation::require_non_empty(&req.term, "term")?;

    let entry = state.glossary_lookup(term)?;
    Ok(Json(GlossaryResponse {
        term: entry.term,
        definition: entry.definition,
    }))
}

/// GET /explore_clusters - serve the precomputed cluster document.
pub async fn explore_clusters(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    match state.clusters()? {
        Some(document) => Ok(Json(document)),
        None => Err(AppError::NotFound("cluster document".to_string())),
    }
}

/// GET /statistics - serve the precomputed statistics document.
pub async fn statistics(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    match state.statistics()? {
        Some(document) => Ok(Json(document)),
        None => Err(AppError::NotFound("statistics document".to_string())),
    }
}
