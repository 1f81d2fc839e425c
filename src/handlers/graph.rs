//! Relationship graph handler.

use axum::{extract::State, response::Json};

use super::router::AppState;
use super::types::{RelationshipsRequest, RelationshipsResponse};
use crate::errors::AppError;

/// POST /calculate_relationships - pairwise similarity graph over an
/// already-extracted keyword list. Fewer than two keywords yields an
/// empty list, not an error.
pub async fn calculate_relationships(
    State(state): State<AppState>,
    Json(req): Json<RelationshipsRequest>,
) -> Result<Json<RelationshipsResponse>, AppError> {
    let relationships = state.relationships(&req.keywords)?;
    Ok(Json(RelationshipsResponse { relationships }))
}
