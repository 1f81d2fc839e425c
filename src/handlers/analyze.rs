//! Analysis pipeline handlers: full context analysis and standalone
//! keyword extraction.

use axum::{extract::State, response::Json};
use tracing::debug;

use super::router::AppState;
use super::types::{
    AnalyzeRequest, AnalyzeResponse, ExtractKeywordsRequest, KeywordsResponse,
};
use crate::errors::AppError;
use crate::validation;

/// POST /analyze_context - run the full pipeline on one utterance.
///
/// An empty message is not a transport error: it produces the designated
/// empty-analysis body with the unknown intent.
pub async fn analyze_context(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let outcome = state.analyze(&req.message)?;
    debug!(
        intent = %outcome.intent,
        keywords = outcome.keywords.len(),
        "analyze_context"
    );
    Ok(Json(outcome.into()))
}

/// POST /extract_keywords - keyword extraction only.
///
/// Unlike analyze_context, an empty text here is a missing-input error.
pub async fn extract_keywords(
    State(state): State<AppState>,
    Json(req): Json<ExtractKeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let text = validation::require_non_empty(&req.text, "text")?;

    let keywords = state.extract_keywords(text)?;
    Ok(Json(KeywordsResponse { keywords }))
}
