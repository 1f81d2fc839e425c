//! Administration handlers: corpus relabeling, classifier training and
//! the authenticated catalog reload.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
};
use tracing::info;
use uuid::Uuid;

use super::router::AppState;
use super::types::{MessageResponse, TrainStartedResponse, UpdateIntentRequest};
use crate::auth;
use crate::errors::AppError;
use crate::training::TrainJob;
use crate::validation;

/// POST /update-intent - relabel a recorded utterance.
pub async fn update_intent(
    State(state): State<AppState>,
    Json(req): Json<UpdateIntentRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let text = validation::require_non_empty(&req.text, "text")?;
    let intent = validation::require_non_empty(&req.intent, "intent")?;

    state.update_intent_label(text, intent)?;
    Ok(Json(MessageResponse {
        message: "Intention mise à jour avec succès.".to_string(),
    }))
}

/// POST /train - queue a background training job.
///
/// Schema validation happens before the job is queued, so a malformed
/// training set fails fast; the training itself runs off the request
/// path and publishes the model atomically when done.
pub async fn train(
    State(state): State<AppState>,
) -> Result<Json<TrainStartedResponse>, AppError> {
    let job = state.start_training()?;
    info!("Training job {} queued", job.job_id);

    Ok(Json(TrainStartedResponse {
        job_id: job.job_id,
        status: "queued".to_string(),
    }))
}

/// GET /train/{job_id} - training job status, with the summary once the
/// job completed.
pub async fn train_status(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<TrainJob>, AppError> {
    let job = state.jobs().get(job_id)?;
    Ok(Json(job))
}

/// POST /reload-data - reload catalog and glossary from disk.
///
/// Guarded by the static admin credential in the Authorization header.
pub async fn reload_data(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    let provided = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok());
    auth::verify_admin_key(provided, &state.config().admin_key)?;

    state.reload_data()?;
    Ok(Json(MessageResponse {
        message: "Données rechargées avec succès.".to_string(),
    }))
}
