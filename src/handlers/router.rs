//! Router configuration - centralized route definitions.
//!
//! Routes mirror the operation table: the analysis pipeline, the graph
//! and glossary lookups, and the administration endpoints. Only the
//! catalog reload is credential-guarded; the check lives inside its
//! handler so the route table stays flat.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::{admin, analyze, glossary, graph, health};
use crate::engine::Engine;

/// Application state type alias
pub type AppState = Arc<Engine>;

/// Build the complete router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Analysis pipeline
        .route("/analyze_context", post(analyze::analyze_context))
        .route("/extract_keywords", post(analyze::extract_keywords))
        .route(
            "/calculate_relationships",
            post(graph::calculate_relationships),
        )
        // Glossary & precomputed documents
        .route("/glossary", post(glossary::glossary_lookup))
        .route("/explore_clusters", get(glossary::explore_clusters))
        .route("/statistics", get(glossary::statistics))
        // Administration
        .route("/update-intent", post(admin::update_intent))
        .route("/train", post(admin::train))
        .route("/train/{job_id}", get(admin::train_status))
        .route("/reload-data", post(admin::reload_data))
        // Health
        .route("/health", get(health::health))
        .with_state(state)
}
