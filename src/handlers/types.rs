//! Request and response bodies for the HTTP operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::AnalysisOutcome;
use crate::graph::RelationshipEdge;
use crate::language::EntitySpan;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub response: String,
    pub keywords: Vec<String>,
    pub intent: String,
    pub context: String,
    pub entities: Vec<EntitySpan>,
    pub explanation: String,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        Self {
            response: outcome.response,
            keywords: outcome.keywords,
            intent: outcome.intent,
            context: outcome.context,
            entities: outcome.entities,
            explanation: outcome.explanation,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtractKeywordsRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RelationshipsRequest {
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RelationshipsResponse {
    pub relationships: Vec<RelationshipEdge>,
}

#[derive(Debug, Deserialize)]
pub struct GlossaryRequest {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Serialize)]
pub struct GlossaryResponse {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateIntentRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub intent: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TrainStartedResponse {
    pub job_id: Uuid,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub corpus_entries: usize,
    pub unknown_entries: usize,
    pub intents: usize,
    pub classifier_ready: bool,
}
