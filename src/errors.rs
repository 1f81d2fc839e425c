//! Structured error handling for the analysis service.
//!
//! Every error carries a machine-readable code and maps to an HTTP status,
//! so clients can distinguish validation problems from configuration or
//! storage failures without parsing message text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured error body returned to API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error types, categorized by how the caller should react.
#[derive(Debug)]
pub enum AppError {
    // Validation errors (400)
    MissingInput { field: String },
    TrainingSchema(String),

    // Lookup failures (404)
    NotFound(String),

    // Admin credential mismatch (403)
    Unauthorized,

    // Configuration errors (500) - raised at load/reload, never retried
    MalformedConfig { file: String, reason: String },

    // Internal errors (500)
    Storage(String),
    Internal(anyhow::Error),
}

impl AppError {
    /// Get error code for client identification
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "MISSING_INPUT",
            Self::TrainingSchema(_) => "TRAINING_SCHEMA",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::MalformedConfig { .. } => "MALFORMED_CONFIG",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingInput { .. } | Self::TrainingSchema(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::MalformedConfig { .. } | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get detailed error message
    pub fn message(&self) -> String {
        match self {
            Self::MissingInput { field } => format!("Missing required input: '{field}'"),
            Self::TrainingSchema(reason) => format!("Malformed training data: {reason}"),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::Unauthorized => "Invalid admin credential".to_string(),
            Self::MalformedConfig { file, reason } => {
                format!("Malformed configuration in {file}: {reason}")
            }
            Self::Storage(msg) => format!("Storage error: {msg}"),
            Self::Internal(err) => format!("Internal error: {err}"),
        }
    }

    /// Convert to structured error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.message(),
            details: None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = self.to_response();

        (status, Json(body)).into_response()
    }
}

/// Type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;
