//! Input validation for request payloads.

use crate::errors::{AppError, Result};

/// Require a non-empty, non-whitespace field. Returns the trimmed value.
pub fn require_non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::MissingInput {
            field: field.to_string(),
        });
    }
    Ok(trimmed)
}
