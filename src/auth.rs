//! Admin credential check for the catalog reload operation.
//!
//! A direct comparison against one static secret. Deliberately no user
//! accounts or token rotation; the only hardening is a constant-time
//! comparison so the check does not leak matching prefixes.

use crate::errors::{AppError, Result};

/// Constant-time string comparison.
///
/// Leaks the length of the shorter string, which is acceptable for an
/// admin key whose length is not secret.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let mut result = (a.len() ^ b.len()) as u8;

    let min_len = std::cmp::min(a.len(), b.len());
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    for i in 0..min_len {
        result |= a_bytes[i] ^ b_bytes[i];
    }

    result == 0
}

/// Validate the provided credential against the configured admin key.
pub fn verify_admin_key(provided: Option<&str>, expected: &str) -> Result<()> {
    match provided {
        Some(key) if constant_time_compare(key, expected) => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}
