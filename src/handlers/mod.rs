//! HTTP layer: request/response types, per-domain handlers and the
//! router.

pub mod admin;
pub mod analyze;
pub mod glossary;
pub mod graph;
pub mod health;
pub mod router;
pub mod types;

pub use router::{build_router, AppState};
