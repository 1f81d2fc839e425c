//! Entente - text-understanding core for a French FAQ chatbot.
//!
//! Given a user utterance, the pipeline extracts salient keywords
//! (lexical filtering + TF-IDF weighting + embedding-similarity
//! refinement), resolves the caller's intent (dictionary or statistical
//! strategy), extracts named entities, and can build a weighted
//! relationship graph over a keyword set with a per-request median
//! threshold. Unrecognized utterances feed an append-only corpus for
//! later labeling and retraining.

pub mod auth;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod handlers;
pub mod intent;
pub mod keywords;
pub mod language;
pub mod normalize;
pub mod stopwords;
pub mod training;
pub mod validation;

// Re-export dependencies so tests and downstream tooling use the same
// versions.
pub use chrono;
pub use parking_lot;
pub use uuid;
