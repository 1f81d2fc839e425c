//! Relationship graphing over a keyword list.
//!
//! Every unordered keyword pair gets a cosine similarity between the two
//! keywords' own embeddings. The cutoff is recomputed per request as the
//! median of the pairwise similarities: relevance is relative to how
//! semantically tight the input set happens to be, so a fixed threshold
//! would under- or over-connect. Pairs strictly above the median survive.

use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::language::{cosine_similarity, Embedder};

/// A weighted, undirected relationship between two keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub source: String,
    pub target: String,
    pub weight: f32,
}

/// Median of a similarity list; the middle-pair average for even counts.
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }

    let mut sorted: Vec<OrderedFloat<f32>> = values.iter().copied().map(OrderedFloat).collect();
    sorted.sort();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid].0)
    } else {
        Some((sorted[mid - 1].0 + sorted[mid].0) / 2.0)
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Pairwise relationship grapher with a dynamically computed threshold.
pub struct RelationshipGrapher {
    embedder: Arc<dyn Embedder>,
    default_threshold: f32,
}

impl RelationshipGrapher {
    pub fn new(embedder: Arc<dyn Embedder>, default_threshold: f32) -> Self {
        Self {
            embedder,
            default_threshold,
        }
    }

    /// Build the relationship list for a keyword set.
    ///
    /// Fewer than two keywords is an empty graph, not an error. The graph
    /// is simple: no self-pairs, each unordered pair at most once, and
    /// edge (i, j) always has i before j in the input order.
    pub fn relationships(&self, keywords: &[String]) -> Result<Vec<RelationshipEdge>> {
        if keywords.len() < 2 {
            return Ok(Vec::new());
        }

        let embeddings: Vec<Vec<f32>> = keywords
            .iter()
            .map(|kw| self.embedder.encode(kw))
            .collect::<anyhow::Result<_>>()?;

        let mut similarities = Vec::new();
        for i in 0..keywords.len() {
            for j in (i + 1)..keywords.len() {
                similarities.push(cosine_similarity(&embeddings[i], &embeddings[j]));
            }
        }

        let threshold = median(&similarities).unwrap_or(self.default_threshold);

        let mut edges = Vec::new();
        let mut pair = 0;
        for i in 0..keywords.len() {
            for j in (i + 1)..keywords.len() {
                let similarity = similarities[pair];
                pair += 1;
                if similarity > threshold {
                    edges.push(RelationshipEdge {
                        source: keywords[i].clone(),
                        target: keywords[j].clone(),
                        weight: round2(similarity),
                    });
                }
            }
        }

        Ok(edges)
    }
}
