//! Embedding backend behind a trait seam.
//!
//! The `Embedder` trait is the boundary to the underlying model's dense
//! vector capability. The default backend is a deterministic hash-based
//! embedder: each lemma contributes a fixed pseudo-random signature
//! vector, and a text embeds as the normalized sum of its token
//! signatures. Identical inputs always produce identical vectors, and
//! token overlap translates into cosine similarity.

use anyhow::Result;

use super::lemma::Lemmatizer;
use super::tokenize::{is_punctuation, tokenize};

/// Trait for embedding generation
pub trait Embedder: Send + Sync {
    /// Generate embedding for text
    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    /// Get embedding dimension
    fn dimension(&self) -> usize;
}

/// Compute cosine similarity between two vectors.
///
/// Dimension mismatches and zero vectors yield 0.0 rather than an error:
/// degenerate inputs must never raise a division error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let norm_a = norm_a.sqrt();
    let norm_b = norm_b.sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Deterministic hash-based embedder.
pub struct HashEmbedder {
    dimension: usize,
    lemmatizer: Lemmatizer,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// splitmix64 - a small, well-distributed deterministic PRNG step.
    fn splitmix64(state: &mut u64) -> u64 {
        *state = state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = *state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    fn seed_for(token: &str) -> u64 {
        // FNV-1a over the token bytes; stable across platforms and runs.
        let mut hash: u64 = 0xcbf29ce484222325;
        for byte in token.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x100000001b3);
        }
        hash
    }

    /// Add one token's signature into the accumulator.
    fn add_token(&self, token: &str, accumulator: &mut [f32]) {
        let mut state = Self::seed_for(token);

        // 16 signed contributions per token keeps distinct tokens close
        // to orthogonal at dimension 256 while staying cheap.
        for _ in 0..16 {
            let value = Self::splitmix64(&mut state);
            let index = (value as usize) % self.dimension;
            let sign = if value & (1 << 63) == 0 { 1.0 } else { -1.0 };
            accumulator[index] += sign;
        }
    }
}

impl Embedder for HashEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut embedding = vec![0.0f32; self.dimension];

        for token in tokenize(text) {
            if is_punctuation(&token) {
                continue;
            }
            let lemma = self.lemmatizer.lemma(&token);
            self.add_token(&lemma, &mut embedding);
        }

        // Normalize so document length does not dominate similarity.
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in embedding.iter_mut() {
                *value /= norm;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
