//! Language model seam.
//!
//! The analysis pipeline consumes tokenization, lemmatization, POS
//! tagging, named-entity recognition and dense embeddings as capabilities.
//! This module bundles rule-based implementations of each behind one
//! `LanguageModel` facade so the rest of the crate never depends on how
//! they are produced. Deterministic for a fixed build.

pub mod embedding;
pub mod lemma;
pub mod ner;
pub mod pos;
pub mod tokenize;

use std::sync::Arc;

use anyhow::Result;

use crate::stopwords::StopwordPolicy;

pub use embedding::{cosine_similarity, Embedder, HashEmbedder};
pub use lemma::Lemmatizer;
pub use ner::{EntityLabel, EntityRecognizer, EntitySpan};
pub use pos::PosTag;
pub use tokenize::{is_punctuation, tokenize};

/// One analyzed token of a document.
#[derive(Debug, Clone)]
pub struct AnalyzedToken {
    pub surface: String,
    pub lemma: String,
    pub pos: PosTag,
    pub is_stop: bool,
}

/// Per-request analysis result: immutable once produced, owned by the
/// request.
#[derive(Debug, Clone)]
pub struct Document {
    pub tokens: Vec<AnalyzedToken>,
    pub entities: Vec<EntitySpan>,
    pub embedding: Vec<f32>,
}

impl Document {
    /// Lemmas of non-punctuation tokens, in order.
    pub fn content_lemmas(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|t| t.pos != PosTag::Punct)
            .map(|t| t.lemma.as_str())
            .collect()
    }
}

/// Facade over the language capabilities consumed by the pipeline.
pub struct LanguageModel {
    stopwords: Arc<StopwordPolicy>,
    lemmatizer: Lemmatizer,
    recognizer: EntityRecognizer,
    embedder: Arc<dyn Embedder>,
}

impl LanguageModel {
    pub fn new(stopwords: Arc<StopwordPolicy>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            stopwords,
            lemmatizer: Lemmatizer::new(),
            recognizer: EntityRecognizer::new(),
            embedder,
        }
    }

    /// Tokenize and annotate a text with lemma, POS tag and stopword flag.
    pub fn tag(&self, text: &str) -> Vec<AnalyzedToken> {
        let tokens = tokenize(text);
        tokens
            .iter()
            .enumerate()
            .map(|(position, surface)| AnalyzedToken {
                lemma: self.lemmatizer.lemma(surface),
                pos: pos::tag_token(surface, position, &self.stopwords),
                is_stop: self.stopwords.contains(surface),
                surface: surface.clone(),
            })
            .collect()
    }

    /// Full per-request analysis: tagged tokens, entities, one document
    /// embedding.
    pub fn analyze(&self, text: &str) -> Result<Document> {
        Ok(Document {
            tokens: self.tag(text),
            entities: self.recognizer.extract(text),
            embedding: self.embedder.encode(text)?,
        })
    }

    /// Named entities of a raw text, in order of appearance.
    pub fn entities(&self, text: &str) -> Vec<EntitySpan> {
        self.recognizer.extract(text)
    }

    /// Embed an arbitrary text.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embedder.encode(text)
    }

    /// Lemma of a single surface form.
    pub fn lemma(&self, surface: &str) -> String {
        self.lemmatizer.lemma(surface)
    }

    pub fn embedder(&self) -> Arc<dyn Embedder> {
        self.embedder.clone()
    }

    pub fn stopwords(&self) -> &StopwordPolicy {
        &self.stopwords
    }
}
