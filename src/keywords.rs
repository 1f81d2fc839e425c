//! Hybrid keyword extraction.
//!
//! Candidates come from a lexical filter (open POS classes plus a forced
//! inclusion list), weights from a vocabulary-restricted TF-IDF model
//! fitted against the historical corpus, and a refinement pass from
//! embedding similarity between each candidate and the whole normalized
//! text. The two signals are combined half-and-half and thresholded.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;

use crate::language::{cosine_similarity, LanguageModel, PosTag};
use crate::normalize::TextNormalizer;
use crate::stopwords::fold;

/// TF-IDF weighting restricted to an explicit vocabulary.
///
/// Document frequency is computed over lemmatized corpus tokens so that
/// an inflected corpus utterance still supports its lemma. A vocabulary
/// term absent from every corpus document keeps weight 0 - statistical
/// support is required even for forced terms.
pub struct TfidfModel {
    vocabulary: Vec<String>,
    document_frequency: Vec<usize>,
    corpus_size: usize,
}

impl TfidfModel {
    /// Fit the model: one document-frequency count per vocabulary term.
    pub fn fit(vocabulary: Vec<String>, corpus: &[String], model: &LanguageModel) -> Self {
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for document in corpus {
            let mut seen = vec![false; vocabulary.len()];
            for token in model.tag(document) {
                if token.pos == PosTag::Punct {
                    continue;
                }
                if let Some(&i) = index.get(token.lemma.as_str()) {
                    if !seen[i] {
                        seen[i] = true;
                        document_frequency[i] += 1;
                    }
                }
            }
        }

        Self {
            vocabulary,
            document_frequency,
            corpus_size: corpus.len(),
        }
    }

    /// Score a document's lemmas against the fitted vocabulary.
    ///
    /// Returns one weight per vocabulary term: `tf * (ln((1+n)/(1+df)) + 1)`
    /// with the whole vector L2-normalized, or 0 when the term has no
    /// corpus support (df = 0) or does not occur in the document.
    pub fn transform(&self, document_lemmas: &[&str]) -> Vec<f32> {
        let mut weights = vec![0.0f32; self.vocabulary.len()];

        for (i, term) in self.vocabulary.iter().enumerate() {
            if self.document_frequency[i] == 0 {
                continue;
            }
            let tf = document_lemmas.iter().filter(|l| **l == term).count() as f32;
            if tf == 0.0 {
                continue;
            }
            let idf = ((1.0 + self.corpus_size as f32)
                / (1.0 + self.document_frequency[i] as f32))
                .ln()
                + 1.0;
            weights[i] = tf * idf;
        }

        let norm: f32 = weights.iter().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for w in weights.iter_mut() {
                *w /= norm;
            }
        }

        weights
    }
}

/// A scored keyword candidate.
#[derive(Debug, Clone)]
pub struct ScoredKeyword {
    pub lemma: String,
    pub pos: PosTag,
    pub tfidf: f32,
    pub similarity: f32,
    pub score: f32,
}

/// The hybrid keyword extractor.
pub struct KeywordExtractor {
    model: Arc<LanguageModel>,
    normalizer: TextNormalizer,
    forced_terms: Vec<String>,
    score_threshold: f32,
}

impl KeywordExtractor {
    pub fn new(
        model: Arc<LanguageModel>,
        normalizer: TextNormalizer,
        forced_terms: &[String],
        score_threshold: f32,
    ) -> Self {
        Self {
            model,
            normalizer,
            forced_terms: forced_terms.to_vec(),
            score_threshold,
        }
    }

    /// Extract ordered keyword strings, most relevant first. Always
    /// returns a (possibly empty) list - garbage in, empty out.
    pub fn extract(&self, text: &str, corpus: &[String]) -> Result<Vec<String>> {
        Ok(self
            .extract_scored(text, corpus)?
            .into_iter()
            .map(|k| k.lemma)
            .collect())
    }

    /// Extraction with per-keyword score breakdown.
    pub fn extract_scored(&self, text: &str, corpus: &[String]) -> Result<Vec<ScoredKeyword>> {
        let normalized = match self.normalizer.normalize(text) {
            Some(normalized) => normalized,
            None => return Ok(Vec::new()),
        };

        // Lexical filter: open POS classes, plus forced surfaces.
        let tagged = self.model.tag(&normalized);
        let mut candidates: Vec<(String, PosTag)> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for token in &tagged {
            let forced = self.forced_terms.iter().any(|t| fold(t) == fold(&token.surface));
            if !(token.pos.is_open_class() || forced) {
                continue;
            }
            if seen.insert(token.lemma.clone()) {
                candidates.push((token.lemma.clone(), token.pos));
            }
        }

        // Forced terms present in the raw text but lost during
        // normalization are re-injected: a deliberate override of the
        // POS filter for known high-value terms.
        let raw_folded = fold(text);
        for term in &self.forced_terms {
            if raw_folded.contains(&fold(term)) {
                let lemma = self.model.lemma(term);
                if seen.insert(lemma.clone()) {
                    candidates.push((lemma, PosTag::Noun));
                }
            }
        }

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        // Statistical weighting against the historical corpus.
        let vocabulary: Vec<String> = candidates.iter().map(|(l, _)| l.clone()).collect();
        let tfidf = TfidfModel::fit(vocabulary, corpus, &self.model);

        let document_lemmas: Vec<&str> = tagged
            .iter()
            .filter(|t| t.pos != PosTag::Punct)
            .map(|t| t.lemma.as_str())
            .collect();
        let weights = tfidf.transform(&document_lemmas);

        // Semantic refinement against the whole normalized text.
        let text_embedding = self.model.embed(&normalized)?;

        let mut scored = Vec::new();
        for (i, (lemma, pos)) in candidates.iter().enumerate() {
            if weights[i] <= 0.0 {
                continue;
            }
            let candidate_embedding = self.model.embed(lemma)?;
            let similarity = cosine_similarity(&candidate_embedding, &text_embedding);
            let score = 0.5 * weights[i] + 0.5 * similarity;

            if score > self.score_threshold {
                scored.push(ScoredKeyword {
                    lemma: lemma.clone(),
                    pos: *pos,
                    tfidf: weights[i],
                    similarity,
                    score,
                });
            }
        }

        // Stable sort: ties keep first-seen order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(scored)
    }
}
