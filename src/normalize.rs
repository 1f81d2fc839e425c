//! Text normalization ahead of keyword extraction.
//!
//! Tokenizes the raw utterance, protects interrogative expressions from
//! stopword removal, drops stopwords unless they are forced terms, and
//! joins the survivors. An utterance that normalizes to nothing yields
//! `None` - "no usable content" - which callers treat as an empty keyword
//! list, never as an error.

use std::collections::HashSet;
use std::sync::Arc;

use crate::language::tokenize::tokenize;
use crate::stopwords::{fold, StopwordPolicy};

/// Normalizer with a stopword policy, a forced-term allow-list and the
/// protected interrogative expressions.
pub struct TextNormalizer {
    stopwords: Arc<StopwordPolicy>,
    keep_terms: HashSet<String>,
    interrogatives: Vec<Vec<String>>,
}

impl TextNormalizer {
    pub fn new(
        stopwords: Arc<StopwordPolicy>,
        keep_terms: &[String],
        interrogatives: &[String],
    ) -> Self {
        let keep_terms = keep_terms.iter().map(|t| fold(t)).collect();
        // Pre-tokenize each expression once; matching is done over folded
        // token windows.
        let interrogatives = interrogatives
            .iter()
            .map(|expr| tokenize(expr).iter().map(|t| fold(t)).collect())
            .filter(|tokens: &Vec<String>| !tokens.is_empty())
            .collect();

        Self {
            stopwords,
            keep_terms,
            interrogatives,
        }
    }

    /// Indices of tokens covered by an interrogative expression.
    fn protected_indices(&self, folded: &[String]) -> HashSet<usize> {
        let mut protected = HashSet::new();

        for expr in &self.interrogatives {
            if expr.len() > folded.len() {
                continue;
            }
            for start in 0..=(folded.len() - expr.len()) {
                if folded[start..start + expr.len()] == expr[..] {
                    protected.extend(start..start + expr.len());
                }
            }
        }

        protected
    }

    /// Normalize a raw utterance. `None` means no usable content.
    pub fn normalize(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        let tokens = tokenize(text);
        let folded: Vec<String> = tokens.iter().map(|t| fold(t)).collect();
        let protected = self.protected_indices(&folded);

        let kept: Vec<&str> = tokens
            .iter()
            .enumerate()
            .filter(|(i, token)| {
                !self.stopwords.contains(token)
                    || protected.contains(i)
                    || self.keep_terms.contains(&folded[*i])
            })
            .map(|(_, token)| token.as_str())
            .collect();

        let joined = kept.join(" ");
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}
