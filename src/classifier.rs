//! Statistical intent classification.
//!
//! A multinomial naive Bayes model over bag-of-words counts, trained from
//! the labeled corpus by an explicit batch operation. Deterministic: the
//! train/test split uses a fixed seed, so retraining on an unchanged
//! corpus produces the same model and the same held-out accuracy.
//!
//! The model predicts exactly one trained label for any input; it has no
//! built-in "unknown" output unless "unknown" was itself a training label.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::corpus::CorpusEntry;

/// Fixed seed for the train/test shuffle.
const SPLIT_SEED: u64 = 42;

/// Held-out fraction of the labeled corpus.
const TEST_FRACTION: f64 = 0.2;

/// Laplace smoothing constant.
const ALPHA: f32 = 1.0;

fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.chars().count() >= 2)
        .map(|s| s.to_string())
        .collect()
}

/// Bag-of-words vocabulary built from the training split.
#[derive(Debug, Clone)]
struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
}

impl CountVectorizer {
    fn fit(texts: &[&str]) -> Self {
        let mut vocabulary = HashMap::new();
        for text in texts {
            for token in tokenize(text) {
                let next = vocabulary.len();
                vocabulary.entry(token).or_insert(next);
            }
        }
        Self { vocabulary }
    }

    fn len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// A trained multinomial naive Bayes intent model.
pub struct IntentModel {
    vectorizer: CountVectorizer,
    labels: Vec<String>,
    /// log P(label)
    log_prior: Vec<f32>,
    /// log P(token | label), flattened [labels * vocabulary]
    log_likelihood: Vec<f32>,
}

impl IntentModel {
    /// Predict the intent label for a text.
    ///
    /// Tokens outside the training vocabulary contribute nothing; a text
    /// with no in-vocabulary token falls back to the prior, which still
    /// selects exactly one label.
    pub fn predict(&self, text: &str) -> &str {
        let vocab_size = self.vectorizer.len();
        let mut scores = self.log_prior.clone();

        for token in tokenize(text) {
            if let Some(&ti) = self.vectorizer.vocabulary.get(&token) {
                for (c, score) in scores.iter_mut().enumerate() {
                    *score += self.log_likelihood[c * vocab_size + ti];
                }
            }
        }

        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (c, score) in scores.iter().enumerate() {
            if *score > best_score {
                best_score = *score;
                best = c;
            }
        }

        &self.labels[best]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Summary of one training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub examples: usize,
    pub train_examples: usize,
    pub test_examples: usize,
    pub labels: Vec<String>,
    /// Accuracy on the held-out split; absent when the corpus is too
    /// small to hold anything out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holdout_accuracy: Option<f32>,
    pub trained_at: DateTime<Utc>,
}

/// Train a model over labeled corpus entries.
///
/// Blocking batch step - callers run it off the request path. The entries
/// must already be schema-validated (non-empty text and intent).
pub fn train(entries: &[CorpusEntry]) -> (IntentModel, TrainingSummary) {
    let mut indices: Vec<usize> = (0..entries.len()).collect();
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    indices.shuffle(&mut rng);

    let test_size = ((entries.len() as f64) * TEST_FRACTION).floor() as usize;
    let (test_indices, train_indices) = indices.split_at(test_size);

    let train_texts: Vec<&str> = train_indices
        .iter()
        .map(|&i| entries[i].text.as_str())
        .collect();
    let vectorizer = CountVectorizer::fit(&train_texts);
    let vocab_size = vectorizer.len().max(1);

    // Collect labels in first-seen order over the training split.
    let mut labels: Vec<String> = Vec::new();
    let mut label_index: HashMap<&str, usize> = HashMap::new();
    for &i in train_indices {
        let intent = entries[i].intent.as_str();
        if !label_index.contains_key(intent) {
            label_index.insert(intent, labels.len());
            labels.push(intent.to_string());
        }
    }
    let n_labels = labels.len().max(1);

    // Per-label document and token counts.
    let mut doc_counts = vec![0u32; n_labels];
    let mut token_counts = vec![0u32; n_labels * vocab_size];
    let mut total_tokens = vec![0u32; n_labels];

    for &i in train_indices {
        let c = label_index[entries[i].intent.as_str()];
        doc_counts[c] += 1;
        for token in tokenize(&entries[i].text) {
            if let Some(&ti) = vectorizer.vocabulary.get(&token) {
                token_counts[c * vocab_size + ti] += 1;
                total_tokens[c] += 1;
            }
        }
    }

    let total_docs: f32 = doc_counts.iter().sum::<u32>() as f32;
    let mut log_prior = vec![0f32; n_labels];
    for c in 0..n_labels {
        let p = (doc_counts[c] as f32 + ALPHA) / (total_docs + n_labels as f32 * ALPHA);
        log_prior[c] = p.ln();
    }

    let mut log_likelihood = vec![0f32; n_labels * vocab_size];
    for c in 0..n_labels {
        let denominator = total_tokens[c] as f32 + ALPHA * vocab_size as f32;
        for ti in 0..vocab_size {
            let count = token_counts[c * vocab_size + ti] as f32;
            log_likelihood[c * vocab_size + ti] = ((count + ALPHA) / denominator).ln();
        }
    }

    let model = IntentModel {
        vectorizer,
        labels: labels.clone(),
        log_prior,
        log_likelihood,
    };

    // Held-out evaluation.
    let holdout_accuracy = if test_indices.is_empty() {
        None
    } else {
        let correct = test_indices
            .iter()
            .filter(|&&i| model.predict(&entries[i].text) == entries[i].intent)
            .count();
        Some(correct as f32 / test_indices.len() as f32)
    };

    let summary = TrainingSummary {
        examples: entries.len(),
        train_examples: train_indices.len(),
        test_examples: test_indices.len(),
        labels,
        holdout_accuracy,
        trained_at: Utc::now(),
    };

    (model, summary)
}
