//! The reference corpus: an ordered, append-only collection of utterances
//! with their intent labels, backed by a JSON file.
//!
//! One logical data set, three read views: raw texts for TF-IDF fitting,
//! labeled pairs for classifier training, and the unknown-only subset for
//! the labeling queue.
//!
//! Writers are serialized: append and label-update hold the write lock
//! across the whole read-modify-write-persist sequence, and persistence
//! goes through a temp file plus rename so a crash never leaves a
//! half-written corpus. Readers clone a stable snapshot under the read
//! lock.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{AppError, Result};
use crate::intent::UNKNOWN_INTENT;

/// One corpus utterance with its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub text: String,
    pub intent: String,
}

/// JSON-file-backed corpus store.
#[derive(Debug)]
pub struct CorpusStore {
    path: PathBuf,
    entries: RwLock<Vec<CorpusEntry>>,
}

impl CorpusStore {
    /// Open the store. A missing file is an empty corpus; a present but
    /// unparsable file is a configuration error.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = match fs::read(path) {
            Ok(bytes) => {
                serde_json::from_slice::<Vec<CorpusEntry>>(&bytes).map_err(|e| {
                    AppError::MalformedConfig {
                        file: path.display().to_string(),
                        reason: e.to_string(),
                    }
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        info!("Corpus loaded: {} entries from {:?}", entries.len(), path);

        Ok(Self {
            path: path.to_path_buf(),
            entries: RwLock::new(entries),
        })
    }

    /// Full snapshot of the corpus.
    pub fn snapshot(&self) -> Vec<CorpusEntry> {
        self.entries.read().clone()
    }

    /// Raw texts, for TF-IDF fitting.
    pub fn texts(&self) -> Vec<String> {
        self.entries.read().iter().map(|e| e.text.clone()).collect()
    }

    /// Labeled pairs, for classifier training. Excludes the unknown
    /// sentinel.
    pub fn labeled(&self) -> Vec<CorpusEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.intent != UNKNOWN_INTENT)
            .cloned()
            .collect()
    }

    /// The unknown-only subset: the labeling queue.
    pub fn unknown(&self) -> Vec<CorpusEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.intent == UNKNOWN_INTENT)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Append an unrecognized utterance for future labeling.
    pub fn record_unknown(&self, text: &str) -> Result<()> {
        let mut entries = self.entries.write();

        let mut next = entries.clone();
        next.push(CorpusEntry {
            text: text.to_string(),
            intent: UNKNOWN_INTENT.to_string(),
        });
        self.persist(&next)?;
        *entries = next;

        debug!("Recorded unknown query ({} corpus entries)", entries.len());
        Ok(())
    }

    /// Update the intent label of the entry with the given text.
    /// The first matching entry is edited in place; order never changes.
    pub fn update_label(&self, text: &str, intent: &str) -> Result<()> {
        let mut entries = self.entries.write();

        let mut next = entries.clone();
        let position = next.iter().position(|e| e.text == text).ok_or_else(|| {
            AppError::NotFound(format!("question '{text}' is not in the corpus"))
        })?;
        next[position].intent = intent.to_string();
        self.persist(&next)?;
        *entries = next;

        info!("Corpus entry relabeled as '{}'", intent);
        Ok(())
    }

    /// Write the full corpus to disk: temp file then rename, so readers
    /// of the file never observe a partial write.
    fn persist(&self, entries: &[CorpusEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
