//! The analysis engine: one service object owning the language model,
//! the corpus, the catalog, the glossary and the classifier slot.
//!
//! Constructed once at startup and injected into request handlers as
//! shared state - no ambient globals. The catalog and glossary are
//! replaced wholesale on the authenticated reload; the classifier is
//! published atomically by training jobs.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::{load_catalog, load_document, load_glossary, Glossary, IntentCatalog};
use crate::classifier::{self, IntentModel};
use crate::config::{IntentStrategy, ServerConfig};
use crate::corpus::{CorpusEntry, CorpusStore};
use crate::errors::{AppError, Result};
use crate::graph::{RelationshipEdge, RelationshipGrapher};
use crate::intent::{resolve_dictionary, UNKNOWN_INTENT};
use crate::keywords::KeywordExtractor;
use crate::language::{EntitySpan, HashEmbedder, LanguageModel};
use crate::normalize::TextNormalizer;
use crate::stopwords::StopwordPolicy;
use crate::training::{JobRegistry, TrainJob};

/// Fallback response for intents without a configured response text,
/// including the unknown sentinel.
pub const FALLBACK_RESPONSE: &str = "Je ne suis pas sûr de comprendre votre demande.";

const EMPTY_MESSAGE_RESPONSE: &str = "Message vide.";
const NO_KEYWORDS_RESPONSE: &str = "Aucun mot-clé détecté.";
const NO_ANALYSIS_EXPLANATION: &str = "Aucune analyse contextuelle n'a pu être effectuée.";

/// Everything analyze_context produces for one utterance.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub response: String,
    pub keywords: Vec<String>,
    pub intent: String,
    pub context: String,
    pub entities: Vec<EntitySpan>,
    pub explanation: String,
}

impl AnalysisOutcome {
    fn degenerate(response: &str) -> Self {
        Self {
            response: response.to_string(),
            keywords: Vec::new(),
            intent: UNKNOWN_INTENT.to_string(),
            context: UNKNOWN_INTENT.to_string(),
            entities: Vec::new(),
            explanation: NO_ANALYSIS_EXPLANATION.to_string(),
        }
    }
}

/// A glossary lookup result.
#[derive(Debug, Clone)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

/// The service object behind every operation.
pub struct Engine {
    config: ServerConfig,
    model: Arc<LanguageModel>,
    extractor: KeywordExtractor,
    grapher: RelationshipGrapher,
    corpus: CorpusStore,
    catalog: RwLock<Arc<IntentCatalog>>,
    glossary: RwLock<Arc<Glossary>>,
    classifier: RwLock<Option<Arc<IntentModel>>>,
    jobs: JobRegistry,
}

impl Engine {
    /// Build the engine: stopword policy, language model, stores and
    /// catalog, all from the configured data directory.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let pipeline = &config.pipeline;

        let stopwords = Arc::new(StopwordPolicy::french(
            &pipeline.stopword_additions,
            &pipeline.stopword_removals,
        ));
        info!("Stopword policy built: {} entries", stopwords.len());

        let embedder = Arc::new(HashEmbedder::new(pipeline.embedding_dimension));
        let model = Arc::new(LanguageModel::new(stopwords.clone(), embedder.clone()));

        let normalizer = TextNormalizer::new(
            stopwords.clone(),
            &pipeline.forced_terms,
            &pipeline.interrogatives,
        );
        let extractor = KeywordExtractor::new(
            model.clone(),
            normalizer,
            &pipeline.forced_terms,
            pipeline.keyword_score_threshold,
        );
        let grapher =
            RelationshipGrapher::new(embedder, pipeline.default_graph_threshold);

        let corpus = CorpusStore::open(&config.corpus_path())?;
        let catalog = load_catalog(&config.catalog_path())?;
        let glossary = load_glossary(&config.glossary_path())?;

        Ok(Self {
            config,
            model,
            extractor,
            grapher,
            corpus,
            catalog: RwLock::new(Arc::new(catalog)),
            glossary: RwLock::new(Arc::new(glossary)),
            classifier: RwLock::new(None),
            jobs: JobRegistry::new(),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    pub fn jobs(&self) -> &JobRegistry {
        &self.jobs
    }

    pub fn catalog(&self) -> Arc<IntentCatalog> {
        self.catalog.read().clone()
    }

    pub fn classifier_ready(&self) -> bool {
        self.classifier.read().is_some()
    }

    /// Swap in a fully trained classifier. In-flight predictions keep the
    /// Arc they already cloned.
    pub fn publish_classifier(&self, model: Arc<IntentModel>) {
        *self.classifier.write() = Some(model);
        info!("Classifier published");
    }

    /// Full analysis of one utterance.
    pub fn analyze(&self, message: &str) -> Result<AnalysisOutcome> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(AnalysisOutcome::degenerate(EMPTY_MESSAGE_RESPONSE));
        }

        let corpus_texts = self.corpus.texts();
        let keywords = self.extractor.extract(message, &corpus_texts)?;
        if keywords.is_empty() {
            return Ok(AnalysisOutcome::degenerate(NO_KEYWORDS_RESPONSE));
        }

        let entities = self.model.entities(message);
        let catalog = self.catalog();
        let intent = self.resolve_intent(message, &keywords, &catalog);

        let response = catalog
            .response_for(&intent)
            .unwrap_or(FALLBACK_RESPONSE)
            .to_string();
        let explanation = format!(
            "Les mots-clés détectés sont : {}. L'intention détectée est : {}.",
            keywords.join(", "),
            intent
        );

        Ok(AnalysisOutcome {
            response,
            context: intent.clone(),
            intent,
            keywords,
            entities,
            explanation,
        })
    }

    /// Resolve the intent with the configured strategy.
    ///
    /// Dictionary misses feed the unknown-query log; a recording failure
    /// is logged but never turns a successful analysis into an error.
    fn resolve_intent(
        &self,
        message: &str,
        keywords: &[String],
        catalog: &IntentCatalog,
    ) -> String {
        match self.config.intent_strategy {
            IntentStrategy::Dictionary => {
                let intent = resolve_dictionary(&catalog.intents, keywords);
                if intent == UNKNOWN_INTENT {
                    if let Err(e) = self.corpus.record_unknown(message) {
                        warn!("Failed to record unknown query: {e}");
                    }
                }
                intent
            }
            IntentStrategy::Classifier => match self.classifier.read().clone() {
                Some(model) => model.predict(message).to_string(),
                None => {
                    warn!("Classifier strategy selected but no model trained yet");
                    UNKNOWN_INTENT.to_string()
                }
            },
        }
    }

    /// Keyword extraction against the current corpus.
    pub fn extract_keywords(&self, text: &str) -> Result<Vec<String>> {
        let corpus_texts = self.corpus.texts();
        Ok(self.extractor.extract(text, &corpus_texts)?)
    }

    /// Relationship graph over an already-extracted keyword list.
    pub fn relationships(&self, keywords: &[String]) -> Result<Vec<RelationshipEdge>> {
        self.grapher.relationships(keywords)
    }

    /// Exact-key glossary lookup.
    pub fn glossary_lookup(&self, term: &str) -> Result<GlossaryEntry> {
        let glossary = self.glossary.read().clone();
        match glossary.terms.get(term) {
            Some(definition) => Ok(GlossaryEntry {
                term: term.to_string(),
                definition: definition.clone(),
            }),
            None => Err(AppError::NotFound(format!("term '{term}' in the glossary"))),
        }
    }

    /// Relabel a corpus entry, by exact utterance text.
    pub fn update_intent_label(&self, text: &str, intent: &str) -> Result<()> {
        self.corpus.update_label(text, intent)
    }

    /// Reload catalog and glossary from disk. Configuration errors
    /// propagate to the caller that triggered the reload.
    pub fn reload_data(&self) -> Result<()> {
        let catalog = load_catalog(&self.config.catalog_path())?;
        let glossary = load_glossary(&self.config.glossary_path())?;

        *self.catalog.write() = Arc::new(catalog);
        *self.glossary.write() = Arc::new(glossary);
        info!("Catalog and glossary reloaded");
        Ok(())
    }

    /// Serve a read-only precomputed document.
    pub fn clusters(&self) -> Result<Option<Value>> {
        load_document(&self.config.clusters_path())
    }

    pub fn statistics(&self) -> Result<Option<Value>> {
        load_document(&self.config.statistics_path())
    }

    /// Validate the corpus against the training schema and snapshot it.
    pub fn training_set(&self) -> Result<Vec<CorpusEntry>> {
        let entries = self.corpus.snapshot();
        if entries.is_empty() {
            return Err(AppError::TrainingSchema(
                "the corpus has no training entries".to_string(),
            ));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.text.trim().is_empty() || entry.intent.trim().is_empty() {
                return Err(AppError::TrainingSchema(format!(
                    "entry {i} must have non-empty 'text' and 'intent'"
                )));
            }
        }
        Ok(entries)
    }

    /// Queue a background training job: validate, snapshot, spawn, and
    /// return the queued record immediately.
    pub fn start_training(self: &Arc<Self>) -> Result<TrainJob> {
        let entries = self.training_set()?;
        let job_id = self.jobs.enqueue();
        let engine = Arc::clone(self);

        tokio::task::spawn_blocking(move || {
            engine.jobs.mark_running(job_id);
            let (model, summary) = classifier::train(&entries);
            info!(
                "Training job {} finished: {} examples, accuracy {:?}",
                job_id, summary.examples, summary.holdout_accuracy
            );
            engine.publish_classifier(Arc::new(model));
            engine.jobs.mark_completed(job_id, summary);
        });

        self.jobs.get(job_id)
    }

    /// Train synchronously. Used at startup when the classifier strategy
    /// is configured, so the first request already sees a model.
    pub fn train_blocking(&self) -> Result<classifier::TrainingSummary> {
        let entries = self.training_set()?;
        let (model, summary) = classifier::train(&entries);
        self.publish_classifier(Arc::new(model));
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn engine_with_fixtures(dir: &TempDir) -> Engine {
        fs::write(
            dir.path().join("corpus.json"),
            serde_json::to_vec_pretty(&serde_json::json!([
                {"text": "Quels sont vos horaires d'ouverture ?", "intent": "horaires"}
            ]))
            .unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("catalog.json"),
            serde_json::to_vec_pretty(&serde_json::json!({
                "intents": {"horaires": {"direct": ["horaire", "ouverture"]}},
                "responses": {"horaires": "Nous sommes ouverts de 9h à 18h."}
            }))
            .unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("glossary.json"),
            serde_json::to_vec_pretty(
                &serde_json::json!({"terms": {"IA": "Intelligence Artificielle"}}),
            )
            .unwrap(),
        )
        .unwrap();

        let config = ServerConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        Engine::new(config).unwrap()
    }

    #[test]
    fn test_empty_message_is_designated_outcome() {
        let dir = TempDir::new().unwrap();
        let engine = engine_with_fixtures(&dir);

        let outcome = engine.analyze("   ").unwrap();
        assert_eq!(outcome.response, "Message vide.");
        assert_eq!(outcome.intent, "unknown");
        assert!(outcome.keywords.is_empty());
    }

    #[test]
    fn test_horaires_scenario_end_to_end() {
        let dir = TempDir::new().unwrap();
        let engine = engine_with_fixtures(&dir);

        let outcome = engine.analyze("Quels sont vos horaires ?").unwrap();
        assert!(
            outcome.keywords.contains(&"horaire".to_string())
                || outcome.keywords.contains(&"ouverture".to_string()),
            "keywords: {:?}",
            outcome.keywords
        );
        assert_eq!(outcome.intent, "horaires");
        assert_eq!(outcome.response, "Nous sommes ouverts de 9h à 18h.");
    }

    #[test]
    fn test_unknown_dictionary_miss_is_recorded() {
        let dir = TempDir::new().unwrap();
        let engine = engine_with_fixtures(&dir);
        let before = engine.corpus().len();

        // "ouverture" supports the keyword, "girafe" has no trigger
        let outcome = engine.analyze("Une ouverture pour une girafe ?").unwrap();
        if outcome.intent == "unknown" {
            assert_eq!(engine.corpus().len(), before + 1);
        } else {
            // "ouverture" matched; no recording
            assert_eq!(engine.corpus().len(), before);
        }
    }

    #[test]
    fn test_glossary_exact_key() {
        let dir = TempDir::new().unwrap();
        let engine = engine_with_fixtures(&dir);

        let entry = engine.glossary_lookup("IA").unwrap();
        assert_eq!(entry.definition, "Intelligence Artificielle");

        let err = engine.glossary_lookup("ia").unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_training_schema_rejects_empty_corpus() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("corpus.json"), b"[]").unwrap();
        let config = ServerConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let engine = Engine::new(config).unwrap();

        let err = engine.training_set().unwrap_err();
        assert_eq!(err.code(), "TRAINING_SCHEMA");
    }

    #[test]
    fn test_train_blocking_publishes_model() {
        let dir = TempDir::new().unwrap();
        let engine = engine_with_fixtures(&dir);
        assert!(!engine.classifier_ready());

        let summary = engine.train_blocking().unwrap();
        assert_eq!(summary.examples, 1);
        assert!(engine.classifier_ready());
    }
}
