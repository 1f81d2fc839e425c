//! Configuration management for the analysis service.
//!
//! All configurable parameters in one place with environment variable
//! overrides. Sensible defaults, configurable in production.

use std::env;
use std::path::PathBuf;
use tracing::info;

/// Which intent resolution strategy the analysis pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentStrategy {
    /// Keyword/dictionary matching against the intent catalog (default).
    Dictionary,
    /// Trained statistical classifier over the labeled corpus.
    Classifier,
}

impl IntentStrategy {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "dictionary" | "dict" => Some(Self::Dictionary),
            "classifier" | "statistical" => Some(Self::Classifier),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dictionary => "dictionary",
            Self::Classifier => "classifier",
        }
    }
}

/// Tunables for the text-analysis pipeline.
///
/// The forced-term and stopword-adjustment lists were hard-coded constants
/// in earlier deployments; they are configuration surface now, with the
/// original deployment's values kept as defaults.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Terms that must survive normalization and the POS filter regardless
    /// of their grammatical class.
    pub forced_terms: Vec<String>,

    /// Extra stopwords on top of the language base set.
    pub stopword_additions: Vec<String>,

    /// Words removed from the language base set (domain terms that the
    /// base list wrongly swallows).
    pub stopword_removals: Vec<String>,

    /// Interrogative multi-word expressions preserved verbatim during
    /// normalization so stopword removal cannot erase query phrasing.
    pub interrogatives: Vec<String>,

    /// Minimum combined score for a keyword to be returned.
    pub keyword_score_threshold: f32,

    /// Fallback relationship threshold when no pairwise similarity could
    /// be computed.
    pub default_graph_threshold: f32,

    /// Embedding dimension for the hash-based backend.
    pub embedding_dimension: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            forced_terms: vec!["potins".to_string(), "numériques".to_string()],
            stopword_additions: vec![
                "neuf".to_string(),
                "qu".to_string(),
                "quelqu".to_string(),
            ],
            stopword_removals: vec![
                "public".to_string(),
                "artificielle".to_string(),
                "potins".to_string(),
                "numérique".to_string(),
            ],
            interrogatives: vec![
                "c'est quoi".to_string(),
                "qu'est-ce que".to_string(),
                "qu'est ce que".to_string(),
                "quel".to_string(),
                "comment".to_string(),
            ],
            keyword_score_threshold: 0.3,
            default_graph_threshold: 0.2,
            embedding_dimension: 256,
        }
    }
}

/// Server configuration loaded from environment with defaults
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host address (default: 127.0.0.1)
    pub host: String,

    /// Server port (default: 5000)
    pub port: u16,

    /// Directory holding the persisted JSON documents
    /// (corpus.json, catalog.json, glossary.json, clusters.json, statistics.json)
    pub data_dir: PathBuf,

    /// Static admin credential for the catalog reload operation.
    /// Compared directly against the Authorization header.
    pub admin_key: String,

    /// Intent resolution strategy for analyze_context requests
    pub intent_strategy: IntentStrategy,

    /// Maximum concurrent requests (default: 100)
    pub max_concurrent_requests: usize,

    /// Whether running in production mode
    pub is_production: bool,

    /// Pipeline tunables
    pub pipeline: PipelineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            data_dir: PathBuf::from("./data"),
            admin_key: "entente-dev-key-change-in-production".to_string(),
            intent_strategy: IntentStrategy::Dictionary,
            max_concurrent_requests: 100,
            is_production: false,
            pipeline: PipelineConfig::default(),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.is_production = env::var("ENTENTE_ENV")
            .map(|v| {
                let v = v.to_lowercase();
                v == "production" || v == "prod"
            })
            .unwrap_or(false);

        if let Ok(val) = env::var("ENTENTE_HOST") {
            config.host = val;
        }

        if let Ok(val) = env::var("ENTENTE_PORT") {
            if let Ok(port) = val.parse() {
                config.port = port;
            }
        }

        if let Ok(val) = env::var("ENTENTE_DATA_DIR") {
            config.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = env::var("ENTENTE_ADMIN_KEY") {
            if !val.trim().is_empty() {
                config.admin_key = val;
            }
        } else if config.is_production {
            tracing::warn!(
                "ENTENTE_ADMIN_KEY not set in production mode - catalog reload uses the development key"
            );
        }

        if let Ok(val) = env::var("ENTENTE_INTENT_STRATEGY") {
            match IntentStrategy::parse(&val) {
                Some(strategy) => config.intent_strategy = strategy,
                None => tracing::warn!(
                    "Unknown intent strategy '{}', keeping '{}'",
                    val,
                    config.intent_strategy.as_str()
                ),
            }
        }

        if let Ok(val) = env::var("ENTENTE_MAX_CONCURRENT") {
            if let Ok(n) = val.parse() {
                config.max_concurrent_requests = n;
            }
        }

        if let Ok(val) = env::var("ENTENTE_FORCED_TERMS") {
            config.pipeline.forced_terms = split_list(&val);
        }

        if let Ok(val) = env::var("ENTENTE_STOPWORD_ADDITIONS") {
            config.pipeline.stopword_additions = split_list(&val);
        }

        if let Ok(val) = env::var("ENTENTE_STOPWORD_REMOVALS") {
            config.pipeline.stopword_removals = split_list(&val);
        }

        if let Ok(val) = env::var("ENTENTE_KEYWORD_THRESHOLD") {
            if let Ok(n) = val.parse::<f32>() {
                config.pipeline.keyword_score_threshold = n.clamp(0.0, 1.0);
            }
        }

        config
    }

    /// Log the current configuration
    pub fn log(&self) {
        info!("Configuration:");
        info!(
            "   Mode: {}",
            if self.is_production {
                "PRODUCTION"
            } else {
                "Development"
            }
        );
        info!("   Listen: {}:{}", self.host, self.port);
        info!("   Data directory: {:?}", self.data_dir);
        info!("   Intent strategy: {}", self.intent_strategy.as_str());
        info!("   Max concurrent: {}", self.max_concurrent_requests);
        info!(
            "   Keyword threshold: {:.2}, forced terms: {:?}",
            self.pipeline.keyword_score_threshold, self.pipeline.forced_terms
        );
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.data_dir.join("corpus.json")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join("catalog.json")
    }

    pub fn glossary_path(&self) -> PathBuf {
        self.data_dir.join("glossary.json")
    }

    pub fn clusters_path(&self) -> PathBuf {
        self.data_dir.join("clusters.json")
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.data_dir.join("statistics.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.intent_strategy, IntentStrategy::Dictionary);
        assert!(!config.is_production);
        assert!(config
            .pipeline
            .forced_terms
            .contains(&"potins".to_string()));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!(
            IntentStrategy::parse("classifier"),
            Some(IntentStrategy::Classifier)
        );
        assert_eq!(
            IntentStrategy::parse("DICT"),
            Some(IntentStrategy::Dictionary)
        );
        assert_eq!(IntentStrategy::parse("neural"), None);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("a, b ,,c"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_data_paths() {
        let config = ServerConfig {
            data_dir: PathBuf::from("/tmp/entente"),
            ..Default::default()
        };
        assert_eq!(config.corpus_path(), PathBuf::from("/tmp/entente/corpus.json"));
        assert_eq!(
            config.glossary_path(),
            PathBuf::from("/tmp/entente/glossary.json")
        );
    }
}
