//! Persisted configuration documents: the intent catalog, the glossary,
//! and the optional precomputed cluster/statistics documents.
//!
//! All loaders share the same file semantics: a missing file yields an
//! empty default structure, a present but schema-invalid file raises a
//! configuration error at load time. Loads happen at startup and on the
//! authenticated reload operation, never per request.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::{AppError, Result};
use crate::intent::IntentTriggers;

/// The intent catalog: trigger representations plus response texts.
///
/// Entry order follows the declaration order in the JSON document; the
/// dictionary strategy's first-match semantics depend on it.
#[derive(Debug, Clone, Default)]
pub struct IntentCatalog {
    pub intents: Vec<(String, IntentTriggers)>,
    pub responses: HashMap<String, String>,
}

impl IntentCatalog {
    pub fn response_for(&self, intent: &str) -> Option<&str> {
        self.responses.get(intent).map(|s| s.as_str())
    }
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn malformed(path: &Path, reason: impl ToString) -> AppError {
    AppError::MalformedConfig {
        file: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Load the intent catalog from `catalog.json`.
pub fn load_catalog(path: &Path) -> Result<IntentCatalog> {
    let bytes = match read_optional(path)? {
        Some(bytes) => bytes,
        None => {
            info!("No catalog at {:?}, starting with an empty catalog", path);
            return Ok(IntentCatalog::default());
        }
    };

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| malformed(path, e))?;
    let root = value
        .as_object()
        .ok_or_else(|| malformed(path, "expected a JSON object with 'intents' and 'responses'"))?;

    let mut intents = Vec::new();
    if let Some(section) = root.get("intents") {
        let map = section
            .as_object()
            .ok_or_else(|| malformed(path, "'intents' must be an object"))?;
        for (name, triggers) in map {
            let triggers = IntentTriggers::from_value(triggers)
                .map_err(|reason| malformed(path, format!("intent '{name}': {reason}")))?;
            intents.push((name.clone(), triggers));
        }
    }

    let mut responses = HashMap::new();
    if let Some(section) = root.get("responses") {
        let map = section
            .as_object()
            .ok_or_else(|| malformed(path, "'responses' must be an object"))?;
        for (name, response) in map {
            let response = response
                .as_str()
                .ok_or_else(|| malformed(path, format!("response '{name}' must be a string")))?;
            responses.insert(name.clone(), response.to_string());
        }
    }

    info!(
        "Catalog loaded: {} intents, {} responses from {:?}",
        intents.len(),
        responses.len(),
        path
    );

    Ok(IntentCatalog { intents, responses })
}

/// The glossary: a flat term -> definition map with exact-key lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Glossary {
    #[serde(default)]
    pub terms: HashMap<String, String>,
}

/// Load the glossary from `glossary.json`.
pub fn load_glossary(path: &Path) -> Result<Glossary> {
    let bytes = match read_optional(path)? {
        Some(bytes) => bytes,
        None => return Ok(Glossary::default()),
    };

    let glossary: Glossary = serde_json::from_slice(&bytes).map_err(|e| malformed(path, e))?;
    info!("Glossary loaded: {} terms from {:?}", glossary.terms.len(), path);
    Ok(glossary)
}

/// Load a read-only precomputed document (clusters, statistics).
/// `None` when the file is missing or holds an empty structure.
pub fn load_document(path: &Path) -> Result<Option<Value>> {
    let bytes = match read_optional(path)? {
        Some(bytes) => bytes,
        None => return Ok(None),
    };

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| malformed(path, e))?;
    let empty = match &value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Null => true,
        _ => false,
    };

    Ok(if empty { None } else { Some(value) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, value: &Value) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_missing_catalog_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = load_catalog(&dir.path().join("catalog.json")).unwrap();
        assert!(catalog.intents.is_empty());
        assert!(catalog.responses.is_empty());
    }

    #[test]
    fn test_catalog_preserves_declaration_order() {
        let dir = TempDir::new().unwrap();
        // keys deliberately not in alphabetical order
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            br#"{"intents": {"zebra": ["z"], "alpha": ["a"], "mango": ["m"]}}"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        let names: Vec<&str> = catalog.intents.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["zebra", "alpha", "mango"]);
    }

    #[test]
    fn test_catalog_with_both_trigger_shapes() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "catalog.json",
            &json!({
                "intents": {
                    "horaires": {"direct": ["horaire", "ouverture"]},
                    "tarifs": ["tarif", "prix"]
                },
                "responses": {
                    "horaires": "Nous sommes ouverts de 9h à 18h.",
                    "tarifs": "Nos tarifs sont en ligne."
                }
            }),
        );

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.intents.len(), 2);
        assert_eq!(
            catalog.response_for("horaires"),
            Some("Nous sommes ouverts de 9h à 18h.")
        );
        assert_eq!(catalog.response_for("unknown"), None);
    }

    #[test]
    fn test_malformed_trigger_shape_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "catalog.json",
            &json!({"intents": {"horaires": "ouverture"}}),
        );

        let err = load_catalog(&path).unwrap_err();
        assert_eq!(err.code(), "MALFORMED_CONFIG");
        assert!(err.message().contains("horaires"));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, b"[[[").unwrap();
        assert_eq!(load_catalog(&path).unwrap_err().code(), "MALFORMED_CONFIG");
    }

    #[test]
    fn test_glossary_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "glossary.json",
            &json!({"terms": {"IA": "Intelligence Artificielle"}}),
        );

        let glossary = load_glossary(&path).unwrap();
        assert_eq!(
            glossary.terms.get("IA").map(String::as_str),
            Some("Intelligence Artificielle")
        );
        // exact-key lookup: no case folding
        assert!(glossary.terms.get("ia").is_none());
    }

    #[test]
    fn test_document_empty_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_document(&dir.path().join("clusters.json"))
            .unwrap()
            .is_none());

        let path = write(&dir, "clusters.json", &json!({}));
        assert!(load_document(&path).unwrap().is_none());

        let path = write(&dir, "statistics.json", &json!({"total": 12}));
        assert!(load_document(&path).unwrap().is_some());
    }
}
