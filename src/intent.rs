//! Dictionary-based intent resolution.
//!
//! The catalog maps intent names to trigger representations. Two shapes
//! are accepted: a flat trigger list, or a structured object carrying at
//! least a `direct` trigger set (other fields are kept for future
//! matching strategies). Resolution walks the catalog in declaration
//! order; the first entry with a trigger among the extracted keywords
//! wins.

use serde::Serialize;
use serde_json::Value;

/// The sentinel intent for unrecognized utterances.
pub const UNKNOWN_INTENT: &str = "unknown";

/// Trigger representation for one intent.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum IntentTriggers {
    /// Flat list of trigger keywords.
    Flat(Vec<String>),
    /// Structured form: a `direct` trigger set plus reserved fields.
    Structured {
        direct: Vec<String>,
        #[serde(flatten)]
        extra: serde_json::Map<String, Value>,
    },
}

impl IntentTriggers {
    /// Parse a catalog value, rejecting shapes that are neither a trigger
    /// list nor a `direct`-bearing object.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Array(items) => {
                let mut triggers = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(s) => triggers.push(s.to_string()),
                        None => return Err("trigger lists must contain only strings".to_string()),
                    }
                }
                Ok(Self::Flat(triggers))
            }
            Value::Object(map) => {
                let direct = match map.get("direct") {
                    Some(Value::Array(items)) => {
                        let mut triggers = Vec::with_capacity(items.len());
                        for item in items {
                            match item.as_str() {
                                Some(s) => triggers.push(s.to_string()),
                                None => {
                                    return Err(
                                        "'direct' triggers must contain only strings".to_string()
                                    )
                                }
                            }
                        }
                        triggers
                    }
                    _ => {
                        return Err(
                            "expected a trigger list or an object with a 'direct' key".to_string()
                        )
                    }
                };
                let extra = map
                    .iter()
                    .filter(|(k, _)| k.as_str() != "direct")
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                Ok(Self::Structured { direct, extra })
            }
            _ => Err("expected a trigger list or an object with a 'direct' key".to_string()),
        }
    }

    /// Whether any extracted keyword matches this intent's triggers.
    pub fn matches(&self, keywords: &[String]) -> bool {
        let triggers = match self {
            Self::Flat(triggers) => triggers,
            Self::Structured { direct, .. } => direct,
        };
        keywords.iter().any(|kw| triggers.contains(kw))
    }
}

/// Resolve an intent from extracted keywords by walking the catalog in
/// declaration order. First match wins.
///
/// An empty keyword list short-circuits to "unknown" without evaluating
/// any entry: an empty match-any would otherwise never fire, but skipping
/// the walk keeps the contract explicit and cheap.
pub fn resolve_dictionary(entries: &[(String, IntentTriggers)], keywords: &[String]) -> String {
    if keywords.is_empty() {
        return UNKNOWN_INTENT.to_string();
    }

    for (intent, triggers) in entries {
        if triggers.matches(keywords) {
            return intent.clone();
        }
    }

    UNKNOWN_INTENT.to_string()
}
