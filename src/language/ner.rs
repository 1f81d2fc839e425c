//! Rule-based named-entity recognition for French text.
//!
//! Lexicon and capitalization heuristics: person titles, organization
//! indicators, a gazetteer of French-speaking locations, and all-caps
//! acronym detection. Labels follow the PER/ORG/LOC/MISC convention.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::tokenize::{is_punctuation, tokenize};

/// Entity label, serialized with its conventional short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    #[serde(rename = "PER")]
    Person,
    #[serde(rename = "ORG")]
    Organization,
    #[serde(rename = "LOC")]
    Location,
    #[serde(rename = "MISC")]
    Misc,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PER",
            EntityLabel::Organization => "ORG",
            EntityLabel::Location => "LOC",
            EntityLabel::Misc => "MISC",
        }
    }
}

/// A recognized entity span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
}

/// Lexicon-driven entity recognizer.
pub struct EntityRecognizer {
    person_titles: HashSet<&'static str>,
    org_indicators: HashSet<&'static str>,
    locations: HashSet<&'static str>,
}

impl Default for EntityRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer {
    pub fn new() -> Self {
        let person_titles: HashSet<&'static str> = [
            "monsieur", "madame", "mademoiselle", "m.", "mme", "mlle", "dr", "docteur",
            "professeur", "maître", "me",
        ]
        .into_iter()
        .collect();

        let org_indicators: HashSet<&'static str> = [
            "sarl",
            "sas",
            "sasu",
            "eurl",
            "scop",
            "sa",
            "entreprise",
            "société",
            "societe",
            "association",
            "université",
            "universite",
            "institut",
            "fondation",
            "banque",
            "groupe",
            "agence",
            "cabinet",
        ]
        .into_iter()
        .collect();

        let locations: HashSet<&'static str> = [
            "paris",
            "lyon",
            "marseille",
            "toulouse",
            "nice",
            "nantes",
            "strasbourg",
            "montpellier",
            "bordeaux",
            "lille",
            "rennes",
            "grenoble",
            "dijon",
            "angers",
            "reims",
            "toulon",
            "orléans",
            "rouen",
            "france",
            "belgique",
            "suisse",
            "luxembourg",
            "canada",
            "québec",
            "quebec",
            "allemagne",
            "espagne",
            "italie",
            "europe",
        ]
        .into_iter()
        .collect();

        Self {
            person_titles,
            org_indicators,
            locations,
        }
    }

    /// Extract entities in order of appearance.
    pub fn extract(&self, text: &str) -> Vec<EntitySpan> {
        let tokens = tokenize(text);
        let mut entities = Vec::new();
        let mut sentence_start = true;
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];

            if is_punctuation(token) {
                sentence_start = matches!(token.as_str(), "." | "!" | "?" | "…");
                i += 1;
                continue;
            }

            let lower = token.to_lowercase();

            // All-caps acronyms (IA, SNCF, API...) are entities even at
            // sentence start.
            if Self::is_acronym(token) {
                let label = if self.org_indicators.contains(lower.as_str()) {
                    EntityLabel::Organization
                } else {
                    EntityLabel::Misc
                };
                entities.push(EntitySpan {
                    text: token.clone(),
                    label,
                });
                sentence_start = false;
                i += 1;
                continue;
            }

            let capitalized = Self::is_capitalized(token);
            let known_location = self.locations.contains(lower.as_str());

            if (capitalized && !sentence_start) || (capitalized && known_location) {
                // Merge consecutive capitalized tokens into one span.
                let mut span_tokens = vec![token.clone()];
                let mut j = i + 1;
                while j < tokens.len()
                    && Self::is_capitalized(&tokens[j])
                    && !is_punctuation(&tokens[j])
                {
                    span_tokens.push(tokens[j].clone());
                    j += 1;
                }

                let label = self.classify_span(&span_tokens, i, &tokens);
                entities.push(EntitySpan {
                    text: span_tokens.join(" "),
                    label,
                });

                sentence_start = false;
                i = j;
                continue;
            }

            sentence_start = false;
            i += 1;
        }

        entities
    }

    fn classify_span(&self, span: &[String], start: usize, tokens: &[String]) -> EntityLabel {
        let span_lower: Vec<String> = span.iter().map(|t| t.to_lowercase()).collect();

        if span_lower
            .iter()
            .any(|t| self.locations.contains(t.as_str()))
        {
            return EntityLabel::Location;
        }

        if span_lower
            .iter()
            .any(|t| self.org_indicators.contains(t.as_str()))
        {
            return EntityLabel::Organization;
        }

        // A title immediately before the span marks a person.
        if start > 0 {
            let prev = tokens[start - 1].to_lowercase();
            if self.person_titles.contains(prev.as_str()) {
                return EntityLabel::Person;
            }
        }

        // An organization indicator right after ("Dupont SARL")
        if let Some(next) = tokens.get(start + span.len()) {
            if self.org_indicators.contains(next.to_lowercase().as_str()) {
                return EntityLabel::Organization;
            }
        }

        EntityLabel::Misc
    }

    fn is_capitalized(token: &str) -> bool {
        let mut chars = token.chars();
        match chars.next() {
            Some(first) => first.is_uppercase() && chars.any(|c| c.is_lowercase()),
            None => false,
        }
    }

    fn is_acronym(token: &str) -> bool {
        token.chars().count() >= 2
            && token.chars().all(|c| c.is_uppercase() || c.is_ascii_digit())
            && token.chars().any(|c| c.is_uppercase())
    }
}
