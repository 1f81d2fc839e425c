//! Rule-based French part-of-speech tagging.
//!
//! Coarse tagging in the spirit of shallow chunking: stopword and
//! punctuation checks first, then capitalization for proper nouns, then
//! suffix heuristics for verbs/adjectives/nouns. Unknown content words of
//! reasonable length default to nouns - the most common open class.

use crate::stopwords::StopwordPolicy;

use super::tokenize::is_punctuation;

/// Coarse part-of-speech category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Function,
    Number,
    Punct,
    Other,
}

impl PosTag {
    /// Open classes retained by the keyword extractor.
    pub fn is_open_class(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::ProperNoun | PosTag::Verb | PosTag::Adjective | PosTag::Pronoun
        )
    }
}

const PRONOUNS: &[&str] = &[
    "je", "tu", "il", "elle", "on", "nous", "vous", "ils", "elles", "moi", "toi", "lui", "eux",
    "celui", "celle", "ceux", "celles", "ça", "cela", "ceci", "rien", "personne", "chacun",
    "chacune", "quelqu'un",
];

const ADVERBS: &[&str] = &[
    "comment", "pourquoi", "souvent", "toujours", "jamais", "maintenant", "ici", "ailleurs",
    "beaucoup", "peu", "très", "trop", "bien", "mal", "vite", "ensuite", "demain", "hier",
];

const VERB_SUFFIXES: &[&str] = &[
    "er", "ir", "ez", "ons", "ent", "ais", "ait", "aient", "era", "erez", "eront", "erai",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "eux", "euse", "if", "ive", "ique", "aire", "el", "elle", "al", "ale", "able", "ible", "ain",
    "aine",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "té", "eur", "age", "isme", "ure", "ance", "ence", "oire", "erie",
    "esse", "ude", "ie",
];

fn ends_with_any(word: &str, suffixes: &[&str]) -> bool {
    // Plural forms carry the same suffix plus a trailing 's'.
    let base = word.strip_suffix('s').unwrap_or(word);
    suffixes.iter().any(|suffix| base.ends_with(suffix))
}

/// Tag a single token given its position in the sentence.
pub fn tag_token(surface: &str, position: usize, stopwords: &StopwordPolicy) -> PosTag {
    if is_punctuation(surface) {
        return PosTag::Punct;
    }

    if surface.chars().all(|c| c.is_ascii_digit()) {
        return PosTag::Number;
    }

    let lower = surface.to_lowercase();

    if PRONOUNS.contains(&lower.as_str()) {
        return PosTag::Pronoun;
    }

    if ADVERBS.contains(&lower.as_str()) {
        return PosTag::Adverb;
    }

    if lower.ends_with('\'') || stopwords.contains(&lower) {
        return PosTag::Function;
    }

    // Capitalized words not at sentence start are likely proper nouns.
    let is_capitalized = surface
        .chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false);
    if is_capitalized && position > 0 {
        return PosTag::ProperNoun;
    }

    // Noun suffixes win over verb suffixes: "-ment"/"-ent" collide.
    if ends_with_any(&lower, NOUN_SUFFIXES) {
        return PosTag::Noun;
    }

    if ends_with_any(&lower, ADJECTIVE_SUFFIXES) {
        return PosTag::Adjective;
    }

    if lower.len() > 3 && ends_with_any(&lower, VERB_SUFFIXES) {
        return PosTag::Verb;
    }

    // Unknown content words are usually nouns.
    if lower.chars().count() >= 4 {
        return PosTag::Noun;
    }

    PosTag::Other
}

/// Tag every token of a sentence.
pub fn tag_tokens(tokens: &[String], stopwords: &StopwordPolicy) -> Vec<PosTag> {
    tokens
        .iter()
        .enumerate()
        .map(|(position, token)| tag_token(token, position, stopwords))
        .collect()
}
