//! Stopword policy: a language base set adjusted per deployment.
//!
//! The effective set is `base ∪ additions − removals`, with every entry
//! diacritic-stripped and lowercased before comparison. The same folded
//! form feeds both the normalizer's token filter and the keyword
//! extractor's TF-IDF stop-list, so an accented stopword and its stripped
//! form can never disagree.
//!
//! Built once at process start; any change requires a restart.

use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Base stopword set for French. Representative rather than exhaustive:
/// articles, pronouns, common prepositions/conjunctions, auxiliaries and
/// high-frequency adverbs.
const FRENCH_STOP_WORDS: &[&str] = &[
    "a", "à", "ai", "aie", "ainsi", "alors", "après", "as", "au", "aucun", "aujourd'hui",
    "auquel", "aussi", "autre", "autres", "aux", "avait", "avant", "avec", "avez", "avoir",
    "avons", "c", "c'", "ça", "car", "ce", "ceci", "cela", "celle", "celles", "celui", "cependant",
    "ces", "cet", "cette", "ceux", "chaque", "chez", "comme", "d", "d'", "dans", "de", "déjà",
    "des", "donc", "dont", "du", "elle", "elles", "en", "encore", "entre", "es", "est", "et",
    "étaient", "était", "été", "être", "êtes", "eu", "il", "ils", "j", "j'", "je", "jusque",
    "l", "l'", "la", "là", "le", "les", "leur", "leurs", "lui", "m", "m'", "ma", "mais", "me",
    "même", "mes", "moi", "moins", "mon", "n", "n'", "ne", "ni", "non", "nos", "notre", "nous",
    "on", "ont", "ou", "où", "par", "parce", "pas", "pendant", "peu", "peut", "plus", "plusieurs",
    "pour", "pourquoi", "près", "puis", "qu", "qu'", "quand", "que", "quel", "quelle", "quelles",
    "quels", "qui", "quoi", "s", "s'", "sa", "sans", "se", "sera", "ses", "si", "sinon", "soit",
    "son", "sont", "sous", "suis", "sur", "t", "t'", "ta", "tandis", "te", "tes", "toi", "ton",
    "toujours", "tous", "tout", "toute", "toutes", "très", "tu", "un", "une", "vers", "voici",
    "voilà", "vos", "votre", "vous", "y",
];

/// Lowercase a word and strip its combining diacritical marks.
///
/// "Numériques" and "numeriques" fold to the same key, so catalog authors
/// and user input do not have to agree on accents.
pub fn fold(word: &str) -> String {
    word.to_lowercase()
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect()
}

/// A stable, diacritic-folded stopword set.
#[derive(Debug, Clone)]
pub struct StopwordPolicy {
    set: HashSet<String>,
}

impl StopwordPolicy {
    /// Build the French policy: base set plus additions, minus removals.
    pub fn french(additions: &[String], removals: &[String]) -> Self {
        let mut set: HashSet<String> = FRENCH_STOP_WORDS.iter().map(|w| fold(w)).collect();

        for word in additions {
            set.insert(fold(word));
        }
        for word in removals {
            set.remove(&fold(word));
        }

        Self { set }
    }

    /// Whether the given surface form is a stopword (folded comparison).
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(&fold(word))
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_diacritics() {
        assert_eq!(fold("Numériques"), "numeriques");
        assert_eq!(fold("déjà"), "deja");
        assert_eq!(fold("chat"), "chat");
    }

    #[test]
    fn test_base_set_matches_accented_and_stripped_forms() {
        let policy = StopwordPolicy::french(&[], &[]);
        assert!(policy.contains("très"));
        assert!(policy.contains("tres"));
        assert!(policy.contains("Où"));
        assert!(!policy.contains("horaires"));
    }

    #[test]
    fn test_additions_and_removals() {
        let additions = vec!["neuf".to_string()];
        let removals = vec!["numérique".to_string(), "public".to_string()];
        let policy = StopwordPolicy::french(&additions, &removals);

        assert!(policy.contains("neuf"));
        // removals only matter if the base set had the word; folding still applies
        assert!(!policy.contains("numérique"));
        assert!(!policy.contains("numerique"));
    }

    #[test]
    fn test_removal_is_folded_before_comparison() {
        // "très" removed via its stripped spelling must drop the accented form too
        let removals = vec!["tres".to_string()];
        let policy = StopwordPolicy::french(&[], &removals);
        assert!(!policy.contains("très"));
    }
}
