//! Rule-based French lemmatization.
//!
//! A lookup table of high-frequency irregular forms backed by suffix rules
//! for regular inflection (plural stripping, -aux/-eaux alternation, common
//! -er verb endings). Output is always lowercase, which is also the form
//! intent triggers and glossary-adjacent vocabularies are authored in.

use std::collections::HashMap;

/// Irregular forms worth hard-coding: auxiliaries, modals and a few
/// frequent nouns whose plural does not follow the -s rule.
fn exception_table() -> HashMap<&'static str, &'static str> {
    let mut table = HashMap::new();

    for (form, lemma) in [
        // être
        ("suis", "être"),
        ("es", "être"),
        ("est", "être"),
        ("sommes", "être"),
        ("êtes", "être"),
        ("sont", "être"),
        ("était", "être"),
        ("étaient", "être"),
        ("été", "être"),
        // avoir
        ("ai", "avoir"),
        ("as", "avoir"),
        ("a", "avoir"),
        ("avons", "avoir"),
        ("avez", "avoir"),
        ("ont", "avoir"),
        ("avait", "avoir"),
        ("eu", "avoir"),
        // aller
        ("vais", "aller"),
        ("vas", "aller"),
        ("va", "aller"),
        ("allons", "aller"),
        ("allez", "aller"),
        ("vont", "aller"),
        // pouvoir / vouloir / faire / savoir
        ("peux", "pouvoir"),
        ("peut", "pouvoir"),
        ("pouvez", "pouvoir"),
        ("peuvent", "pouvoir"),
        ("veux", "vouloir"),
        ("veut", "vouloir"),
        ("voulez", "vouloir"),
        ("veulent", "vouloir"),
        ("fais", "faire"),
        ("fait", "faire"),
        ("faites", "faire"),
        ("font", "faire"),
        ("sais", "savoir"),
        ("sait", "savoir"),
        ("savez", "savoir"),
        // irregular plurals
        ("travaux", "travail"),
        ("journaux", "journal"),
        ("yeux", "œil"),
        ("messieurs", "monsieur"),
        ("mesdames", "madame"),
    ] {
        table.insert(form, lemma);
    }

    table
}

/// Rule-based lemmatizer for French surface forms.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<&'static str, &'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            exceptions: exception_table(),
        }
    }

    /// Lemmatize one surface form. Always lowercase output.
    pub fn lemma(&self, surface: &str) -> String {
        let lower = surface.to_lowercase();

        if let Some(lemma) = self.exceptions.get(lower.as_str()) {
            return (*lemma).to_string();
        }

        // Nominal/adjectival plurals
        if let Some(stem) = lower.strip_suffix("eaux") {
            if !stem.is_empty() {
                return format!("{stem}eau");
            }
        }
        if let Some(stem) = lower.strip_suffix("aux") {
            if stem.len() >= 3 {
                return format!("{stem}al");
            }
        }
        if lower.ends_with("eux") || lower.ends_with("oux") {
            // jeux -> jeu, choux -> chou; adjectives in -eux keep the x
            if lower.len() >= 4
                && lower != "deux"
                && !lower.ends_with("reux")
                && !lower.ends_with("ieux")
            {
                return lower[..lower.len() - 1].to_string();
            }
            return lower;
        }

        // Regular -er verb endings (only clearly verbal suffixes)
        for (suffix, replacement) in [("ez", "er"), ("ons", "er"), ("ent", "er")] {
            if let Some(stem) = lower.strip_suffix(suffix) {
                if stem.len() >= 4 && Self::looks_verbal(stem) {
                    return format!("{stem}{replacement}");
                }
            }
        }

        // Plain plural
        if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us")
        {
            return lower[..lower.len() - 1].to_string();
        }

        lower
    }

    /// Heuristic guard so noun endings like "-ment" or "-tion" are not
    /// mistaken for conjugation stems ("moment" is not "momer").
    fn looks_verbal(stem: &str) -> bool {
        const VERB_STEMS: &[&str] = &[
            "ouvr", "ferm", "cherch", "trouv", "utilis", "propos", "contact", "command", "pay",
            "livr", "réserv", "reserv", "annul", "modifi", "appel", "envoy", "demand", "donn",
            "parl", "aid", "inform", "consult",
        ];
        VERB_STEMS.iter().any(|v| stem == *v || stem.starts_with(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_stripping() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemma("horaires"), "horaire");
        assert_eq!(lemmatizer.lemma("potins"), "potin");
        assert_eq!(lemmatizer.lemma("Numériques"), "numérique");
    }

    #[test]
    fn test_irregular_plurals() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemma("journaux"), "journal");
        assert_eq!(lemmatizer.lemma("bureaux"), "bureau");
        assert_eq!(lemmatizer.lemma("jeux"), "jeu");
    }

    #[test]
    fn test_auxiliaries() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemma("sont"), "être");
        assert_eq!(lemmatizer.lemma("avez"), "avoir");
        assert_eq!(lemmatizer.lemma("peut"), "pouvoir");
    }

    #[test]
    fn test_verb_endings_guarded() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemma("ouvrez"), "ouvrer");
        // "-ment" nouns must not be treated as conjugations
        assert_eq!(lemmatizer.lemma("moment"), "moment");
        assert_eq!(lemmatizer.lemma("paiement"), "paiement");
    }

    #[test]
    fn test_singular_passthrough() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemma("ouverture"), "ouverture");
        assert_eq!(lemmatizer.lemma("chat"), "chat");
    }

    #[test]
    fn test_short_words_untouched() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemma("pas"), "pas");
        assert_eq!(lemmatizer.lemma("vos"), "vos");
    }
}
