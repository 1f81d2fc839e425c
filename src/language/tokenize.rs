//! French-aware tokenization.
//!
//! Splits on whitespace, detaches surrounding punctuation into their own
//! tokens, and splits elided articles/pronouns ("l'ouverture" -> "l'" +
//! "ouverture") the way French tokenizers conventionally do. Hyphenated
//! compounds ("est-ce", "rendez-vous") stay whole.

/// Elision prefixes split off the front of a word, matched up to the
/// first apostrophe.
const ELISION_PREFIXES: &[&str] = &[
    "jusqu'", "lorsqu'", "puisqu'", "quoiqu'", "qu'", "c'", "d'", "j'", "l'", "m'", "n'", "s'",
    "t'",
];

/// Words containing an apostrophe that must not be split.
const APOSTROPHE_EXCEPTIONS: &[&str] = &["aujourd'hui"];

fn is_token_punct(c: char) -> bool {
    c.is_ascii_punctuation() && c != '\'' && c != '-' || matches!(c, '«' | '»' | '…' | '’')
}

/// Check whether a token is pure punctuation.
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| is_token_punct(c) || c == '\'' || c == '-')
}

fn push_word(word: &str, out: &mut Vec<String>) {
    if word.is_empty() {
        return;
    }

    let lower = word.to_lowercase();
    if APOSTROPHE_EXCEPTIONS.contains(&lower.as_str()) {
        out.push(word.to_string());
        return;
    }

    // Split at the first apostrophe if the head is a known elision prefix.
    if let Some(pos) = word.find(['\'', '’']) {
        let apos_len = word[pos..].chars().next().map(char::len_utf8).unwrap_or(1);
        let split = pos + apos_len;
        let head = word[..split].to_lowercase().replace('’', "'");
        if ELISION_PREFIXES.contains(&head.as_str()) && split < word.len() {
            out.push(word[..split].replace('’', "'"));
            push_word(&word[split..], out);
            return;
        }
    }

    out.push(word.to_string());
}

/// Tokenize raw text, preserving case.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for chunk in text.split_whitespace() {
        let mut start = 0;
        let chars: Vec<(usize, char)> = chunk.char_indices().collect();

        // Leading punctuation
        let mut i = 0;
        while i < chars.len() && is_token_punct(chars[i].1) {
            tokens.push(chars[i].1.to_string());
            i += 1;
        }
        if i > 0 {
            start = chars.get(i).map(|(pos, _)| *pos).unwrap_or(chunk.len());
        }

        // Trailing punctuation
        let mut end = chunk.len();
        let mut trailing = Vec::new();
        let mut j = chars.len();
        while j > i && is_token_punct(chars[j - 1].1) {
            trailing.push(chars[j - 1].1.to_string());
            end = chars[j - 1].0;
            j -= 1;
        }

        if start < end {
            push_word(&chunk[start..end], &mut tokens);
        }
        tokens.extend(trailing.into_iter().rev());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_split() {
        assert_eq!(
            tokenize("Quels sont vos horaires ?"),
            vec!["Quels", "sont", "vos", "horaires", "?"]
        );
    }

    #[test]
    fn test_elision() {
        assert_eq!(
            tokenize("l'ouverture d'une entreprise"),
            vec!["l'", "ouverture", "d'", "une", "entreprise"]
        );
        assert_eq!(tokenize("qu'est-ce"), vec!["qu'", "est-ce"]);
    }

    #[test]
    fn test_apostrophe_exception() {
        assert_eq!(tokenize("aujourd'hui"), vec!["aujourd'hui"]);
    }

    #[test]
    fn test_punctuation_detached() {
        assert_eq!(
            tokenize("Bonjour, le monde!"),
            vec!["Bonjour", ",", "le", "monde", "!"]
        );
        assert!(is_punctuation("?"));
        assert!(is_punctuation("..."));
        assert!(!is_punctuation("est-ce"));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_hyphenated_words_stay_whole() {
        assert_eq!(tokenize("rendez-vous"), vec!["rendez-vous"]);
    }
}
