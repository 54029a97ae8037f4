use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static RE_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+([.,]\d+)?$").expect("valid numeric regex"));

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

const HUNGARIAN_ACCENTED: &str = "ÁÉÍÓÖŐÚÜŰáéíóöőúüű";

/// Bare final words that only make sense together with the word before them
/// ("rozmaring ág", "húsleves alaplé", ...).
pub const DEFAULT_SUFFIX_WORDS: &[&str] = &[
    "ág", "alja", "bl", "alap", "fehérje", "alaplé", "aroma", "befőtt",
];

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || HUNGARIAN_ACCENTED.contains(c)
}

fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| !is_letter(c))
}

/// An opening parenthesis that is never closed later in the line.
fn has_unmatched_paren(text: &str) -> bool {
    match text.rfind('(') {
        Some(open) => !text[open..].contains(')'),
        None => false,
    }
}

/// Turns one free-text ingredient line into its canonical token.
///
/// The token is the last word of the line (quantities and units come first in
/// the scraped data), lowercased and stripped of non-letters.
#[derive(Debug, Clone, Default)]
pub struct IngredientTokenizer {
    suffix_words: HashSet<String>,
}

impl IngredientTokenizer {
    /// Tokenizer joining the given suffix words with the word before them.
    pub fn new<I, S>(suffix_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffix_words: suffix_words
                .into_iter()
                .map(|word| word.as_ref().trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    /// Last-word tokenizer without any suffix joining.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn with_default_suffixes() -> Self {
        Self::new(DEFAULT_SUFFIX_WORDS)
    }

    pub fn normalize(&self, raw: &str) -> Option<String> {
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() || has_unmatched_paren(&text) {
            return None;
        }

        let text = text.trim_end_matches(TRAILING_PUNCTUATION).trim_end();
        let parts: Vec<&str> = text.split_whitespace().collect();
        let last = parts.last()?;

        let mut key = clean_token(last).to_lowercase();

        if parts.len() >= 2 && self.suffix_words.contains(&key) {
            let prev = clean_token(parts[parts.len() - 2]).to_lowercase();
            if !prev.is_empty() {
                key = format!("{prev} {key}");
            }
        }

        if key.is_empty() || RE_NUMERIC.is_match(&key) {
            return None;
        }

        Some(key)
    }
}
