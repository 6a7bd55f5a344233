//! Text normalization and keyword matching
//!
//! Every matcher in the pipeline works on the normalized form of a message:
//! lowercased and trimmed. Single-word triggers are matched against Unicode
//! word tokens so that "hi" does not fire inside "this"; multi-word triggers
//! must appear as a consecutive run of tokens, so "see you" does not fire
//! inside "see your".

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Separator used between words of a lead key (`alpha_corp`)
pub const KEY_SEPARATOR: char = '_';

/// Lowercase and trim. Empty input normalizes to an empty string.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Derive a store key from a display name: lowercase, whitespace runs
/// collapsed into a single separator.
pub fn to_key(display_name: &str) -> String {
    display_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(&KEY_SEPARATOR.to_string())
}

/// The "spaced" form of a key, as it would appear in user text
pub fn key_to_spaced(key: &str) -> String {
    key.replace(KEY_SEPARATOR, " ")
}

/// Word tokens of an already normalized message
pub fn tokens(normalized: &str) -> HashSet<&str> {
    normalized.unicode_words().collect()
}

/// Whether the words of `phrase` appear consecutively among the word tokens
/// of `normalized`
pub fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    let wanted: Vec<&str> = phrase.unicode_words().collect();
    if wanted.is_empty() {
        return false;
    }
    let words: Vec<&str> = normalized.unicode_words().collect();
    words.windows(wanted.len()).any(|window| window == wanted.as_slice())
}

/// A fixed set of trigger words and phrases
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    words: Vec<&'static str>,
    phrases: Vec<&'static str>,
}

impl KeywordSet {
    /// Build a set from triggers. Triggers containing whitespace are phrases.
    pub fn new(triggers: &[&'static str]) -> Self {
        let (phrases, words): (Vec<_>, Vec<_>) = triggers
            .iter()
            .copied()
            .partition(|t| t.contains(char::is_whitespace));
        Self { words, phrases }
    }

    /// Triggers of this set present in the message, words first
    pub fn matching<'a>(
        &'a self,
        normalized: &'a str,
        tokens: &'a HashSet<&'a str>,
    ) -> impl Iterator<Item = &'static str> + 'a {
        let words = self
            .words
            .iter()
            .copied()
            .filter(move |w| tokens.contains(*w));
        let phrases = self
            .phrases
            .iter()
            .copied()
            .filter(move |p| contains_phrase(normalized, p));
        words.chain(phrases)
    }

    /// Whether any trigger of this set is present in the message
    pub fn matches(&self, normalized: &str, tokens: &HashSet<&str>) -> bool {
        self.matching(normalized, tokens).next().is_some()
    }

    /// All triggers, words then phrases
    pub fn triggers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.words.iter().chain(self.phrases.iter()).copied()
    }
}
