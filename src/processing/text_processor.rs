//! Tokenization of normalized skill text

use regex::Regex;
use std::collections::HashMap;

/// Words of two or more word characters, the same token rule used at fit and
/// transform time so vocabularies and queries agree
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

pub struct TextProcessor {
    token_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TextProcessor {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextProcessor")
            .field("pattern", &TOKEN_PATTERN)
            .finish()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let token_regex = Regex::new(TOKEN_PATTERN).expect("Invalid token regex");
        Self { token_regex }
    }

    /// Lowercased tokens in document order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Raw term counts for a single document
    pub fn term_counts(&self, text: &str) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for token in self.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }
}
