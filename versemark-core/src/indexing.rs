//! Word position index
//!
//! Maps every distinct token to the ascending list of positions where it
//! occurs in the token sequence.

use std::collections::HashMap;

/// Read-only word → positions lookup built from one token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordIndex {
    positions: HashMap<String, Vec<usize>>,
    token_count: usize,
}

impl WordIndex {
    /// Build the index in a single left-to-right pass, so every position list
    /// is ascending.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, token) in tokens.iter().enumerate() {
            positions
                .entry(token.as_ref().to_owned())
                .or_default()
                .push(position);
        }
        WordIndex {
            positions,
            token_count: tokens.len(),
        }
    }

    /// Positions of `word`; empty when the word never occurs.
    pub fn positions(&self, word: &str) -> &[usize] {
        self.positions.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.positions.contains_key(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Length of the token sequence the index was built from.
    pub fn token_count(&self) -> usize {
        self.token_count
    }
}
