//! Corpus tokenization
//!
//! Splits corpus text into the ordered word sequence whose positions every
//! highlight index refers to. A boundary is any run of whitespace and extra
//! delimiter characters; for Hebrew text the extra delimiter is the maqaf
//! (U+05BE), which joins words visually but separates them for indexing.
//!
//! ```text
//! "בְּרֵאשִׁית בָּרָא אֱלֹהִים אֵת־הַשָּׁמַיִם"  ->  [בְּרֵאשִׁית, בָּרָא, אֱלֹהִים, אֵת, הַשָּׁמַיִם]
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Hebrew maqaf, the word-joining hyphen.
pub const MAQAF: char = '\u{05BE}';

/// Whitespace-or-maqaf boundary used by [`Tokenizer::hebrew`].
static HEBREW_BOUNDARY: Lazy<Regex> = Lazy::new(|| boundary_regex(&[MAQAF]));

fn boundary_regex(extra: &[char]) -> Regex {
    let class: String = extra
        .iter()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    // Escaped single characters are always valid inside a class
    Regex::new(&format!(r"[\s{}]+", class)).expect("delimiter class is a valid regex")
}

/// Word splitter with a configurable set of extra delimiter characters.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    boundary: Regex,
    delimiters: Vec<char>,
}

impl Tokenizer {
    /// Whitespace plus maqaf.
    pub fn hebrew() -> Self {
        Tokenizer {
            boundary: HEBREW_BOUNDARY.clone(),
            delimiters: vec![MAQAF],
        }
    }

    /// Whitespace plus every character in `extra`.
    ///
    /// Duplicates are ignored and an empty set leaves plain whitespace
    /// splitting.
    pub fn with_delimiters<I>(extra: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut delimiters: Vec<char> = Vec::new();
        for c in extra {
            if !delimiters.contains(&c) {
                delimiters.push(c);
            }
        }
        if delimiters == [MAQAF] {
            return Self::hebrew();
        }
        Tokenizer {
            boundary: boundary_regex(&delimiters),
            delimiters,
        }
    }

    /// The extra (non-whitespace) delimiters in effect.
    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    /// Split `text` into word tokens.
    ///
    /// Surrounding whitespace is trimmed first. Never yields empty tokens, so
    /// empty or delimiter-only text produces an empty vector.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.boundary
            .split(text.trim())
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::hebrew()
    }
}

/// Tokenize with the default whitespace-or-maqaf rule.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::hebrew().tokenize(text)
}
