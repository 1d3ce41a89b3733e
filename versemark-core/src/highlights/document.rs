//! Highlight document model
//!
//! The highlights file looks like:
//!
//! ```text
//! {
//!     "highlights": [
//!         { "root": "ברא", "words": [["בָּרָא", 1], ["וַיִּבְרָא", 412]] },
//!         ...
//!     ]
//! }
//! ```
//!
//! Only `highlights` and each group's `words` are interpreted. Every other key
//! is carried through untouched and in its original position, so rewriting a
//! file only ever changes the word lists.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use thiserror::Error;

const HIGHLIGHTS_KEY: &str = "highlights";
const WORDS_KEY: &str = "words";
const LABEL_KEY: &str = "root";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid highlight JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected highlight document shape: {0}")]
    Schema(String),
}

/// A `[word, index]` pair.
///
/// The index is `None` when the file held `null` or a negative placeholder.
/// Such words have no position until the next rewrite assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HighlightWord(pub String, pub Option<usize>);

impl HighlightWord {
    pub fn new(word: impl Into<String>, index: usize) -> Self {
        HighlightWord(word.into(), Some(index))
    }

    /// A word that has not been placed in the corpus yet.
    pub fn unassigned(word: impl Into<String>) -> Self {
        HighlightWord(word.into(), None)
    }

    pub fn word(&self) -> &str {
        &self.0
    }

    pub fn index(&self) -> Option<usize> {
        self.1
    }
}

impl<'de> Deserialize<'de> for HighlightWord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (word, index) = <(String, Value)>::deserialize(deserializer)?;
        let index = match index {
            Value::Null => None,
            Value::Number(n) if n.is_u64() => n.as_u64().and_then(|i| usize::try_from(i).ok()),
            // Negative numbers mark words that were never placed
            Value::Number(n) if n.is_i64() => None,
            other => {
                return Err(de::Error::custom(format!(
                    "index must be an integer or null, found {}",
                    other
                )))
            }
        };
        Ok(HighlightWord(word, index))
    }
}

/// One highlight group: its word list plus whatever else the object holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct HighlightGroup {
    /// All fields in file order; the `words` entry is refreshed on output.
    fields: Map<String, Value>,
    words: Vec<HighlightWord>,
}

impl HighlightGroup {
    pub fn new(words: Vec<HighlightWord>) -> Self {
        let mut fields = Map::new();
        fields.insert(WORDS_KEY.to_owned(), Value::Null);
        HighlightGroup { fields, words }
    }

    pub fn words(&self) -> &[HighlightWord] {
        &self.words
    }

    /// Replace the word list, returning the previous one.
    pub fn replace_words(&mut self, words: Vec<HighlightWord>) -> Vec<HighlightWord> {
        std::mem::replace(&mut self.words, words)
    }

    /// The group's `root` field, when it is a string.
    pub fn label(&self) -> Option<&str> {
        self.fields.get(LABEL_KEY).and_then(Value::as_str)
    }

    /// A field other than `words`, exactly as read.
    pub fn field(&self, key: &str) -> Option<&Value> {
        if key == WORDS_KEY {
            return None;
        }
        self.fields.get(key)
    }
}

impl TryFrom<Map<String, Value>> for HighlightGroup {
    type Error = DocumentError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let raw = fields
            .get(WORDS_KEY)
            .ok_or_else(|| DocumentError::Schema("highlight group has no `words`".into()))?;
        let words = Vec::<HighlightWord>::deserialize(raw).map_err(|e| {
            DocumentError::Schema(format!("`words` must be [word, index] pairs: {}", e))
        })?;
        Ok(HighlightGroup { fields, words })
    }
}

impl From<HighlightGroup> for Map<String, Value> {
    fn from(group: HighlightGroup) -> Self {
        let HighlightGroup { mut fields, words } = group;
        let words = words
            .into_iter()
            .map(|HighlightWord(word, index)| Value::Array(vec![word.into(), index.into()]))
            .collect();
        // Overwriting an existing key keeps its position
        fields.insert(WORDS_KEY.to_owned(), Value::Array(words));
        fields
    }
}

/// The whole highlights file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct HighlightDocument {
    fields: Map<String, Value>,
    groups: Vec<HighlightGroup>,
}

impl HighlightDocument {
    pub fn new(groups: Vec<HighlightGroup>) -> Self {
        let mut fields = Map::new();
        fields.insert(HIGHLIGHTS_KEY.to_owned(), Value::Null);
        HighlightDocument { fields, groups }
    }

    pub fn from_json_str(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn groups(&self) -> &[HighlightGroup] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [HighlightGroup] {
        &mut self.groups
    }

    /// Serialize with `indent` spaces per level and non-ASCII text kept as is.
    ///
    /// No trailing newline is written.
    pub fn to_pretty_json(&self, indent: usize) -> Result<String, DocumentError> {
        let indent = " ".repeat(indent);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever emits valid UTF-8
        String::from_utf8(out).map_err(|e| DocumentError::Schema(e.to_string()))
    }
}

impl TryFrom<Map<String, Value>> for HighlightDocument {
    type Error = DocumentError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let raw = fields.get(HIGHLIGHTS_KEY).ok_or_else(|| {
            DocumentError::Schema(format!("missing top-level `{}`", HIGHLIGHTS_KEY))
        })?;
        let Value::Array(items) = raw else {
            return Err(DocumentError::Schema(format!(
                "`{}` must be an array",
                HIGHLIGHTS_KEY
            )));
        };
        let groups = items
            .iter()
            .enumerate()
            .map(|(position, item)| match item {
                Value::Object(map) => HighlightGroup::try_from(map.clone()).map_err(|e| match e {
                    DocumentError::Schema(msg) => {
                        DocumentError::Schema(format!("group {}: {}", position + 1, msg))
                    }
                    other => other,
                }),
                _ => Err(DocumentError::Schema(format!(
                    "group {} is not an object",
                    position + 1
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HighlightDocument { fields, groups })
    }
}

impl From<HighlightDocument> for Map<String, Value> {
    fn from(document: HighlightDocument) -> Self {
        let HighlightDocument { mut fields, groups } = document;
        let groups = groups
            .into_iter()
            .map(|group| Value::Object(group.into()))
            .collect();
        fields.insert(HIGHLIGHTS_KEY.to_owned(), Value::Array(groups));
        fields
    }
}
