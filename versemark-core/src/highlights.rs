//! Highlight documents and the index rewriter that keeps them in sync with
//! the corpus.

pub mod document;
pub mod rewriter;

pub use document::{DocumentError, HighlightDocument, HighlightGroup, HighlightWord};
pub use rewriter::{rewrite_document, rewrite_group, GroupReport, RewriteReport};
