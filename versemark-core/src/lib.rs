//! # versemark-core
//!
//! Keeps highlight annotations pointing at the right words after the corpus
//! they annotate has been edited.
//!
//! A run is a straight pipeline:
//!
//! ```text
//! corpus text ── tokenizing ──> tokens ── indexing ──> WordIndex ─┐
//!                                                                 ├─ rewriter ──> highlights JSON
//!                                        highlights JSON ─────────┘
//! ```
//!
//! [`sync::SyncJob`] wires the steps to files; the individual modules can be
//! used on their own for in-memory work.

pub mod highlights;
pub mod indexing;
pub mod sync;
pub mod tokenizing;

pub use highlights::{
    rewrite_document, DocumentError, GroupReport, HighlightDocument, HighlightGroup,
    HighlightWord, RewriteReport,
};
pub use indexing::WordIndex;
pub use sync::{resync_str, SyncError, SyncJob, SyncOutcome};
pub use tokenizing::{tokenize, Tokenizer, MAQAF};
