//! # versemark
//!
//! Keeps highlight annotations on a Hebrew corpus pointing at the right words
//! after the corpus has been edited.
//!
//! The work is split across the workspace:
//!
//! - `versemark-core`: tokenizer, word index, highlight document and rewriter
//! - `versemark-config`: layered configuration with embedded defaults
//! - `versemark-cli`: the `versemark` binary
//!
//! This crate re-exports the first two so library users need one dependency.

pub use versemark_config as config;
pub use versemark_core::*;
