//! File-level synchronization
//!
//! `SyncJob` reads the corpus and the highlights file completely, rewrites the
//! highlight indices in memory and writes the result once. Nothing is written
//! when reading or parsing fails, so a failed run leaves the files as they were.
//!
//! # Example
//!
//! ```rust
//! use versemark_core::SyncJob;
//!
//! let outcome = SyncJob::new("public/verses.txt", "public/highlights.json")
//!     .run()
//!     .unwrap();
//! println!("{} words kept", outcome.report.kept());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::highlights::{rewrite_document, DocumentError, HighlightDocument, RewriteReport};
use crate::indexing::WordIndex;
use crate::tokenizing::Tokenizer;

/// Indentation of the published highlights files.
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize highlights")]
    Serialize(#[source] DocumentError),
}

/// Result of a sync run.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub report: RewriteReport,
    /// Number of tokens in the corpus.
    pub token_count: usize,
    /// The rewritten highlights file contents.
    pub json: String,
    /// `json` is byte-for-byte what the highlights file already holds.
    pub in_sync: bool,
    /// Where the result went, or would go in a dry run.
    pub output: PathBuf,
    pub written: bool,
}

/// Rewrite highlight JSON against corpus text, entirely in memory.
pub fn resync_str(
    corpus: &str,
    highlights: &str,
    tokenizer: &Tokenizer,
    indent: usize,
) -> Result<(String, RewriteReport), DocumentError> {
    let mut document = HighlightDocument::from_json_str(highlights)?;
    let index = WordIndex::from_tokens(&tokenizer.tokenize(corpus));
    let report = rewrite_document(&mut document, &index);
    Ok((document.to_pretty_json(indent)?, report))
}

/// One corpus + highlights pair and how to process it.
#[derive(Debug, Clone)]
pub struct SyncJob {
    corpus: PathBuf,
    highlights: PathBuf,
    output: Option<PathBuf>,
    tokenizer: Tokenizer,
    indent: usize,
}

impl SyncJob {
    /// Rewrite `highlights` in place using the Hebrew tokenizer.
    pub fn new(corpus: impl Into<PathBuf>, highlights: impl Into<PathBuf>) -> Self {
        SyncJob {
            corpus: corpus.into(),
            highlights: highlights.into(),
            output: None,
            tokenizer: Tokenizer::hebrew(),
            indent: DEFAULT_INDENT,
        }
    }

    /// Write the result to `output` instead of overwriting the input.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn corpus_path(&self) -> &Path {
        &self.corpus
    }

    pub fn highlights_path(&self) -> &Path {
        &self.highlights
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Destination of the rewritten file.
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.highlights)
    }

    /// Rewrite and write the result.
    pub fn run(&self) -> Result<SyncOutcome, SyncError> {
        let mut outcome = self.compute()?;
        fs::write(&outcome.output, &outcome.json).map_err(|source| SyncError::Write {
            path: outcome.output.clone(),
            source,
        })?;
        outcome.written = true;
        info!(path = %outcome.output.display(), "wrote highlights");
        Ok(outcome)
    }

    /// Rewrite without touching the filesystem.
    pub fn check(&self) -> Result<SyncOutcome, SyncError> {
        self.compute()
    }

    fn compute(&self) -> Result<SyncOutcome, SyncError> {
        // Both inputs are read in full before any processing
        let corpus = read(&self.corpus)?;
        let source = read(&self.highlights)?;

        let tokens = self.tokenizer.tokenize(&corpus);
        let index = WordIndex::from_tokens(&tokens);
        debug!(
            tokens = tokens.len(),
            distinct = index.len(),
            "indexed corpus"
        );

        let mut document =
            HighlightDocument::from_json_str(&source).map_err(|source| SyncError::Parse {
                path: self.highlights.clone(),
                source,
            })?;
        let report = rewrite_document(&mut document, &index);
        info!(
            groups = report.groups.len(),
            kept = report.kept(),
            relocated = report.relocated(),
            dropped = report.dropped(),
            "rewrote highlight indices"
        );

        let json = document
            .to_pretty_json(self.indent)
            .map_err(SyncError::Serialize)?;
        let in_sync = json == source;
        Ok(SyncOutcome {
            report,
            token_count: tokens.len(),
            in_sync,
            json,
            output: self.output_path().to_path_buf(),
            written: false,
        })
    }
}

fn read(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })
}
