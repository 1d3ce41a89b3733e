//! Highlight index rewriting
//!
//! Re-pairs every highlight word with a position taken from a fresh
//! [`WordIndex`]. Stale indices are never consulted.
//!
//! Assignment is greedy first-fit per group: walking the group's words in
//! order, each word claims the lowest corpus position of that word not yet
//! claimed in the same group. The Nth "ב" in a group therefore lands on the
//! Nth still-free "ב" in the corpus. Words with no free position are dropped.
//! Groups never share state, so two groups may point at the same position.

use std::collections::HashSet;

use tracing::debug;

use super::document::{HighlightDocument, HighlightGroup, HighlightWord};
use crate::indexing::WordIndex;

/// Outcome of rewriting one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupReport {
    pub label: Option<String>,
    /// Words that found a position.
    pub kept: usize,
    /// Kept words whose index differs from the one they had before.
    pub relocated: usize,
    /// Words that were removed, in group order.
    pub dropped: Vec<String>,
}

impl GroupReport {
    pub fn is_changed(&self) -> bool {
        self.relocated > 0 || !self.dropped.is_empty()
    }
}

/// Outcome of rewriting a whole document, one entry per group in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub groups: Vec<GroupReport>,
}

impl RewriteReport {
    pub fn kept(&self) -> usize {
        self.groups.iter().map(|g| g.kept).sum()
    }

    pub fn relocated(&self) -> usize {
        self.groups.iter().map(|g| g.relocated).sum()
    }

    pub fn dropped(&self) -> usize {
        self.groups.iter().map(|g| g.dropped.len()).sum()
    }

    /// True when the rewrite altered at least one word list.
    pub fn is_changed(&self) -> bool {
        self.groups.iter().any(GroupReport::is_changed)
    }
}

/// First candidate not yet in `used`; claims it.
fn claim_next(candidates: &[usize], used: &mut HashSet<usize>) -> Option<usize> {
    let position = candidates.iter().copied().find(|p| !used.contains(p))?;
    used.insert(position);
    Some(position)
}

/// Rewrite one group in place.
///
/// The rebuilt list keeps the input order of surviving words and carries no
/// index twice.
pub fn rewrite_group(group: &mut HighlightGroup, index: &WordIndex) -> GroupReport {
    let mut used = HashSet::new();
    let mut report = GroupReport {
        label: group.label().map(str::to_owned),
        ..GroupReport::default()
    };
    let mut rebuilt = Vec::with_capacity(group.words().len());

    for HighlightWord(word, previous) in group.words() {
        match claim_next(index.positions(word), &mut used) {
            Some(position) => {
                if Some(position) != *previous {
                    report.relocated += 1;
                }
                rebuilt.push(HighlightWord::new(word.clone(), position));
            }
            None => {
                debug!(
                    group = report.label.as_deref().unwrap_or("-"),
                    word = word.as_str(),
                    stale_index = ?previous,
                    "dropping highlight word with no free position"
                );
                report.dropped.push(word.clone());
            }
        }
    }

    report.kept = rebuilt.len();
    group.replace_words(rebuilt);
    report
}

/// Rewrite every group of `document` in place, in document order.
pub fn rewrite_document(document: &mut HighlightDocument, index: &WordIndex) -> RewriteReport {
    let groups = document
        .groups_mut()
        .iter_mut()
        .map(|group| rewrite_group(group, index))
        .collect();
    RewriteReport { groups }
}
