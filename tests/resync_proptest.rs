//! Property-based tests for tokenizing, indexing and rewriting
//!
//! These check the invariants the rewrite relies on over generated corpora
//! and highlight groups, rather than hand-picked examples.

use proptest::prelude::*;
use std::collections::HashSet;
use versemark::{
    rewrite_document, tokenize, HighlightDocument, HighlightGroup, HighlightWord, WordIndex, MAQAF,
};

const WORDS: &[&str] = &["א", "ב", "ג", "אֵת", "הָאָרֶץ", "שָׁלוֹם", "1"];

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == MAQAF
}

/// Words joined by assorted delimiter runs, with optional padding.
fn corpus_strategy() -> impl Strategy<Value = String> {
    let delimiter = prop_oneof![
        Just(" ".to_string()),
        Just("\n".to_string()),
        Just("\u{05BE}".to_string()),
        Just(" \u{05BE} ".to_string()),
        Just("\t\t".to_string()),
    ];
    (
        prop::collection::vec((prop::sample::select(WORDS), delimiter), 0..40),
        prop_oneof![Just(""), Just("  "), Just("\n")],
    )
        .prop_map(|(pieces, pad)| {
            let mut text = pad.to_string();
            for (word, delimiter) in pieces {
                text.push_str(word);
                text.push_str(&delimiter);
            }
            text
        })
}

/// Free-form text mixing letters with every kind of delimiter.
fn raw_text_strategy() -> impl Strategy<Value = String> {
    "[אבגa-c \t\n\u{05BE}\u{00A0}]{0,60}"
}

fn groups_strategy() -> impl Strategy<Value = Vec<Vec<HighlightWord>>> {
    prop::collection::vec(
        prop::collection::vec(
            (prop::sample::select(WORDS), prop::option::of(0usize..60))
                .prop_map(|(word, stale)| HighlightWord(word.to_string(), stale)),
            0..12,
        ),
        0..5,
    )
}

fn document(groups: &[Vec<HighlightWord>]) -> HighlightDocument {
    HighlightDocument::new(groups.iter().cloned().map(HighlightGroup::new).collect())
}

/// True when `sub` appears in `full` in order, gaps allowed.
fn is_subsequence(sub: &[&str], full: &[&str]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|word| rest.any(|candidate| candidate == word))
}

proptest! {
    #[test]
    fn tokens_are_the_non_delimiter_runs(text in raw_text_strategy()) {
        let tokens = tokenize(&text);
        let expected: Vec<&str> = text.split(is_delimiter).filter(|t| !t.is_empty()).collect();

        prop_assert!(tokens.iter().all(|t| !t.is_empty()));
        prop_assert_eq!(tokens, expected);
    }

    #[test]
    fn retokenizing_joined_tokens_is_stable(text in corpus_strategy()) {
        let tokens = tokenize(&text);
        prop_assert_eq!(tokenize(&tokens.join(" ")), tokens);
    }

    #[test]
    fn index_lists_every_position(text in corpus_strategy()) {
        let tokens = tokenize(&text);
        let index = WordIndex::from_tokens(&tokens);

        for (position, token) in tokens.iter().enumerate() {
            prop_assert!(index.positions(token).contains(&position));
        }
        for token in &tokens {
            let positions = index.positions(token);
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(positions.iter().all(|&p| &tokens[p] == token));
        }
    }

    #[test]
    fn rewrite_keeps_group_invariants(text in corpus_strategy(), groups in groups_strategy()) {
        let tokens = tokenize(&text);
        let index = WordIndex::from_tokens(&tokens);
        let mut doc = document(&groups);

        let report = rewrite_document(&mut doc, &index);

        prop_assert_eq!(doc.groups().len(), groups.len());
        prop_assert_eq!(report.groups.len(), groups.len());
        for ((input, output), group_report) in groups.iter().zip(doc.groups()).zip(&report.groups) {
            let words = output.words();
            prop_assert!(words.len() <= input.len());
            prop_assert_eq!(words.len() + group_report.dropped.len(), input.len());

            let indices: Vec<usize> = words.iter().filter_map(HighlightWord::index).collect();
            prop_assert_eq!(indices.len(), words.len());
            let distinct: HashSet<usize> = indices.iter().copied().collect();
            prop_assert_eq!(distinct.len(), words.len());

            for (word, index) in words.iter().zip(indices) {
                prop_assert_eq!(tokens[index].as_str(), word.word());
            }

            let before: Vec<&str> = input.iter().map(HighlightWord::word).collect();
            let after: Vec<&str> = words.iter().map(HighlightWord::word).collect();
            prop_assert!(is_subsequence(&after, &before));
        }
    }

    #[test]
    fn nth_occurrence_claims_nth_position(text in corpus_strategy(), groups in groups_strategy()) {
        let index = WordIndex::from_tokens(&tokenize(&text));
        let mut doc = document(&groups);

        rewrite_document(&mut doc, &index);

        for (input, output) in groups.iter().zip(doc.groups()) {
            for word in WORDS {
                let requested = input.iter().filter(|w| w.word() == *word).count();
                let available = index.positions(word);
                let assigned: Vec<usize> = output
                    .words()
                    .iter()
                    .filter(|w| w.word() == *word)
                    .filter_map(HighlightWord::index)
                    .collect();
                let expected = &available[..requested.min(available.len())];
                prop_assert_eq!(assigned.as_slice(), expected);
            }
        }
    }

    #[test]
    fn second_rewrite_changes_nothing(text in corpus_strategy(), groups in groups_strategy()) {
        let index = WordIndex::from_tokens(&tokenize(&text));
        let mut doc = document(&groups);

        rewrite_document(&mut doc, &index);
        let first = doc.clone();
        let report = rewrite_document(&mut doc, &index);

        prop_assert!(!report.is_changed());
        prop_assert_eq!(doc, first);
    }
}
