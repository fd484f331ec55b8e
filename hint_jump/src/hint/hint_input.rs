// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Incremental label input. As the user types, the visible hints are narrowed down to
//! the ones whose label starts with the typed text, until exactly one label matches.
//! Matching is case-insensitive.

use crate::{HintMapping, LabelPoolConfig, fold_case};

/// Outcome of feeding the typed text to [`resolve_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResolution {
    /// The text is a complete label. Jump to this word.
    Jump(HintMapping),
    /// The text is a prefix of these labels.
    Narrowed(Vec<HintMapping>),
    /// Nothing starts with the text.
    NoMatch,
}

/// Hints whose label starts with `input`, case-insensitively. Empty `input` keeps
/// everything.
#[must_use]
pub fn filter_by_prefix(hints: &[HintMapping], input: &str) -> Vec<HintMapping> {
    let input = fold_case(input);
    hints
        .iter()
        .filter(|it| fold_case(&it.hint).starts_with(&input))
        .cloned()
        .collect()
}

#[must_use]
pub fn resolve_input(hints: &[HintMapping], input: &str) -> InputResolution {
    let folded_input = fold_case(input);
    if let Some(exact) = hints.iter().find(|it| fold_case(&it.hint) == folded_input) {
        // Labels are prefix-free, so an exact match is the only candidate left.
        return InputResolution::Jump(exact.clone());
    }

    let candidates = filter_by_prefix(hints, input);
    if candidates.is_empty() {
        InputResolution::NoMatch
    } else {
        InputResolution::Narrowed(candidates)
    }
}

/// `true` if `ch` can be part of a label produced from `pool`. Control chars (`ESC`,
/// `Enter`, etc.) never are, so the caller can treat them as "cancel".
#[must_use]
pub fn is_valid_input_char(ch: char, pool: &LabelPoolConfig) -> bool {
    pool.accepts_input_char(ch)
}
