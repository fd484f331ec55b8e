// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pairs labels with words. The closest word to the cursor gets the first (shortest)
//! label.
//!
//! 1. Words shorter than `min_word_length` and the word under the cursor are dropped.
//! 2. The rest is stable sorted by `(line distance, column distance)`. Words in a window
//!    other than the active one get [`MULTI_WINDOW_LINE_OFFSET`] added to their line
//!    distance, so every word of the active window is labeled first. The emitted
//!    [`Word::line`] is never changed.
//! 3. Labels are handed out positionally.
//! 4. Words on the same line that touch (or nearly touch) are checked for clashing
//!    labels, and the rightmost one falls back to [`HintPosition::Start`].

use rustc_hash::FxHashMap;

use crate::{CursorPos, EditorMode, HintMapping, HintPosition, InlineVec, Label, WindowId,
            Word};

/// Synthetic line distance added to words outside the active window.
pub const MULTI_WINDOW_LINE_OFFSET: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignOptions {
    pub hint_position: HintPosition,
    /// Used instead of `hint_position` in [`EditorMode::Visual`], when set.
    pub visual_hint_position: Option<HintPosition>,
    pub min_word_length: usize,
    /// `None` treats every word as part of the active window.
    pub active_window: Option<WindowId>,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            hint_position: HintPosition::Start,
            visual_hint_position: None,
            min_word_length: 1,
            active_window: None,
        }
    }
}

impl AssignOptions {
    #[must_use]
    pub fn position_for(&self, mode: EditorMode) -> HintPosition {
        match mode {
            EditorMode::Normal => self.hint_position,
            EditorMode::Visual => self.visual_hint_position.unwrap_or(self.hint_position),
        }
    }

    #[must_use]
    pub fn is_in_active_window(&self, word: &Word) -> bool {
        match (word.window_id, self.active_window) {
            (Some(window_id), Some(active_window)) => window_id == active_window,
            _ => true,
        }
    }
}

/// Assigns `labels` to `words`. Never fails: empty inputs give an empty result, and
/// when there are fewer labels than words, the farthest words get no hint.
#[must_use]
pub fn assign_hints(
    words: &[Word],
    labels: &[Label],
    cursor: CursorPos,
    mode: EditorMode,
    options: &AssignOptions,
) -> Vec<HintMapping> {
    if words.is_empty() || labels.is_empty() {
        return vec![];
    }

    let mut candidates: Vec<&Word> = words
        .iter()
        .filter(|word| word.char_len() >= options.min_word_length)
        .filter(|word| !is_under_cursor(word, cursor, options))
        .collect();

    // Stable, so detection order breaks ties.
    candidates.sort_by_key(|word| distance_key(word, cursor, options));
    candidates.truncate(labels.len());

    let requested = options.position_for(mode);
    let placements = resolve_placements(&candidates, labels, requested);

    candidates
        .into_iter()
        .zip(labels.iter())
        .zip(placements)
        .map(|((word, hint), placement)| {
            let (hint_col, hint_byte_col) = hint_columns(word, placement);
            HintMapping {
                word: word.clone(),
                hint: hint.clone(),
                hint_col,
                hint_byte_col,
                placement,
            }
        })
        .collect()
}

/// `(line distance, column distance)`, with the window penalty folded into the line
/// distance.
#[must_use]
pub fn distance_key(word: &Word, cursor: CursorPos, options: &AssignOptions) -> (usize, usize) {
    let penalty = if options.is_in_active_window(word) {
        0
    } else {
        MULTI_WINDOW_LINE_OFFSET
    };
    (
        word.line.abs_diff(cursor.line) + penalty,
        word.col.abs_diff(cursor.col),
    )
}

fn is_under_cursor(word: &Word, cursor: CursorPos, options: &AssignOptions) -> bool {
    options.is_in_active_window(word)
        && word.line == cursor.line
        && word.col <= cursor.col
        && cursor.col < word.col + word.char_len()
}

/// Display and byte column of the label for `word`.
#[must_use]
pub fn hint_columns(word: &Word, placement: HintPosition) -> (usize, usize) {
    match placement {
        HintPosition::Start | HintPosition::Overlay => (word.col, word.effective_byte_col()),
        HintPosition::End => {
            // Byte length, so multi byte text lands on its last byte.
            let offset = word.byte_len().saturating_sub(1);
            (word.col + offset, word.effective_byte_col() + offset)
        }
    }
}

/// Placement for each candidate, in candidate order. Candidates are grouped by window
/// and line first, so only neighbours on the same line are compared.
///
/// When the later of two adjacent words still clashes at [`HintPosition::Start`], the
/// earlier one moves to [`HintPosition::Start`] too, unless that makes it clash with its
/// own left neighbour. A label longer than its word plus the gap can still overlap the
/// next word; no placement avoids that.
fn resolve_placements(
    candidates: &[&Word],
    labels: &[Label],
    requested: HintPosition,
) -> Vec<HintPosition> {
    let mut placements = vec![requested; candidates.len()];
    if requested == HintPosition::Start {
        return placements;
    }

    let mut lines: FxHashMap<(Option<WindowId>, usize), InlineVec<usize>> =
        FxHashMap::default();
    for (index, word) in candidates.iter().enumerate() {
        lines
            .entry((word.window_id, word.line))
            .or_default()
            .push(index);
    }

    for indices in lines.values_mut() {
        if indices.len() < 2 {
            continue;
        }
        indices.sort_by_key(|&index| candidates[index].col);

        for position in 1..indices.len() {
            let (prev, next) = (indices[position - 1], indices[position]);
            if !is_adjacent(candidates[prev], candidates[next]) {
                continue;
            }

            let clashes = |placements: &[HintPosition], left: usize, right: usize| {
                let (left_col, _) = hint_columns(candidates[left], placements[left]);
                let left_label_end = left_col + labels[left].chars().count().saturating_sub(1);
                let (right_col, _) = hint_columns(candidates[right], placements[right]);
                left_label_end >= right_col
            };

            if placements[next] == HintPosition::End && clashes(&placements, prev, next) {
                tracing::trace!(
                    message = "Adjacent labels clash, using start placement",
                    line = candidates[next].line,
                    col = candidates[next].col,
                );
                placements[next] = HintPosition::Start;
            }

            if placements[prev] == HintPosition::End && clashes(&placements, prev, next) {
                let mut moved = placements.clone();
                moved[prev] = HintPosition::Start;
                let left_ok = position < 2 || !clashes(&moved, indices[position - 2], prev);
                if left_ok {
                    placements[prev] = HintPosition::Start;
                }
            }
        }
    }

    placements
}

/// Both words are on the same line (the caller guarantees it) and at most one column
/// apart.
fn is_adjacent(prev: &Word, next: &Word) -> bool {
    next.col <= prev.col + prev.char_len() + 1
}
