// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::Word;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VisualMode {
    Characterwise,
    Linewise,
    Blockwise,
    #[default]
    None,
}

/// An inclusive line range of a visual selection. `start_line` and `end_line` may be
/// given in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualRange {
    pub mode: VisualMode,
    pub start_line: usize,
    pub end_line: usize,
}

impl VisualRange {
    #[must_use]
    pub fn new(mode: VisualMode, start_line: usize, end_line: usize) -> Self {
        Self {
            mode,
            start_line: start_line.min(end_line),
            end_line: start_line.max(end_line),
        }
    }

    #[must_use]
    pub fn contains_line(&self, line: usize) -> bool {
        self.mode == VisualMode::None || (self.start_line..=self.end_line).contains(&line)
    }
}

/// Words on lines covered by `range`. [`VisualMode::None`] keeps everything.
#[must_use]
pub fn filter_words_in_range(words: &[Word], range: &VisualRange) -> Vec<Word> {
    words
        .iter()
        .filter(|word| range.contains_line(word.line))
        .cloned()
        .collect()
}
