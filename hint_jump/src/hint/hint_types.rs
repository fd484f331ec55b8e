// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::InlineString;

/// A short typeable string drawn over a word, eg: `"a"`, `"bc"` or `"01"`.
pub type Label = InlineString;

/// Opaque id of a window in the host. Hints for words in other windows than the active
/// one are ordered after every word of the active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Opaque id of a buffer in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BufferId(pub u64);

/// A word produced by a [`crate::WordSource`]. `col` is a display column in the host's
/// coordinate convention. When `byte_col` is present it is used for byte placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub line: usize,
    pub col: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_col: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_id: Option<WindowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_id: Option<BufferId>,
}

impl Word {
    #[must_use]
    pub fn new(text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            text: text.into(),
            line,
            col,
            byte_col: None,
            window_id: None,
            buffer_id: None,
        }
    }

    #[must_use]
    pub fn with_byte_col(mut self, byte_col: usize) -> Self {
        self.byte_col = Some(byte_col);
        self
    }

    #[must_use]
    pub fn with_window(mut self, window_id: WindowId) -> Self {
        self.window_id = Some(window_id);
        self
    }

    #[must_use]
    pub fn with_buffer(mut self, buffer_id: BufferId) -> Self {
        self.buffer_id = Some(buffer_id);
        self
    }

    #[must_use]
    pub fn char_len(&self) -> usize { self.text.chars().count() }

    #[must_use]
    pub fn byte_len(&self) -> usize { self.text.len() }

    #[must_use]
    pub fn effective_byte_col(&self) -> usize { self.byte_col.unwrap_or(self.col) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorPos {
    pub line: usize,
    pub col: usize,
}

impl CursorPos {
    #[must_use]
    pub fn new(line: usize, col: usize) -> Self { Self { line, col } }
}

/// Where a label is drawn relative to its word.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HintPosition {
    /// First column of the word.
    #[default]
    Start,
    /// Last byte of the word.
    End,
    /// Same column as [`HintPosition::Start`], but the renderer composites the label
    /// over the text instead of inserting it.
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "snake_case")]
pub enum EditorMode {
    #[default]
    Normal,
    Visual,
}

/// One displayable hint. `placement` is the position that was actually used, which
/// can differ from the requested one when adjacent words would have clashing labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintMapping {
    pub word: Word,
    pub hint: Label,
    pub hint_col: usize,
    pub hint_byte_col: usize,
    pub placement: HintPosition,
}

impl HintMapping {
    #[must_use]
    pub fn is_overlay(&self) -> bool { self.placement == HintPosition::Overlay }
}
