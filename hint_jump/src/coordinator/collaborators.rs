// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The host side of the engine. Finding words, knowing where the cursor is and drawing
//! labels are all done by the host, through these traits.

use crate::{CursorPos, HintMapping, Word};

/// Lists the words that are currently visible. Expected to be fast.
pub trait WordSource: Send + Sync {
    fn list_visible_words(&self) -> Vec<Word>;
}

pub trait CursorSource: Send + Sync {
    fn cursor_position(&self) -> CursorPos;
}

/// Draws labels. Both methods must be idempotent. [`HintRenderer::render`] may be
/// called several times per show request, once per batch.
pub trait HintRenderer: Send + Sync {
    fn render(&self, hints: &[HintMapping]);
    fn clear(&self);
}

impl<F> WordSource for F
where
    F: Fn() -> Vec<Word> + Send + Sync,
{
    fn list_visible_words(&self) -> Vec<Word> { self() }
}

/// A cursor that never moves.
impl CursorSource for CursorPos {
    fn cursor_position(&self) -> CursorPos { *self }
}
