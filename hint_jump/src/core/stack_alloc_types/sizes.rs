// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Small inline storage used for labels and key names. Labels are one or two chars long
//! so they almost never spill on the heap.

use smallstr::SmallString;
use smallvec::SmallVec;

pub const DEFAULT_STRING_STORAGE_SIZE: usize = 16;
pub const DEFAULT_CHAR_STORAGE_SIZE: usize = 4;
pub const INLINE_VEC_SIZE: usize = 8;

/// Stack allocated string storage for small strings. When this gets larger than
/// [`DEFAULT_STRING_STORAGE_SIZE`], it will be [`smallvec::SmallVec::spilled`] on the
/// heap.
pub type InlineString = SmallString<[u8; DEFAULT_STRING_STORAGE_SIZE]>;

/// Stack allocated storage for a single key name, eg: `"j"` or `"$"`.
pub type TinyInlineString = SmallString<[u8; DEFAULT_CHAR_STORAGE_SIZE]>;

/// Stack allocated list. When this gets larger than [`INLINE_VEC_SIZE`], it will be
/// [`smallvec::SmallVec::spilled`] on the heap.
pub type InlineVec<T> = SmallVec<[T; INLINE_VEC_SIZE]>;
