// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `r3bl_hint_jump`
//!
//! Overlay short, typeable hint labels onto the words that are visible in an editing
//! surface, so that the user can jump to any of them with one or two keystrokes. The
//! crate also decides *when* that overlay should appear, by watching for repeated
//! directional input.
//!
//! The pieces, bottom up:
//!
//! 1. [`LabelPoolConfig`] and [`generate_labels`] turn a word count and two key pools
//!    (single char keys and multi char keys) into an ordered, unique, prefix-free
//!    sequence of labels.
//! 2. [`assign_hints`] pairs those labels with [`Word`]s, closest to the cursor first,
//!    pushing words in other windows to the back, and computes where each label is
//!    drawn ([`HintPosition`]).
//! 3. [`MotionDetector`] is a small state machine fed with key events. It reports
//!    [`MotionDecision::trigger`] once the same motion key has been pressed
//!    `threshold` times within a timeout, while ignoring OS key-repeat bursts and
//!    counted motions like `5j`.
//! 4. [`RequestCoordinator`] glues it together on a tokio runtime: it debounces show
//!    requests (the most recent wins), caches the last generated labels, and renders
//!    hints in batches that can be cancelled by a hide request.
//!
//! Tokenization and drawing are not part of this crate. They are injected through the
//! [`WordSource`], [`CursorSource`] and [`HintRenderer`] traits.
//!
//! Configuration lives in [`HintJumpConfig`], which can be loaded leniently from JSON
//! (accepting historical field names) or validated strictly with [`validate_config`].

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod config;
pub mod coordinator;
pub mod core;
pub mod hint;
pub mod motion;

// Re-export.
pub use config::*;
pub use coordinator::*;
pub use core::*;
pub use hint::*;
pub use motion::*;
