// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod key_repeat;
pub mod motion_detector;
pub mod motion_kind;

// Re-export.
pub use key_repeat::*;
pub use motion_detector::*;
pub use motion_kind::*;
