// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod hint_assigner;
pub mod hint_input;
pub mod hint_types;
pub mod label_generator;
pub mod label_pool;
pub mod visual_range;

// Re-export.
pub use hint_assigner::*;
pub use hint_input::*;
pub use hint_types::*;
pub use label_generator::*;
pub use label_pool::*;
pub use visual_range::*;
