// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod config_fields;
pub mod config_loader;
pub mod hint_jump_config;

// Re-export.
pub use config_fields::*;
pub use config_loader::*;
pub use hint_jump_config::*;
