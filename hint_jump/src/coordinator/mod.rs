// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod collaborators;
pub mod label_cache;
pub mod perf_metrics;
pub mod request_coordinator;

// Re-export.
pub use collaborators::*;
pub use label_cache::*;
pub use perf_metrics::*;
pub use request_coordinator::*;
