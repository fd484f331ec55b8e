// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Millisecond timestamps for the motion state machine. The detector never reads the
//! wall clock itself, it is handed a [`Clock`] so tests can drive time by hand.

use std::{sync::{Arc,
                 atomic::{AtomicU64, Ordering}},
          time::{SystemTime, UNIX_EPOCH}};

/// Milliseconds since an arbitrary, monotonic-enough epoch. `0` means "never".
pub type TimestampMs = u64;

pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now_ms(&self) -> TimestampMs;
}

/// Wall clock, milliseconds since the unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> TimestampMs {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|it| u64::try_from(it.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: TimestampMs) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: TimestampMs) { self.now.store(now_ms, Ordering::SeqCst); }

    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> TimestampMs { self.now.load(Ordering::SeqCst) }
}
