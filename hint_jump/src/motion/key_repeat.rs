// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Detects OS key auto-repeat. When a key is held down, the same key arrives every few
//! milliseconds, which must not count as deliberate repeated presses.

use serde::{Deserialize, Serialize};

use crate::TimestampMs;

pub const DEFAULT_KEY_REPEAT_THRESHOLD_MS: u64 = 50;
pub const DEFAULT_KEY_REPEAT_RESET_DELAY_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRepeatConfig {
    pub enabled: bool,
    /// Keys closer together than this are auto-repeat.
    pub threshold_ms: u64,
    /// A gap longer than this ends a repeat burst.
    pub reset_delay_ms: u64,
}

impl Default for KeyRepeatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_ms: DEFAULT_KEY_REPEAT_THRESHOLD_MS,
            reset_delay_ms: DEFAULT_KEY_REPEAT_RESET_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRepeatStatus {
    /// No raw key has been seen yet.
    NotStarted,
    /// Too close to the previous raw key, this is auto-repeat.
    Repeating,
    /// Far enough from the previous raw key, this is a deliberate press.
    Expired,
}

/// Tracks the time of the last raw key event, independently of the motion count. This
/// is a rate limiter over key events that never blocks, it only classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyRepeatTimer {
    /// `0` means no key has been seen.
    pub last_raw_key_time: TimestampMs,
    pub is_repeating: bool,
}

impl KeyRepeatTimer {
    /// Classifies the key at `now` and records it.
    pub fn get_status_and_update_last_key(
        &mut self,
        now: TimestampMs,
        config: &KeyRepeatConfig,
    ) -> KeyRepeatStatus {
        let status = self.get_status(now, config);
        match status {
            KeyRepeatStatus::Repeating => self.is_repeating = true,
            KeyRepeatStatus::NotStarted | KeyRepeatStatus::Expired => {
                let delta = now.saturating_sub(self.last_raw_key_time);
                if delta > config.reset_delay_ms {
                    self.is_repeating = false;
                }
            }
        }
        self.last_raw_key_time = now;
        status
    }

    #[must_use]
    pub fn get_status(&self, now: TimestampMs, config: &KeyRepeatConfig) -> KeyRepeatStatus {
        if self.last_raw_key_time == 0 {
            return KeyRepeatStatus::NotStarted;
        }
        let delta = now.saturating_sub(self.last_raw_key_time);
        if config.enabled && delta < config.threshold_ms {
            KeyRepeatStatus::Repeating
        } else {
            KeyRepeatStatus::Expired
        }
    }

    pub fn reset(&mut self) { *self = Self::default(); }
}
