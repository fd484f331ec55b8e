// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Decides when repeated motion keys should show hints. Pressing `j` three times in a
//! row (within the timeout) triggers, while these don't count:
//! - a motion with an explicit count, like `3j`,
//! - OS auto-repeat from holding a key down,
//! - a press after the timeout, which starts a new counting window.
//!
//! There is no state enum. The behavior follows from [`MotionState`] and the
//! independent [`KeyRepeatTimer`].

use std::sync::Arc;

use strum_macros::{Display, EnumString};

use crate::{BufferId, Clock, HintJumpConfig, KeyRepeatConfig, KeyRepeatStatus,
            KeyRepeatTimer, SystemClock, TimestampMs, TinyInlineString,
            is_counted_motion, resolve_motion_threshold};

pub const DEFAULT_MOTION_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_MOTION_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionState {
    /// Empty when nothing has been counted.
    pub last_motion_key: TinyInlineString,
    pub last_motion_time: TimestampMs,
    pub motion_count: u32,
    pub timeout_ms: u64,
    pub threshold: u32,
}

impl MotionState {
    #[must_use]
    pub fn new(timeout_ms: u64, threshold: u32) -> Self {
        Self {
            last_motion_key: TinyInlineString::new(),
            last_motion_time: 0,
            motion_count: 0,
            timeout_ms,
            threshold,
        }
    }

    /// Back to the initial state, keeping the timeout and threshold.
    pub fn reset(&mut self) { *self = Self::new(self.timeout_ms, self.threshold); }
}

impl Default for MotionState {
    fn default() -> Self { Self::new(DEFAULT_MOTION_TIMEOUT_MS, DEFAULT_MOTION_THRESHOLD) }
}

/// Why a key did not trigger hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    NumericPrefix,
    KeyRepeat,
    TimeoutReset,
    BelowThreshold,
    NotCountedMotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionDecision {
    pub trigger: bool,
    /// Always `Some` when `trigger` is `false`.
    pub reason: Option<SkipReason>,
    pub motion_count: u32,
}

impl MotionDecision {
    #[must_use]
    pub fn trigger(motion_count: u32) -> Self {
        Self {
            trigger: true,
            reason: None,
            motion_count,
        }
    }

    #[must_use]
    pub fn skip(reason: SkipReason, motion_count: u32) -> Self {
        Self {
            trigger: false,
            reason: Some(reason),
            motion_count,
        }
    }
}

#[derive(Debug)]
pub struct MotionDetector {
    state: MotionState,
    repeat_timer: KeyRepeatTimer,
    last_buffer: Option<BufferId>,
    clock: Arc<dyn Clock>,
}

impl Default for MotionDetector {
    fn default() -> Self { Self::new(Arc::new(SystemClock)) }
}

impl MotionDetector {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: MotionState::default(),
            repeat_timer: KeyRepeatTimer::default(),
            last_buffer: None,
            clock,
        }
    }

    #[must_use]
    pub fn state(&self) -> &MotionState { &self.state }

    #[must_use]
    pub fn repeat_timer(&self) -> &KeyRepeatTimer { &self.repeat_timer }

    /// Clears the motion count. The key repeat timer is left alone.
    pub fn reset(&mut self) { self.state.reset(); }

    /// Ignored unless `threshold > 0`.
    pub fn set_threshold(&mut self, threshold: u32) {
        if threshold > 0 {
            self.state.threshold = threshold;
        }
    }

    /// Ignored unless `timeout_ms > 0`.
    pub fn set_timeout(&mut self, timeout_ms: u64) {
        if timeout_ms > 0 {
            self.state.timeout_ms = timeout_ms;
        }
    }

    /// Resets the count when the key events start coming from another buffer.
    pub fn notify_buffer(&mut self, buffer_id: BufferId) {
        if self.last_buffer.is_some_and(|it| it != buffer_id) {
            tracing::debug!(message = "Buffer changed, resetting motion count", ?buffer_id);
            self.reset();
        }
        self.last_buffer = Some(buffer_id);
    }

    /// Feeds one key event, timestamped with the detector's clock.
    pub fn detect_motion(
        &mut self,
        key: &str,
        numeric_prefix_count: u32,
        repeat_config: &KeyRepeatConfig,
    ) -> MotionDecision {
        let now = self.clock.now_ms();
        self.detect_motion_at(key, numeric_prefix_count, repeat_config, now)
    }

    /// Feeds one key event that happened at `now`. The state is left as is after a
    /// trigger, call [`Self::reset`] to restart counting.
    pub fn detect_motion_at(
        &mut self,
        key: &str,
        numeric_prefix_count: u32,
        repeat_config: &KeyRepeatConfig,
        now: TimestampMs,
    ) -> MotionDecision {
        // An explicit count like `3j` is a deliberate jump.
        if numeric_prefix_count > 1 {
            self.reset();
            return MotionDecision::skip(SkipReason::NumericPrefix, 0);
        }

        if let KeyRepeatStatus::Repeating =
            self.repeat_timer
                .get_status_and_update_last_key(now, repeat_config)
        {
            return MotionDecision::skip(SkipReason::KeyRepeat, self.state.motion_count);
        }

        let elapsed = now.saturating_sub(self.state.last_motion_time);
        if elapsed > self.state.timeout_ms {
            self.state.motion_count = 1;
            self.state.last_motion_key = key.into();
            self.state.last_motion_time = now;
            return MotionDecision::skip(SkipReason::TimeoutReset, 1);
        }

        if self.state.last_motion_key.as_str() == key {
            self.state.motion_count += 1;
        } else {
            self.state.motion_count = 1;
            self.state.last_motion_key = key.into();
        }
        self.state.last_motion_time = now;

        if self.state.motion_count >= self.state.threshold {
            MotionDecision::trigger(self.state.motion_count)
        } else {
            MotionDecision::skip(SkipReason::BelowThreshold, self.state.motion_count)
        }
    }

    /// Applies `config` (counted motions, per-key threshold, timeout, key repeat), then
    /// feeds the key. Counting restarts after a trigger.
    pub fn handle_key(
        &mut self,
        key: &str,
        numeric_prefix_count: u32,
        config: &HintJumpConfig,
    ) -> MotionDecision {
        if !is_counted_motion(key, &config.counted_motions, config.trigger_on_hjkl) {
            return MotionDecision::skip(
                SkipReason::NotCountedMotion,
                self.state.motion_count,
            );
        }

        self.set_threshold(resolve_motion_threshold(
            key,
            &config.per_key_motion_count,
            config.default_motion_count,
        ));
        self.set_timeout(config.motion_timeout_ms);

        let repeat_config = config.key_repeat_config();

        let decision = self.detect_motion(key, numeric_prefix_count, &repeat_config);
        // % is Display, ? is Debug.
        tracing::trace!(
            message = "Motion key",
            key = %key,
            trigger = decision.trigger,
            reason = ?decision.reason,
            count = decision.motion_count,
        );
        if decision.trigger {
            self.reset();
        }
        decision
    }
}
