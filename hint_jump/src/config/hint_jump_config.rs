// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AssignOptions, DEFAULT_KEY_REPEAT_RESET_DELAY_MS,
            DEFAULT_KEY_REPEAT_THRESHOLD_MS, DEFAULT_MAX_SINGLE_CHAR_HINTS,
            DEFAULT_MOTION_TIMEOUT_MS, DEFAULT_MULTI_CHAR_KEYS, DEFAULT_SINGLE_CHAR_KEYS,
            HintPosition, KeyRepeatConfig, LabelPoolConfig, TinyInlineString, WindowId,
            resolve_min_word_length};

/// Bumped when a field changes meaning. Files with a newer version are still loaded
/// leniently, with a warning.
pub const CONFIG_VERSION: u64 = 1;

pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 50;
pub const DEFAULT_MAX_HINTS: usize = 336;
pub const DEFAULT_MIN_WORD_LENGTH: i64 = 3;
pub const DEFAULT_MOTION_COUNT: i64 = 3;

/// The whole configuration, with canonical `snake_case` field names. Historical names
/// are only understood by [`HintJumpConfig::from_json_value_lenient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintJumpConfig {
    pub version: u64,
    pub enabled: bool,

    // Label pools.
    pub single_char_keys: Vec<TinyInlineString>,
    pub multi_char_keys: Vec<TinyInlineString>,
    pub max_single_char_hints: Option<usize>,
    pub use_hint_groups: bool,
    pub use_numeric_multi_char_hints: bool,

    // Placement.
    pub hint_position: HintPosition,
    /// `None` uses `hint_position` in visual mode too.
    pub visual_hint_position: Option<HintPosition>,
    pub default_min_word_length: i64,
    pub per_key_min_length: BTreeMap<String, i64>,
    pub max_hints: usize,

    // Motion detection.
    pub trigger_on_hjkl: bool,
    pub counted_motions: Vec<String>,
    pub motion_timeout_ms: u64,
    pub default_motion_count: i64,
    pub per_key_motion_count: BTreeMap<String, i64>,
    pub suppress_on_key_repeat: bool,
    pub key_repeat_threshold_ms: u64,
    pub key_repeat_reset_delay_ms: u64,

    // Coordinator.
    pub debounce_delay_ms: u64,
    pub performance_log: bool,
    pub debug_mode: bool,
}

impl Default for HintJumpConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            enabled: true,
            single_char_keys: DEFAULT_SINGLE_CHAR_KEYS.iter().map(|&it| it.into()).collect(),
            multi_char_keys: DEFAULT_MULTI_CHAR_KEYS.iter().map(|&it| it.into()).collect(),
            max_single_char_hints: Some(DEFAULT_MAX_SINGLE_CHAR_HINTS),
            use_hint_groups: true,
            use_numeric_multi_char_hints: false,
            hint_position: HintPosition::Start,
            visual_hint_position: Some(HintPosition::End),
            default_min_word_length: DEFAULT_MIN_WORD_LENGTH,
            per_key_min_length: BTreeMap::new(),
            max_hints: DEFAULT_MAX_HINTS,
            trigger_on_hjkl: true,
            counted_motions: vec![],
            motion_timeout_ms: DEFAULT_MOTION_TIMEOUT_MS,
            default_motion_count: DEFAULT_MOTION_COUNT,
            per_key_motion_count: BTreeMap::new(),
            suppress_on_key_repeat: true,
            key_repeat_threshold_ms: DEFAULT_KEY_REPEAT_THRESHOLD_MS,
            key_repeat_reset_delay_ms: DEFAULT_KEY_REPEAT_RESET_DELAY_MS,
            debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
            performance_log: false,
            debug_mode: false,
        }
    }
}

impl HintJumpConfig {
    #[must_use]
    pub fn label_pool(&self) -> LabelPoolConfig {
        LabelPoolConfig {
            single_char_keys: self.single_char_keys.clone(),
            multi_char_keys: self.multi_char_keys.clone(),
            max_single_char_hints: self.max_single_char_hints,
            use_numeric_multi_char_hints: self.use_numeric_multi_char_hints,
            use_groups: self.use_hint_groups,
        }
    }

    /// Key repeat suppression is turned off entirely by `suppress_on_key_repeat`.
    #[must_use]
    pub fn key_repeat_config(&self) -> KeyRepeatConfig {
        KeyRepeatConfig {
            enabled: self.suppress_on_key_repeat,
            threshold_ms: self.key_repeat_threshold_ms,
            reset_delay_ms: self.key_repeat_reset_delay_ms,
        }
    }

    /// `motion_key` is the key that triggered the hints, if any. It selects the per-key
    /// minimum word length.
    #[must_use]
    pub fn assign_options(
        &self,
        motion_key: Option<&str>,
        active_window: Option<WindowId>,
    ) -> AssignOptions {
        AssignOptions {
            hint_position: self.hint_position,
            visual_hint_position: self.visual_hint_position,
            min_word_length: resolve_min_word_length(
                motion_key.unwrap_or_default(),
                &self.per_key_min_length,
                self.default_min_word_length,
            ),
            active_window,
        }
    }
}
