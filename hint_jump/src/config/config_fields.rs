// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Reading [`HintJumpConfig`] from untyped JSON.
//!
//! Every field is described once in [`CONFIG_FIELDS`], with its canonical name, the
//! historical names it is also known by, and the shape its value must have. Two
//! readers share that table:
//!
//! - [`HintJumpConfig::from_json_value_lenient`] never fails. A malformed field keeps
//!   its default and is reported as a [`ConfigWarning`].
//! - [`validate_config`] changes nothing and reports every problem as a
//!   [`ConfigValidationError`].

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{CONFIG_VERSION, ConfigValidationError, HintJumpConfig, HintPosition,
            LabelPoolConfig, PoolValidationError, TinyInlineString};

/// Shortest motion timeout that is accepted.
pub const MIN_MOTION_TIMEOUT_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Version,
    Bool,
    PositiveInt,
    NonNegativeInt,
    IntAtLeast(u64),
    HintPosition,
    /// Like [`FieldKind::HintPosition`], plus `"same"` which means "follow
    /// `hint_position`".
    VisualHintPosition,
    /// Array of one char strings.
    KeyList { non_empty: bool },
    /// Object of key name to positive integer.
    PositiveIntMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: FieldKind,
}

const fn field(
    name: &'static str,
    aliases: &'static [&'static str],
    kind: FieldKind,
) -> FieldSpec {
    FieldSpec {
        name,
        aliases,
        kind,
    }
}

#[rustfmt::skip]
pub const CONFIG_FIELDS: &[FieldSpec] = &[
    field("version", &[], FieldKind::Version),
    field("enabled", &[], FieldKind::Bool),
    field("single_char_keys", &["singleCharKeys", "markers"], FieldKind::KeyList { non_empty: true }),
    field("multi_char_keys", &["multiCharKeys"], FieldKind::KeyList { non_empty: false }),
    field("max_single_char_hints", &["maxSingleCharHints"], FieldKind::PositiveInt),
    field("use_hint_groups", &["useHintGroups"], FieldKind::Bool),
    field("use_numeric_multi_char_hints", &["useNumericMultiCharHints"], FieldKind::Bool),
    field("hint_position", &["hintPosition"], FieldKind::HintPosition),
    field("visual_hint_position", &["visualHintPosition"], FieldKind::VisualHintPosition),
    field("default_min_word_length", &["defaultMinWordLength"], FieldKind::PositiveInt),
    field("per_key_min_length", &["perKeyMinLength"], FieldKind::PositiveIntMap),
    field("max_hints", &["maxHints"], FieldKind::PositiveInt),
    field("trigger_on_hjkl", &["triggerOnHjkl"], FieldKind::Bool),
    field("counted_motions", &["countedMotions"], FieldKind::KeyList { non_empty: false }),
    field("motion_timeout_ms", &["motionTimeout", "motion_timeout", "motionCounterTimeout"], FieldKind::IntAtLeast(MIN_MOTION_TIMEOUT_MS)),
    field("default_motion_count", &["defaultMotionCount", "motion_count", "motionCount", "motionCounterThreshold"], FieldKind::PositiveInt),
    field("per_key_motion_count", &["perKeyMotionCount"], FieldKind::PositiveIntMap),
    field("suppress_on_key_repeat", &["suppressOnKeyRepeat"], FieldKind::Bool),
    field("key_repeat_threshold_ms", &["keyRepeatThreshold"], FieldKind::NonNegativeInt),
    field("key_repeat_reset_delay_ms", &["keyRepeatResetDelay"], FieldKind::NonNegativeInt),
    field("debounce_delay_ms", &["debounceDelay", "debounce_delay"], FieldKind::NonNegativeInt),
    field("performance_log", &["performanceLog"], FieldKind::Bool),
    field("debug_mode", &["debugMode"], FieldKind::Bool),
];

/// Something [`HintJumpConfig::from_json_value_lenient`] had to work around.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ConfigWarning {
    #[error("{0}, using the default")]
    #[diagnostic(code(r3bl_hint_jump::config::defaulted))]
    Defaulted(ConfigValidationError),

    #[error("Unknown field {0:?} is ignored")]
    #[diagnostic(code(r3bl_hint_jump::config::unknown_field))]
    UnknownField(String),

    #[error("Field {field:?} is a legacy name, use {canonical:?} instead")]
    #[diagnostic(code(r3bl_hint_jump::config::legacy_name))]
    LegacyName {
        field: String,
        canonical: &'static str,
    },
}

/// A config read by the lenient reader, along with what it had to work around.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadedConfig {
    pub config: HintJumpConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// The first name of `entry` present in `object`, canonical name first.
fn lookup<'a>(
    object: &'a Map<String, Value>,
    entry: &FieldSpec,
) -> Option<(&'static str, &'a Value)> {
    std::iter::once(entry.name)
        .chain(entry.aliases.iter().copied())
        .find_map(|name| object.get(name).map(|value| (name, value)))
}

fn is_known_field(name: &str) -> bool {
    CONFIG_FIELDS
        .iter()
        .any(|entry| entry.name == name || entry.aliases.contains(&name))
}

/// Checks the shape of one value. `field` is the name as it appears in the input.
///
/// # Errors
///
/// Returns the problem with the value, if any.
pub fn check_field(
    kind: FieldKind,
    field: &str,
    value: &Value,
) -> Result<(), ConfigValidationError> {
    let wrong_type = |expected: &'static str| ConfigValidationError::WrongType {
        field: field.to_string(),
        expected,
    };
    let out_of_range = |reason: String| ConfigValidationError::OutOfRange {
        field: field.to_string(),
        reason,
    };

    match kind {
        FieldKind::Version => {
            let version = value
                .as_u64()
                .ok_or_else(|| wrong_type("a non-negative integer"))?;
            if version > CONFIG_VERSION {
                return Err(ConfigValidationError::UnsupportedVersion {
                    found: version,
                    supported: CONFIG_VERSION,
                });
            }
        }
        FieldKind::Bool => {
            value.as_bool().ok_or_else(|| wrong_type("a boolean"))?;
        }
        FieldKind::PositiveInt => {
            let it = value.as_u64().ok_or_else(|| wrong_type("a positive integer"))?;
            if it == 0 {
                return Err(out_of_range("must be a positive integer".to_string()));
            }
        }
        FieldKind::NonNegativeInt => {
            value
                .as_u64()
                .ok_or_else(|| wrong_type("a non-negative integer"))?;
        }
        FieldKind::IntAtLeast(min) => {
            let it = value.as_u64().ok_or_else(|| wrong_type("an integer"))?;
            if it < min {
                return Err(out_of_range(format!("must be at least {min}")));
            }
        }
        FieldKind::HintPosition | FieldKind::VisualHintPosition => {
            let it = value.as_str().ok_or_else(|| wrong_type("a string"))?;
            let is_same = kind == FieldKind::VisualHintPosition && it == "same";
            if !is_same && it.parse::<HintPosition>().is_err() {
                return Err(ConfigValidationError::UnknownValue {
                    field: field.to_string(),
                    value: it.to_string(),
                });
            }
        }
        FieldKind::KeyList { non_empty } => {
            let items = value
                .as_array()
                .ok_or_else(|| wrong_type("an array of strings"))?;
            if non_empty && items.is_empty() {
                return Err(out_of_range("must not be empty".to_string()));
            }
            for item in items {
                let key = item.as_str().ok_or_else(|| wrong_type("an array of strings"))?;
                if key.chars().count() != 1 {
                    return Err(out_of_range(format!(
                        "{key:?} is not a single character"
                    )));
                }
            }
        }
        FieldKind::PositiveIntMap => {
            let object = value
                .as_object()
                .ok_or_else(|| wrong_type("an object of positive integers"))?;
            for (key, it) in object {
                if it.as_u64().is_none_or(|it| it == 0) {
                    return Err(out_of_range(format!(
                        "{key:?} must map to a positive integer"
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Strict validation of untyped config. Nothing is changed, every problem is
/// reported. An empty result means the config is valid.
#[must_use]
pub fn validate_config(value: &Value) -> Vec<ConfigValidationError> {
    let Some(object) = value.as_object() else {
        return vec![ConfigValidationError::NotAnObject];
    };

    let mut errors = vec![];
    for entry in CONFIG_FIELDS {
        if let Some((name, it)) = lookup(object, entry)
            && let Err(error) = check_field(entry.kind, name, it)
        {
            errors.push(error);
        }
    }

    // Only meaningful when both lists are well formed.
    if errors.is_empty() {
        let loaded = HintJumpConfig::from_json_value_lenient(value);
        if let Err(error @ PoolValidationError::DuplicateKey { .. }) =
            loaded.config.label_pool().validate(0)
        {
            errors.push(ConfigValidationError::KeyPool(error));
        }
    }

    errors
}

impl HintJumpConfig {
    /// Reads a config from untyped JSON, accepting legacy field names. Never fails:
    /// malformed fields keep their default.
    #[must_use]
    pub fn from_json_value_lenient(value: &Value) -> LoadedConfig {
        let mut config = HintJumpConfig::default();
        let mut warnings = vec![];

        let Some(object) = value.as_object() else {
            warnings.push(ConfigWarning::Defaulted(ConfigValidationError::NotAnObject));
            return LoadedConfig { config, warnings };
        };

        for name in object.keys() {
            if !is_known_field(name) {
                warnings.push(ConfigWarning::UnknownField(name.clone()));
            }
        }

        for entry in CONFIG_FIELDS {
            let Some((name, it)) = lookup(object, entry) else {
                continue;
            };
            if name != entry.name {
                warnings.push(ConfigWarning::LegacyName {
                    field: name.to_string(),
                    canonical: entry.name,
                });
            }
            if entry.kind == FieldKind::PositiveIntMap {
                apply_int_map(&mut config, entry.name, name, it, &mut warnings);
                continue;
            }
            match check_field(entry.kind, name, it) {
                Ok(()) => apply_field(&mut config, entry.name, it),
                Err(error) => warnings.push(ConfigWarning::Defaulted(error)),
            }
        }

        if config.debug_mode {
            tracing::debug!(message = "Config loaded", warnings = warnings.len(), ?config);
        }

        LoadedConfig { config, warnings }
    }
}

/// `value` has been checked against the field's kind.
fn apply_field(config: &mut HintJumpConfig, canonical: &str, value: &Value) {
    match canonical {
        "enabled" => set_bool(&mut config.enabled, value),
        "single_char_keys" => set_keys(&mut config.single_char_keys, value),
        "multi_char_keys" => set_keys(&mut config.multi_char_keys, value),
        "max_single_char_hints" => {
            config.max_single_char_hints = value.as_u64().and_then(to_usize);
        }
        "use_hint_groups" => set_bool(&mut config.use_hint_groups, value),
        "use_numeric_multi_char_hints" => {
            set_bool(&mut config.use_numeric_multi_char_hints, value);
        }
        "hint_position" => {
            if let Some(it) = value.as_str().and_then(|it| it.parse().ok()) {
                config.hint_position = it;
            }
        }
        "visual_hint_position" => {
            config.visual_hint_position = value.as_str().and_then(|it| it.parse().ok());
        }
        "default_min_word_length" => set_i64(&mut config.default_min_word_length, value),
        "max_hints" => {
            if let Some(it) = value.as_u64().and_then(to_usize) {
                config.max_hints = it;
            }
        }
        "trigger_on_hjkl" => set_bool(&mut config.trigger_on_hjkl, value),
        "counted_motions" => {
            config.counted_motions = value
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(ToString::to_string)
                        .collect()
                })
                .unwrap_or_default();
        }
        "motion_timeout_ms" => set_u64(&mut config.motion_timeout_ms, value),
        "default_motion_count" => set_i64(&mut config.default_motion_count, value),
        "suppress_on_key_repeat" => set_bool(&mut config.suppress_on_key_repeat, value),
        "key_repeat_threshold_ms" => set_u64(&mut config.key_repeat_threshold_ms, value),
        "key_repeat_reset_delay_ms" => {
            set_u64(&mut config.key_repeat_reset_delay_ms, value);
        }
        "debounce_delay_ms" => set_u64(&mut config.debounce_delay_ms, value),
        "performance_log" => set_bool(&mut config.performance_log, value),
        "debug_mode" => set_bool(&mut config.debug_mode, value),
        // Version is normalized to the current one.
        _ => {}
    }
}

/// Integer entries are kept (non-positive ones are ignored later, at resolution), the
/// rest are dropped with a warning.
fn apply_int_map(
    config: &mut HintJumpConfig,
    canonical: &str,
    name: &str,
    value: &Value,
    warnings: &mut Vec<ConfigWarning>,
) {
    let Some(object) = value.as_object() else {
        warnings.push(ConfigWarning::Defaulted(ConfigValidationError::WrongType {
            field: name.to_string(),
            expected: "an object of positive integers",
        }));
        return;
    };

    let mut map = BTreeMap::new();
    for (key, it) in object {
        match it.as_i64() {
            Some(number) => {
                map.insert(key.clone(), number);
            }
            None => warnings.push(ConfigWarning::Defaulted(
                ConfigValidationError::WrongType {
                    field: format!("{name}.{key}"),
                    expected: "an integer",
                },
            )),
        }
    }

    match canonical {
        "per_key_min_length" => config.per_key_min_length = map,
        "per_key_motion_count" => config.per_key_motion_count = map,
        _ => {}
    }
}

fn set_bool(slot: &mut bool, value: &Value) {
    if let Some(it) = value.as_bool() {
        *slot = it;
    }
}

fn set_u64(slot: &mut u64, value: &Value) {
    if let Some(it) = value.as_u64() {
        *slot = it;
    }
}

fn set_i64(slot: &mut i64, value: &Value) {
    if let Some(it) = value.as_u64().and_then(|it| i64::try_from(it).ok()) {
        *slot = it;
    }
}

fn set_keys(slot: &mut Vec<TinyInlineString>, value: &Value) {
    if let Some(items) = value.as_array() {
        *slot = items
            .iter()
            .filter_map(Value::as_str)
            .map(TinyInlineString::from)
            .collect();
    }
}

fn to_usize(it: u64) -> Option<usize> { usize::try_from(it).ok() }

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let loaded = HintJumpConfig::from_json_value_lenient(&json!({}));
        assert_eq!(loaded, LoadedConfig::default());
        assert!(validate_config(&json!({})).is_empty());
    }

    #[test]
    fn test_canonical_names() {
        let loaded = HintJumpConfig::from_json_value_lenient(&json!({
            "single_char_keys": ["a", "s"],
            "multi_char_keys": ["b", "c"],
            "hint_position": "end",
            "visual_hint_position": "same",
            "debounce_delay_ms": 0,
            "motion_timeout_ms": 500,
        }));
        assert!(loaded.warnings.is_empty());
        let config = loaded.config;
        assert_eq!(config.single_char_keys, vec![TinyInlineString::from("a"), "s".into()]);
        assert_eq!(config.hint_position, HintPosition::End);
        assert_eq!(config.visual_hint_position, None);
        assert_eq!(config.debounce_delay_ms, 0);
        assert_eq!(config.motion_timeout_ms, 500);
    }

    #[test]
    fn test_legacy_names_are_accepted_and_reported() {
        let loaded = HintJumpConfig::from_json_value_lenient(&json!({
            "markers": ["A", "S"],
            "motionCount": 5,
            "motionTimeout": 1500,
            "useHintGroups": false,
            "keyRepeatThreshold": 80,
        }));
        let config = &loaded.config;
        assert_eq!(config.single_char_keys, vec![TinyInlineString::from("A"), "S".into()]);
        assert_eq!(config.default_motion_count, 5);
        assert_eq!(config.motion_timeout_ms, 1_500);
        assert!(!config.use_hint_groups);
        assert_eq!(config.key_repeat_threshold_ms, 80);
        assert_eq!(loaded.warnings.len(), 5);
        assert!(loaded.warnings.contains(&ConfigWarning::LegacyName {
            field: "markers".to_string(),
            canonical: "single_char_keys",
        }));
    }

    #[test]
    fn test_canonical_name_wins_over_legacy() {
        let loaded = HintJumpConfig::from_json_value_lenient(&json!({
            "max_hints": 10,
            "maxHints": 20,
        }));
        assert_eq!(loaded.config.max_hints, 10);
    }

    #[test]
    fn test_malformed_fields_are_defaulted() {
        let loaded = HintJumpConfig::from_json_value_lenient(&json!({
            "hint_position": "middle",
            "motion_timeout_ms": 10,
            "max_hints": -1,
            "enabled": "yes",
            "single_char_keys": [],
            "not_a_field": 1,
        }));
        assert_eq!(loaded.config, HintJumpConfig::default());
        assert_eq!(loaded.warnings.len(), 6);
        assert!(loaded.warnings.contains(&ConfigWarning::UnknownField("not_a_field".to_string())));
    }

    #[test]
    fn test_non_object_is_defaulted() {
        let loaded = HintJumpConfig::from_json_value_lenient(&json!([1, 2]));
        assert_eq!(loaded.config, HintJumpConfig::default());
        assert_eq!(
            validate_config(&json!("nope")),
            vec![ConfigValidationError::NotAnObject]
        );
    }

    #[test]
    fn test_int_maps_keep_integer_entries() {
        let loaded = HintJumpConfig::from_json_value_lenient(&json!({
            "perKeyMotionCount": { "j": 2, "k": 0, "w": "three" },
        }));
        assert_eq!(
            loaded.config.per_key_motion_count,
            BTreeMap::from([("j".to_string(), 2), ("k".to_string(), 0)])
        );
        assert_eq!(loaded.warnings.len(), 2);
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let errors = validate_config(&json!({
            "motion_count": 0,
            "motion_timeout": 50,
            "hint_position": "middle",
            "markers": [],
            "max_hints": 0,
            "counted_motions": ["jj"],
            "debug_mode": 1,
        }));
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&ConfigValidationError::UnknownValue {
            field: "hint_position".to_string(),
            value: "middle".to_string(),
        }));
        assert!(errors.contains(&ConfigValidationError::OutOfRange {
            field: "motion_timeout".to_string(),
            reason: "must be at least 100".to_string(),
        }));
    }

    #[test]
    fn test_validate_detects_key_pool_overlap() {
        let errors = validate_config(&json!({
            "single_char_keys": ["a", "b"],
            "multi_char_keys": ["B", "c"],
        }));
        assert_eq!(
            errors,
            vec![ConfigValidationError::KeyPool(PoolValidationError::DuplicateKey {
                key: "B".to_string()
            })]
        );
    }

    #[test]
    fn test_newer_version_is_rejected_strictly_but_loaded_leniently() {
        let value = json!({ "version": CONFIG_VERSION + 1, "max_hints": 5 });
        assert_eq!(
            validate_config(&value),
            vec![ConfigValidationError::UnsupportedVersion {
                found: CONFIG_VERSION + 1,
                supported: CONFIG_VERSION,
            }]
        );
        let loaded = HintJumpConfig::from_json_value_lenient(&value);
        assert_eq!(loaded.config.max_hints, 5);
        assert_eq!(loaded.config.version, CONFIG_VERSION);
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn test_every_field_name_is_unique() {
        let mut names: Vec<&str> = CONFIG_FIELDS
            .iter()
            .flat_map(|entry| std::iter::once(entry.name).chain(entry.aliases.iter().copied()))
            .collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }
}
