// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::BTreeMap;

use strum_macros::Display;

/// Used when neither a per-key override nor a usable default is configured.
pub const FALLBACK_MOTION_THRESHOLD: u32 = 3;

/// Used when neither a per-key override nor a usable default is configured.
pub const FALLBACK_MIN_WORD_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MotionKind {
    /// `h`, `j`, `k`, `l`.
    Character,
    /// `w`, `W`, `b`, `B`, `e`, `E`.
    Word,
    /// `g`, `G`, `0`, `$`.
    Line,
    Other,
}

impl MotionKind {
    #[must_use]
    pub fn classify(key: &str) -> Self {
        match key {
            "h" | "j" | "k" | "l" => Self::Character,
            "w" | "W" | "b" | "B" | "e" | "E" => Self::Word,
            "g" | "G" | "0" | "$" => Self::Line,
            _ => Self::Other,
        }
    }
}

/// Should presses of `key` be counted towards showing hints?
///
/// An explicit `counted_motions` list wins. Otherwise the `hjkl` keys are counted when
/// `trigger_on_hjkl` is set, and nothing else is.
#[must_use]
pub fn is_counted_motion(key: &str, counted_motions: &[String], trigger_on_hjkl: bool) -> bool {
    if !counted_motions.is_empty() {
        return counted_motions.iter().any(|it| it == key);
    }
    trigger_on_hjkl && MotionKind::classify(key) == MotionKind::Character
}

/// Per-key override (positive only), then the configured default (`>= 1`), then
/// [`FALLBACK_MOTION_THRESHOLD`].
#[must_use]
pub fn resolve_motion_threshold(
    key: &str,
    per_key_motion_count: &BTreeMap<String, i64>,
    default_motion_count: i64,
) -> u32 {
    resolve_per_key(key, per_key_motion_count, default_motion_count)
        .and_then(|it| u32::try_from(it).ok())
        .unwrap_or(FALLBACK_MOTION_THRESHOLD)
}

/// Same priority order as [`resolve_motion_threshold`], for the minimum word length.
#[must_use]
pub fn resolve_min_word_length(
    key: &str,
    per_key_min_length: &BTreeMap<String, i64>,
    default_min_word_length: i64,
) -> usize {
    resolve_per_key(key, per_key_min_length, default_min_word_length)
        .and_then(|it| usize::try_from(it).ok())
        .unwrap_or(FALLBACK_MIN_WORD_LENGTH)
}

fn resolve_per_key(key: &str, per_key: &BTreeMap<String, i64>, default: i64) -> Option<i64> {
    per_key
        .get(key)
        .copied()
        .filter(|&it| it > 0)
        .or(Some(default).filter(|&it| it >= 1))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("j", MotionKind::Character)]
    #[test_case("W", MotionKind::Word)]
    #[test_case("$", MotionKind::Line)]
    #[test_case("x", MotionKind::Other)]
    fn test_classify(key: &str, expected: MotionKind) {
        assert_eq!(MotionKind::classify(key), expected);
    }

    #[test]
    fn test_is_counted_motion() {
        assert!(is_counted_motion("j", &[], true));
        assert!(!is_counted_motion("j", &[], false));
        assert!(!is_counted_motion("w", &[], true));
        let counted = vec!["w".to_string()];
        assert!(is_counted_motion("w", &counted, true));
        assert!(!is_counted_motion("j", &counted, true));
    }

    #[test_case(Some(5), 2, 5 ; "per key override wins")]
    #[test_case(Some(0), 2, 2 ; "non positive override is ignored")]
    #[test_case(Some(-4), 2, 2 ; "negative override is ignored")]
    #[test_case(None, 4, 4 ; "configured default")]
    #[test_case(None, 0, 3 ; "fallback")]
    fn test_resolve_motion_threshold(per_key: Option<i64>, default: i64, expected: u32) {
        let mut map = BTreeMap::new();
        if let Some(it) = per_key {
            map.insert("j".to_string(), it);
        }
        assert_eq!(resolve_motion_threshold("j", &map, default), expected);
    }

    #[test]
    fn test_resolve_min_word_length() {
        let map = BTreeMap::from([("w".to_string(), 1_i64)]);
        assert_eq!(resolve_min_word_length("w", &map, 4), 1);
        assert_eq!(resolve_min_word_length("j", &map, 4), 4);
        assert_eq!(resolve_min_word_length("j", &map, -1), 3);
    }
}
