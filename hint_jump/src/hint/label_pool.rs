// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key pools that labels are built from. Single char keys become one char labels, multi
//! char keys are combined pairwise into two char labels. The two pools must not share
//! a key (compared case-insensitively), otherwise a one char label would be a prefix of
//! a two char label.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashSet, FxHasher};
use serde::{Deserialize, Serialize};

use crate::{Label, PoolValidationError, TinyInlineString};

/// Highest zero padded numeric label, `"01"` to `"99"`.
pub const MAX_NUMERIC_LABEL: u8 = 99;

pub const DEFAULT_SINGLE_CHAR_KEYS: [&str; 21] = [
    "A", "S", "D", "F", "G", "H", "J", "K", "L", "N", "M", "0", "1", "2", "3", "4", "5",
    "6", "7", "8", "9",
];

pub const DEFAULT_MULTI_CHAR_KEYS: [&str; 15] = [
    "B", "C", "E", "I", "O", "P", "Q", "R", "T", "U", "V", "W", "X", "Y", "Z",
];

pub const DEFAULT_MAX_SINGLE_CHAR_HINTS: usize = 21;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelPoolConfig {
    pub single_char_keys: Vec<TinyInlineString>,
    pub multi_char_keys: Vec<TinyInlineString>,
    /// Caps the number of one char labels in the grouped strategy. `None` means every
    /// single char key is used.
    pub max_single_char_hints: Option<usize>,
    pub use_numeric_multi_char_hints: bool,
    pub use_groups: bool,
}

impl Default for LabelPoolConfig {
    fn default() -> Self {
        Self {
            single_char_keys: DEFAULT_SINGLE_CHAR_KEYS.iter().map(|&it| it.into()).collect(),
            multi_char_keys: DEFAULT_MULTI_CHAR_KEYS.iter().map(|&it| it.into()).collect(),
            max_single_char_hints: Some(DEFAULT_MAX_SINGLE_CHAR_HINTS),
            use_numeric_multi_char_hints: false,
            use_groups: true,
        }
    }
}

impl LabelPoolConfig {
    #[must_use]
    pub fn new(single_char_keys: &[&str], multi_char_keys: &[&str]) -> Self {
        Self {
            single_char_keys: single_char_keys.iter().map(|&it| it.into()).collect(),
            multi_char_keys: multi_char_keys.iter().map(|&it| it.into()).collect(),
            max_single_char_hints: None,
            use_numeric_multi_char_hints: false,
            use_groups: true,
        }
    }

    #[must_use]
    pub fn with_max_single_char_hints(mut self, max: usize) -> Self {
        self.max_single_char_hints = Some(max);
        self
    }

    #[must_use]
    pub fn with_numeric(mut self, use_numeric: bool) -> Self {
        self.use_numeric_multi_char_hints = use_numeric;
        self
    }

    #[must_use]
    pub fn with_groups(mut self, use_groups: bool) -> Self {
        self.use_groups = use_groups;
        self
    }

    /// Stable within a process, used as the label cache key.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Number of one char labels the grouped strategy emits at most.
    #[must_use]
    pub fn grouped_single_limit(&self) -> usize {
        let single_len = usable_keys(&self.single_char_keys).len();
        self.max_single_char_hints
            .map_or(single_len, |max| max.min(single_len))
    }

    /// How many labels the grouped strategy can produce for these pools.
    #[must_use]
    pub fn grouped_capacity(&self) -> usize {
        let singles = usable_keys(&self.single_char_keys);
        let multi = usable_keys(&self.multi_char_keys);
        let emitted_singles = &singles[..self.grouped_single_limit()];
        let numeric_count = if self.use_numeric_multi_char_hints {
            numeric_labels(emitted_singles, &multi).len()
        } else {
            0
        };
        emitted_singles.len() + multi.len() * multi.len() + numeric_count
    }

    /// Checks that the pools are disjoint and that the grouped strategy can produce
    /// `requested` labels.
    ///
    /// # Errors
    ///
    /// - [`PoolValidationError::DuplicateKey`] if a key appears twice, in the same pool
    ///   or across pools, compared case-insensitively.
    /// - [`PoolValidationError::EmptyPool`] if the grouped capacity is below
    ///   `requested`.
    pub fn validate(&self, requested: usize) -> Result<(), PoolValidationError> {
        let mut seen = FxHashSet::default();
        for key in usable_keys(&self.single_char_keys)
            .iter()
            .chain(usable_keys(&self.multi_char_keys).iter())
        {
            if !seen.insert(fold_case(key)) {
                return Err(PoolValidationError::DuplicateKey {
                    key: key.to_string(),
                });
            }
        }

        let capacity = self.grouped_capacity();
        if capacity < requested {
            return Err(PoolValidationError::EmptyPool {
                requested,
                capacity,
            });
        }

        Ok(())
    }

    /// `true` if `ch` can start or continue any label these pools produce. Digits are
    /// accepted when numeric labels are enabled.
    #[must_use]
    pub fn accepts_input_char(&self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if self.use_numeric_multi_char_hints && ch.is_ascii_digit() {
            return true;
        }
        let folded = fold_case(ch.encode_utf8(&mut [0; 4]));
        self.single_char_keys
            .iter()
            .chain(self.multi_char_keys.iter())
            .any(|key| fold_case(key) == folded)
    }
}

/// Keys that are exactly one char long. Anything else can't take part in a prefix-free
/// two level scheme and is skipped.
#[must_use]
pub fn usable_keys(keys: &[TinyInlineString]) -> Vec<Label> {
    keys.iter()
        .filter(|key| key.chars().count() == 1)
        .map(|key| Label::from(key.as_str()))
        .collect()
}

/// Case folding used for every label and key comparison.
#[must_use]
pub fn fold_case(it: &str) -> String { it.to_lowercase() }

/// Zero padded two digit labels that don't clash with the one char labels that are
/// emitted, or with a two char label built from `multi_keys`.
#[must_use]
pub fn numeric_labels(emitted_singles: &[Label], multi_keys: &[Label]) -> Vec<Label> {
    let single_set: FxHashSet<String> =
        emitted_singles.iter().map(|it| fold_case(it)).collect();
    let multi_set: FxHashSet<String> = multi_keys.iter().map(|it| fold_case(it)).collect();

    (1..=MAX_NUMERIC_LABEL)
        .map(|number| format!("{number:02}"))
        .filter(|label| {
            let mut chars = label.chars();
            let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
                return false;
            };
            let first = first.to_string();
            let second = second.to_string();
            let is_prefixed_by_single = single_set.contains(&first);
            let is_multi_combo =
                multi_set.contains(&first) && multi_set.contains(&second);
            !is_prefixed_by_single && !is_multi_combo
        })
        .map(|label| Label::from(label.as_str()))
        .collect()
}
