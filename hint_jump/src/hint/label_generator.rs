// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns a label count and a [`LabelPoolConfig`] into an ordered sequence of labels.
//!
//! Every sequence is unique and prefix-free (case-insensitively), and generation is
//! deterministic. For a fixed strategy, the sequence for `n` is a prefix of the
//! sequence for `n + 1`, which is what lets the label cache serve smaller requests
//! from a longer cached result.
//!
//! Two strategies exist:
//! - [`LabelStrategy::Grouped`]: up to `max_single_char_hints` one char labels, then
//!   every pair of multi char keys (row-major), then optional numeric labels.
//! - [`LabelStrategy::Flat`]: the fallback when grouping is turned off or the pools
//!   fail validation. It repairs the pools instead of rejecting them.

use rustc_hash::FxHashSet;
use strum_macros::Display;

use crate::{Label, LabelPoolConfig, fold_case, numeric_labels, usable_keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LabelStrategy {
    Grouped,
    Flat,
}

/// Labels plus the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLabels {
    pub labels: Vec<Label>,
    pub strategy: LabelStrategy,
}

/// The resolved key lists for one strategy. Building labels from a plan can't fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPlan {
    pub strategy: LabelStrategy,
    pub singles: Vec<Label>,
    pub multi: Vec<Label>,
    pub numeric: Vec<Label>,
}

impl LabelPlan {
    /// Grouped plan. Only valid when [`LabelPoolConfig::validate`] passed.
    #[must_use]
    pub fn grouped(pool: &LabelPoolConfig) -> Self {
        let mut singles = usable_keys(&pool.single_char_keys);
        singles.truncate(pool.grouped_single_limit());
        let multi = usable_keys(&pool.multi_char_keys);
        let numeric = if pool.use_numeric_multi_char_hints {
            numeric_labels(&singles, &multi)
        } else {
            vec![]
        };
        Self {
            strategy: LabelStrategy::Grouped,
            singles,
            multi,
            numeric,
        }
    }

    /// Flat plan. Duplicates are dropped, and keys found in both pools stay in the multi
    /// pool only. `max_single_char_hints` does not apply.
    #[must_use]
    pub fn flat(pool: &LabelPoolConfig) -> Self {
        let multi = dedup_keys(usable_keys(&pool.multi_char_keys));
        let multi_set: FxHashSet<String> = multi.iter().map(|it| fold_case(it)).collect();
        let singles: Vec<Label> = dedup_keys(usable_keys(&pool.single_char_keys))
            .into_iter()
            .filter(|it| !multi_set.contains(&fold_case(it)))
            .collect();
        let numeric = if pool.use_numeric_multi_char_hints {
            numeric_labels(&singles, &multi)
        } else {
            vec![]
        };
        Self {
            strategy: LabelStrategy::Flat,
            singles,
            multi,
            numeric,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.singles.len() + self.multi.len() * self.multi.len() + self.numeric.len()
    }

    /// Lazily yields the whole sequence, in order.
    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        let singles = self.singles.iter().cloned();
        let pairs = self.multi.iter().flat_map(move |first| {
            self.multi.iter().map(move |second| {
                let mut it = first.clone();
                it.push_str(second);
                it
            })
        });
        let numeric = self.numeric.iter().cloned();
        singles.chain(pairs).chain(numeric)
    }

    #[must_use]
    pub fn take(&self, count: usize) -> Vec<Label> { self.iter().take(count).collect() }
}

/// Picks the strategy for `count` labels from `pool`.
#[must_use]
pub fn choose_plan(count: usize, pool: &LabelPoolConfig) -> LabelPlan {
    if !pool.use_groups {
        return LabelPlan::flat(pool);
    }
    match pool.validate(count) {
        Ok(()) => LabelPlan::grouped(pool),
        Err(error) => {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "Key pools rejected, using flat labels",
                error = %error,
            );
            LabelPlan::flat(pool)
        }
    }
}

/// Generates `count` labels, or fewer if the pools can't produce that many.
#[must_use]
pub fn generate_labels_with_strategy(
    count: usize,
    pool: &LabelPoolConfig,
) -> GeneratedLabels {
    if count == 0 {
        return GeneratedLabels {
            labels: vec![],
            strategy: if pool.use_groups {
                LabelStrategy::Grouped
            } else {
                LabelStrategy::Flat
            },
        };
    }

    let plan = choose_plan(count, pool);
    let capacity = plan.capacity();
    if capacity < count {
        tracing::warn!(
            message = "Not enough keys for every word, truncating labels",
            requested = count,
            capacity = capacity,
            strategy = %plan.strategy,
        );
    }

    GeneratedLabels {
        labels: plan.take(count),
        strategy: plan.strategy,
    }
}

/// Generates `count` labels from `pool`. See [`generate_labels_with_strategy`].
#[must_use]
pub fn generate_labels(count: usize, pool: &LabelPoolConfig) -> Vec<Label> {
    generate_labels_with_strategy(count, pool).labels
}

fn dedup_keys(keys: Vec<Label>) -> Vec<Label> {
    let mut seen = FxHashSet::default();
    keys.into_iter()
        .filter(|it| seen.insert(fold_case(it)))
        .collect()
}
