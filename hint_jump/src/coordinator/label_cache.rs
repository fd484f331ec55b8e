// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Remembers the last generated label sequence, so that showing hints again for the
//! same number of words (the common case while scrolling or repeating a motion) skips
//! generation.
//!
//! A request for fewer labels than the cached ones, with the same pools, is served from
//! the cached prefix as long as it would use the same strategy. This is valid because
//! generation is monotonic for a fixed strategy.

use std::sync::Arc;

use serde::Serialize;

use crate::{Label, LabelPoolConfig, LabelStrategy, generate_labels_with_strategy};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheEntry {
    count: usize,
    fingerprint: u64,
    strategy: LabelStrategy,
    labels: Arc<[Label]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LabelCacheStats {
    pub hits: u64,
    pub prefix_hits: u64,
    pub misses: u64,
}

/// Single entry cache of the most recent label sequence.
#[derive(Debug, Default)]
pub struct LabelCache {
    entry: Option<CacheEntry>,
    stats: LabelCacheStats,
}

impl LabelCache {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn stats(&self) -> LabelCacheStats { self.stats }

    pub fn clear(&mut self) { self.entry = None; }

    /// Returns `count` labels for `pool`, generating them only when the cache can't
    /// answer.
    pub fn get_or_generate(&mut self, count: usize, pool: &LabelPoolConfig) -> Arc<[Label]> {
        let fingerprint = pool.fingerprint();

        if let Some(entry) = &self.entry
            && entry.fingerprint == fingerprint
        {
            if entry.count == count {
                self.stats.hits += 1;
                return Arc::clone(&entry.labels);
            }
            if count < entry.count && expected_strategy(count, pool) == entry.strategy {
                self.stats.prefix_hits += 1;
                let end = count.min(entry.labels.len());
                return Arc::from(&entry.labels[..end]);
            }
        }

        self.stats.misses += 1;
        let generated = generate_labels_with_strategy(count, pool);
        let labels: Arc<[Label]> = Arc::from(generated.labels);
        self.entry = Some(CacheEntry {
            count,
            fingerprint,
            strategy: generated.strategy,
            labels: Arc::clone(&labels),
        });
        labels
    }
}

fn expected_strategy(count: usize, pool: &LabelPoolConfig) -> LabelStrategy {
    if pool.use_groups && pool.validate(count).is_ok() {
        LabelStrategy::Grouped
    } else {
        LabelStrategy::Flat
    }
}
