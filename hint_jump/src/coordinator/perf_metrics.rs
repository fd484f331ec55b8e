// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::RingBufferHeap;

/// How many recent samples are kept per operation.
pub const PERF_SAMPLE_COUNT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PerfOperation {
    ShowHints,
    HideHints,
    WordDetection,
    HintGeneration,
    HintAssignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerfSummary {
    pub operation: PerfOperation,
    pub samples: usize,
    pub last: Duration,
    pub average: Duration,
    pub max: Duration,
}

/// Rolling timings for each [`PerfOperation`].
#[derive(Debug)]
pub struct PerfMetrics {
    samples: FxHashMap<PerfOperation, RingBufferHeap<Duration, PERF_SAMPLE_COUNT>>,
    /// Log every sample at `debug`. Follows `performance_log` of the last show request.
    pub log_samples: bool,
}

impl Default for PerfMetrics {
    fn default() -> Self { Self::new(false) }
}

impl PerfMetrics {
    #[must_use]
    pub fn new(log_samples: bool) -> Self {
        Self {
            samples: PerfOperation::iter()
                .map(|op| (op, RingBufferHeap::new()))
                .collect(),
            log_samples,
        }
    }

    pub fn record(&mut self, operation: PerfOperation, duration: Duration) {
        if self.log_samples {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Perf", operation = %operation, duration = ?duration);
        }
        self.samples
            .entry(operation)
            .or_insert_with(RingBufferHeap::new)
            .add(duration);
    }

    #[must_use]
    pub fn summary(&self, operation: PerfOperation) -> Option<PerfSummary> {
        let samples = self.samples.get(&operation)?;
        let last = *samples.get(samples.len().checked_sub(1)?)?;
        let total: Duration = samples.iter().sum();
        let max = samples.iter().max().copied().unwrap_or_default();
        let count = u32::try_from(samples.len()).unwrap_or(u32::MAX);
        Some(PerfSummary {
            operation,
            samples: samples.len(),
            last,
            average: total / count,
            max,
        })
    }

    /// Summaries for every operation that has at least one sample.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PerfSummary> {
        PerfOperation::iter()
            .filter_map(|op| self.summary(op))
            .collect()
    }

    pub fn clear(&mut self) {
        for samples in self.samples.values_mut() {
            samples.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_summary() {
        let mut metrics = PerfMetrics::default();
        assert_eq!(metrics.summary(PerfOperation::ShowHints), None);

        metrics.record(PerfOperation::ShowHints, Duration::from_millis(10));
        metrics.record(PerfOperation::ShowHints, Duration::from_millis(30));
        metrics.record(PerfOperation::ShowHints, Duration::from_millis(20));

        assert_eq!(
            metrics.summary(PerfOperation::ShowHints),
            Some(PerfSummary {
                operation: PerfOperation::ShowHints,
                samples: 3,
                last: Duration::from_millis(20),
                average: Duration::from_millis(20),
                max: Duration::from_millis(30),
            })
        );
        assert_eq!(metrics.snapshot().len(), 1);
    }

    #[test]
    fn test_only_recent_samples_are_kept() {
        let mut metrics = PerfMetrics::default();
        for ms in 0..(PERF_SAMPLE_COUNT as u64 + 10) {
            metrics.record(PerfOperation::HideHints, Duration::from_millis(ms));
        }
        let summary = metrics.summary(PerfOperation::HideHints).unwrap();
        assert_eq!(summary.samples, PERF_SAMPLE_COUNT);
        assert_eq!(summary.last, Duration::from_millis(PERF_SAMPLE_COUNT as u64 + 9));
    }

    #[test]
    fn test_clear() {
        let mut metrics = PerfMetrics::new(true);
        metrics.record(PerfOperation::WordDetection, Duration::from_micros(5));
        metrics.clear();
        assert!(metrics.snapshot().is_empty());
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(PerfOperation::HintAssignment.to_string(), "hint_assignment");
    }
}
