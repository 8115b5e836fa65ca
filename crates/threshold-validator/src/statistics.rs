//! Violation Statistics

use crate::result::Violation;
use serde::Serialize;

/// Summary of the violations of one channel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViolationStatistics {
    /// Number of violating samples
    pub total_violations: usize,
    /// Largest absolute deviation, 0.0 without violations
    pub max_deviation: f64,
    /// Timestamps of the violating samples, in time order
    pub violation_times: Vec<f64>,
}

/// Folds a violation list into [`ViolationStatistics`].
///
/// Call once evaluation has finished; nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    pub fn summarize(violations: &[Violation]) -> ViolationStatistics {
        ViolationStatistics {
            total_violations: violations.len(),
            max_deviation: violations
                .iter()
                .map(|v| v.deviation.abs())
                .fold(0.0, f64::max),
            violation_times: violations.iter().map(|v| v.timestamp).collect(),
        }
    }
}
