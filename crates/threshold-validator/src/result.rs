//! Analysis Results

use crate::statistics::{StatisticsAggregator, ViolationStatistics};
use chrono::{DateTime, Utc};
use serde::Serialize;
use signal_data::Series;

/// Sample outside its acceptance band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Violation {
    /// Sample timestamp (seconds)
    pub timestamp: f64,
    /// Sample value
    pub value: f64,
    /// Excess beyond the nearer bound, always > 0
    pub deviation: f64,
}

/// Outcome of one channel in one recording
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Channel name
    pub channel_name: String,
    /// True exactly when there are no violations
    pub passed: bool,
    /// Violations in time order, one per violating sample
    pub violations: Vec<Violation>,
    /// Largest absolute deviation, 0.0 when passed
    pub max_deviation: f64,
    /// Derived statistics
    pub statistics: ViolationStatistics,
    /// Number of samples compared against the band
    pub samples_evaluated: usize,
    /// First evaluated timestamp
    pub start_time: Option<f64>,
    /// Last evaluated timestamp
    pub end_time: Option<f64>,
    /// When the analysis ran
    pub analysis_time: DateTime<Utc>,
}

impl AnalysisResult {
    /// Build the result of `series` from its finished violation list
    pub fn new(channel_name: impl Into<String>, series: &Series, violations: Vec<Violation>) -> Self {
        let statistics = StatisticsAggregator::summarize(&violations);
        let span = series.time_span();

        Self {
            channel_name: channel_name.into(),
            passed: violations.is_empty(),
            max_deviation: statistics.max_deviation,
            violations,
            statistics,
            samples_evaluated: series.len(),
            start_time: span.map(|(start, _)| start),
            end_time: span.map(|(_, end)| end),
            analysis_time: Utc::now(),
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}
