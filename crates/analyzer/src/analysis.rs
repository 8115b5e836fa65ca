//! Per-Recording Analysis Output

use crate::ChannelError;
use serde::Serialize;
use signal_data::Series;
use std::collections::BTreeMap;
use threshold_validator::AnalysisResult;

/// Series as evaluated, kept for plotting
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedChannel {
    /// Channel series after scaling, windowing and gating
    pub series: Series,
    /// Setpoint resampled onto `series` (dynamic mode only)
    pub setpoint: Option<Series>,
}

/// Outcome of one successfully evaluated channel
#[derive(Debug, Clone)]
pub struct ChannelAnalysis {
    pub result: AnalysisResult,
    pub processed: ProcessedChannel,
}

/// Channel counts of one recording
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordingSummary {
    /// Channels present in the results
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Configured channels omitted from the results
    pub skipped: usize,
}

/// Everything produced for one recording.
///
/// Channels that could not be evaluated are absent from `results`; their
/// reasons are listed in `skipped`.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalysis {
    /// Recording name
    pub recording: String,
    /// Results by channel name
    pub results: BTreeMap<String, AnalysisResult>,
    /// Processed series by channel name
    pub processed: BTreeMap<String, ProcessedChannel>,
    /// Skip reasons by channel name
    pub skipped: BTreeMap<String, ChannelError>,
}

impl RecordingAnalysis {
    pub fn new(recording: impl Into<String>) -> Self {
        Self {
            recording: recording.into(),
            ..Default::default()
        }
    }

    pub(crate) fn insert(&mut self, channel: &str, analysis: ChannelAnalysis) {
        self.results.insert(channel.to_string(), analysis.result);
        self.processed.insert(channel.to_string(), analysis.processed);
    }

    pub(crate) fn skip(&mut self, channel: &str, reason: ChannelError) {
        self.skipped.insert(channel.to_string(), reason);
    }

    pub fn summary(&self) -> RecordingSummary {
        let passed = self.results.values().filter(|r| r.passed).count();
        RecordingSummary {
            total: self.results.len(),
            passed,
            failed: self.results.len() - passed,
            skipped: self.skipped.len(),
        }
    }

    /// True when every evaluated channel passed; skipped channels are not
    /// considered, see [`RecordingAnalysis::is_complete`]
    pub fn all_passed(&self) -> bool {
        self.results.values().all(|r| r.passed)
    }

    /// True when no configured channel was skipped
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
