//! Serializable Recording Report

use crate::analysis::{RecordingAnalysis, RecordingSummary};
use channel_config::{ConfigSet, SetpointMode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use threshold_validator::AnalysisResult;

/// Result of one channel with the settings needed to render it
#[derive(Debug, Serialize)]
pub struct ChannelReport<'a> {
    pub unit: Option<&'a str>,
    pub tolerance: Option<f64>,
    pub mode: Option<&'a SetpointMode>,
    #[serde(flatten)]
    pub result: &'a AnalysisResult,
}

/// Configured channel missing from the results
#[derive(Debug, Serialize)]
pub struct SkippedChannel<'a> {
    pub channel: &'a str,
    pub reason: String,
}

/// Report of one recording for downstream consumers
#[derive(Debug, Serialize)]
pub struct RecordingReport<'a> {
    pub recording: &'a str,
    pub generated: DateTime<Utc>,
    pub summary: RecordingSummary,
    pub channels: Vec<ChannelReport<'a>>,
    pub skipped: Vec<SkippedChannel<'a>>,
}

impl<'a> RecordingReport<'a> {
    pub fn new(analysis: &'a RecordingAnalysis, configs: &'a ConfigSet) -> Self {
        let channels = analysis
            .results
            .iter()
            .map(|(name, result)| {
                let config = configs.get(name);
                ChannelReport {
                    unit: config.and_then(|c| c.unit.as_deref()),
                    tolerance: config.map(|c| c.tolerance),
                    mode: config.map(|c| &c.mode),
                    result,
                }
            })
            .collect();

        let skipped = analysis
            .skipped
            .iter()
            .map(|(channel, reason)| SkippedChannel {
                channel,
                reason: reason.to_string(),
            })
            .collect();

        Self {
            recording: &analysis.recording,
            generated: Utc::now(),
            summary: analysis.summary(),
            channels,
            skipped,
        }
    }
}
