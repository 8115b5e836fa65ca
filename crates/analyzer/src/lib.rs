//! Measurement Channel Analysis
//!
//! Drives every configured channel of a recording through the pipeline:
//! - occurrence resolution (with setpoint and test-flag channels)
//! - scaling, windowing and gating
//! - static or setpoint-tracking threshold evaluation
//! - violation statistics
//!
//! A failing channel is skipped with a logged reason; it never stops the
//! remaining channels or recordings.

pub mod analysis;
pub mod coordinator;
pub mod report;

pub use analysis::{ChannelAnalysis, ProcessedChannel, RecordingAnalysis, RecordingSummary};
pub use coordinator::AnalysisCoordinator;
pub use report::{ChannelReport, RecordingReport, SkippedChannel};

use signal_data::{ResolveError, SeriesError};
use signal_processing::ProcessingError;
use thiserror::Error;
use threshold_validator::EvaluationError;

/// Why a channel is missing from the results of a recording
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    #[error("resolution failed: {0}")]
    Resolution(#[from] ResolveError),

    #[error("malformed series from the recording: {0}")]
    Shape(#[from] SeriesError),

    #[error("processing failed: {0}")]
    Processing(#[from] ProcessingError),

    #[error("evaluation defect: {0}")]
    Evaluation(#[from] EvaluationError),
}
