//! Signal Data Error Types

use thiserror::Error;

/// Malformed series handed over by a data provider
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// Samples and timestamps differ in length
    #[error("shape mismatch: {samples} samples for {timestamps} timestamps")]
    ShapeMismatch { samples: usize, timestamps: usize },

    /// Timestamp smaller than its predecessor, or not a number
    #[error("timestamps not ordered at index {index}: {previous} followed by {current}")]
    UnorderedTimestamps {
        index: usize,
        previous: f64,
        current: f64,
    },
}

/// Channel occurrence could not be resolved in a recording
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// Channel not logged in the recording
    #[error("channel {channel} not found")]
    NotFound { channel: String },

    /// Several occurrences and none carries the discriminator
    #[error("channel {channel}: none of {candidates} occurrences has a source matching `{discriminator}`")]
    Ambiguous {
        channel: String,
        discriminator: String,
        candidates: usize,
    },
}

/// Recording could not be loaded
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid recording file: {0}")]
    Format(#[from] serde_json::Error),
}
