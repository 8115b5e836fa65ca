//! Processing Error Types

use signal_data::SeriesError;
use thiserror::Error;

/// Errors during series processing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    /// A reference series without samples cannot be resampled
    #[error("cannot resample an empty {0} series")]
    EmptySeries(&'static str),

    /// Resampled values do not fit the target grid
    #[error(transparent)]
    Shape(#[from] SeriesError),
}
