//! Recorded Signal Data
//!
//! Time series with checked shape, the occurrences of a channel inside one
//! recording, and the resolver that picks the occurrence to analyze.

mod error;
mod recording;
mod resolver;
mod series;

pub use error::{RecordingError, ResolveError, SeriesError};
pub use recording::{InMemoryRecording, Occurrence, RecordingSource};
pub use resolver::ChannelResolver;
pub use series::Series;
