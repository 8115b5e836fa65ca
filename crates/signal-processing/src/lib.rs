//! Channel Series Processing
//!
//! Prepares a resolved series for threshold evaluation: scaling, inclusive
//! time windowing, test-flag gating, and piecewise-linear resampling used to
//! put a setpoint channel on the grid of the channel it bounds.

mod error;
mod processor;

pub use error::ProcessingError;
pub use processor::DataProcessor;
