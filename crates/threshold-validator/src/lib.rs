//! Threshold Validation
//!
//! Evaluates processed channel series against a fixed band or a band that
//! follows a setpoint channel, and summarizes the out-of-band samples.

mod error;
mod evaluator;
mod result;
mod statistics;

pub use error::EvaluationError;
pub use evaluator::ThresholdEvaluator;
pub use result::{AnalysisResult, Violation};
pub use statistics::{StatisticsAggregator, ViolationStatistics};
