//! Evaluation Error Types

use thiserror::Error;

/// Contract breaches detected inside evaluation.
///
/// Never an outcome of valid input: the configuration boundary and the
/// coordinator guarantee all three conditions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// Negative or non-finite tolerance
    #[error("channel {channel}: invalid tolerance {tolerance}")]
    InvalidTolerance { channel: String, tolerance: f64 },

    /// Dynamic mode evaluated without a setpoint series
    #[error("channel {channel}: no series given for setpoint channel {setpoint_channel}")]
    MissingSetpoint {
        channel: String,
        setpoint_channel: String,
    },

    /// Setpoint series not on the grid of the evaluated series
    #[error("channel {channel}: setpoint has {actual} samples on a different grid than the {expected} evaluated samples")]
    MisalignedSetpoint {
        channel: String,
        expected: usize,
        actual: usize,
    },
}
