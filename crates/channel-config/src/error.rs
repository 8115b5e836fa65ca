//! Configuration Error Types

use thiserror::Error;

/// Errors raised at the configuration boundary
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Neither a setpoint channel nor a static setpoint is configured
    #[error("channel {channel} has no setpoint: a setpoint channel or a static setpoint is required")]
    NoSetpoint { channel: String },

    /// Required field missing
    #[error("channel {channel} is missing required field `{field}`")]
    MissingField {
        channel: String,
        field: &'static str,
    },

    /// Numeric field outside its valid range
    #[error("channel {channel}: {field} value {value} is invalid ({reason})")]
    InvalidValue {
        channel: String,
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Time window with start after end
    #[error("channel {channel}: start time {start} is after end time {end}")]
    InvalidWindow { channel: String, start: f64, end: f64 },

    /// Test-flag channel given without a flag value
    #[error("channel {channel}: test flag channel {flag_channel} given without a flag value")]
    MissingTestFlag {
        channel: String,
        flag_channel: String,
    },

    /// Channel declared twice in one configuration set
    #[error("channel {0} is configured more than once")]
    DuplicateChannel(String),

    /// Entry without a channel name
    #[error("configuration entry {0} has no channel name")]
    UnnamedEntry(usize),

    /// The configuration source could not be read or parsed
    #[error("failed to load configuration: {0}")]
    Source(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Source(err.to_string())
    }
}
