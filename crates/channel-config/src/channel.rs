//! Validated Channel Settings

use serde::{Deserialize, Serialize};

/// Reference the channel is compared against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SetpointMode {
    /// Per-sample reference taken from another channel of the same recording
    Dynamic {
        /// Name of the setpoint channel
        channel: String,
        /// Factor applied to the setpoint samples before comparison
        scaling: f64,
    },
    /// Single fixed reference value
    Static {
        /// Reference value
        setpoint: f64,
    },
}

impl SetpointMode {
    /// Whether bounds come from a setpoint channel
    pub fn is_dynamic(&self) -> bool {
        matches!(self, SetpointMode::Dynamic { .. })
    }

    /// Setpoint channel name, dynamic mode only
    pub fn setpoint_channel(&self) -> Option<&str> {
        match self {
            SetpointMode::Dynamic { channel, .. } => Some(channel),
            SetpointMode::Static { .. } => None,
        }
    }
}

/// Gate restricting evaluation to samples where a flag channel holds a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFlag {
    /// Flag channel name
    pub channel: String,
    /// Flag value marking the samples to evaluate
    pub value: i64,
}

/// Acceptance settings of one measurement channel.
///
/// Built from a [`RawChannelConfig`](crate::RawChannelConfig) at the
/// configuration boundary, or directly through the constructors below.
/// Treated as read-only for the whole analysis of a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel name, unique within a configuration set
    pub name: String,
    /// Static or dynamic reference
    pub mode: SetpointMode,
    /// Half-width of the acceptance band
    pub tolerance: f64,
    /// Factor applied to the channel samples
    pub scaling: f64,
    /// Substring of the source identity selecting among duplicate occurrences
    pub back2back_id: String,
    /// Position index of the discriminator, carried for result consumers
    pub back2back_id_position: usize,
    /// Unit label
    pub unit: Option<String>,
    /// Inclusive window start (seconds)
    pub start_time: Option<f64>,
    /// Inclusive window end (seconds)
    pub end_time: Option<f64>,
    /// Optional test-flag gate
    pub test_flag: Option<TestFlag>,
}

impl ChannelConfig {
    fn with_mode(name: impl Into<String>, mode: SetpointMode, tolerance: f64) -> Self {
        Self {
            name: name.into(),
            mode,
            tolerance,
            scaling: 1.0,
            back2back_id: String::new(),
            back2back_id_position: 0,
            unit: None,
            start_time: None,
            end_time: None,
            test_flag: None,
        }
    }

    /// Channel checked against a fixed setpoint
    pub fn fixed(name: impl Into<String>, setpoint: f64, tolerance: f64) -> Self {
        Self::with_mode(name, SetpointMode::Static { setpoint }, tolerance)
    }

    /// Channel checked against another channel of the recording
    pub fn tracking(
        name: impl Into<String>,
        setpoint_channel: impl Into<String>,
        tolerance: f64,
    ) -> Self {
        Self::with_mode(
            name,
            SetpointMode::Dynamic {
                channel: setpoint_channel.into(),
                scaling: 1.0,
            },
            tolerance,
        )
    }

    /// Set the sample scaling factor
    pub fn scaled(mut self, scaling: f64) -> Self {
        self.scaling = scaling;
        self
    }

    /// Set the occurrence discriminator
    pub fn discriminated_by(mut self, back2back_id: impl Into<String>) -> Self {
        self.back2back_id = back2back_id.into();
        self
    }

    /// Restrict evaluation to an inclusive time window
    pub fn windowed(mut self, start_time: Option<f64>, end_time: Option<f64>) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    /// Evaluate only where `channel` holds `value`
    pub fn gated_by(mut self, channel: impl Into<String>, value: i64) -> Self {
        self.test_flag = Some(TestFlag {
            channel: channel.into(),
            value,
        });
        self
    }

    /// Set the unit label
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Whether a time window is configured
    pub fn has_window(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_defaults() {
        let config = ChannelConfig::fixed("Pressure_System", 100.0, 10.0).with_unit("bar");
        assert_eq!(config.scaling, 1.0);
        assert_eq!(config.unit.as_deref(), Some("bar"));
        assert!(!config.mode.is_dynamic());
        assert!(!config.has_window());
        assert!(config.back2back_id.is_empty());
    }

    #[test]
    fn test_tracking_mode() {
        let config = ChannelConfig::tracking("Temperature_Engine", "Temp_Setpoint", 5.0)
            .windowed(Some(1.0), None);
        assert_eq!(config.mode.setpoint_channel(), Some("Temp_Setpoint"));
        assert!(config.has_window());
    }
}
