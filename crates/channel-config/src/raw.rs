//! Raw Configuration Records and Validation

use crate::channel::{ChannelConfig, SetpointMode, TestFlag};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One channel row as read from the configuration table.
///
/// Blank text cells are treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawChannelConfig {
    pub name: String,
    pub setpoint_channel: Option<String>,
    pub static_setpoint: Option<f64>,
    pub tolerance: Option<f64>,
    pub scaling: Option<f64>,
    pub setpoint_scaling: Option<f64>,
    pub back2back_id: Option<String>,
    pub back2back_id_position: Option<i64>,
    pub unit: Option<String>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub test_flag_channel: Option<String>,
    pub test_flag: Option<i64>,
}

fn present(text: &Option<String>) -> Option<String> {
    text.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl RawChannelConfig {
    fn invalid(&self, field: &'static str, value: f64, reason: &'static str) -> ConfigError {
        ConfigError::InvalidValue {
            channel: self.name.clone(),
            field,
            value,
            reason,
        }
    }

    fn positive_factor(&self, field: &'static str, value: Option<f64>) -> Result<f64, ConfigError> {
        match value {
            None => Ok(1.0),
            Some(v) if v.is_finite() && v > 0.0 => Ok(v),
            Some(v) => Err(self.invalid(field, v, "must be positive")),
        }
    }

    fn setpoint_mode(&self) -> Result<SetpointMode, ConfigError> {
        let channel = present(&self.setpoint_channel);

        if channel.is_some() && self.static_setpoint.is_some() {
            warn!(
                "Channel {} has both a setpoint channel and a static setpoint; using the setpoint channel",
                self.name
            );
        }

        // Dynamic takes precedence when both are configured
        if let Some(channel) = channel {
            let scaling = self.positive_factor("setpoint_scaling", self.setpoint_scaling)?;
            return Ok(SetpointMode::Dynamic { channel, scaling });
        }

        match self.static_setpoint {
            Some(setpoint) if setpoint.is_finite() => Ok(SetpointMode::Static { setpoint }),
            Some(setpoint) => Err(self.invalid("static_setpoint", setpoint, "must be finite")),
            None => Err(ConfigError::NoSetpoint {
                channel: self.name.clone(),
            }),
        }
    }

    /// Check every field and build the validated channel settings
    pub fn validate(&self) -> Result<ChannelConfig, ConfigError> {
        let mode = self.setpoint_mode()?;

        let tolerance = self.tolerance.ok_or_else(|| ConfigError::MissingField {
            channel: self.name.clone(),
            field: "tolerance",
        })?;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(self.invalid("tolerance", tolerance, "must be a finite value >= 0"));
        }

        let scaling = self.positive_factor("scaling", self.scaling)?;

        let position = self.back2back_id_position.unwrap_or(0);
        if position < 0 {
            return Err(self.invalid("back2back_id_position", position as f64, "must be >= 0"));
        }

        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start > end {
                return Err(ConfigError::InvalidWindow {
                    channel: self.name.clone(),
                    start,
                    end,
                });
            }
        }

        let test_flag = match (present(&self.test_flag_channel), self.test_flag) {
            (None, _) => None,
            (Some(flag_channel), None) => {
                return Err(ConfigError::MissingTestFlag {
                    channel: self.name.clone(),
                    flag_channel,
                })
            }
            (Some(_), Some(value)) if value < 0 => {
                return Err(self.invalid("test_flag", value as f64, "must be >= 0"))
            }
            (Some(channel), Some(value)) => Some(TestFlag { channel, value }),
        };

        Ok(ChannelConfig {
            name: self.name.clone(),
            mode,
            tolerance,
            scaling,
            back2back_id: present(&self.back2back_id).unwrap_or_default(),
            back2back_id_position: position as usize,
            unit: present(&self.unit),
            start_time: self.start_time,
            end_time: self.end_time,
            test_flag,
        })
    }
}
