//! Configuration Set Loading

use crate::channel::ChannelConfig;
use crate::error::ConfigError;
use crate::raw::RawChannelConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct ChannelTable {
    #[serde(default)]
    channels: Vec<RawChannelConfig>,
}

/// Channel excluded from the analyzable set
#[derive(Debug, Clone)]
pub struct Rejection {
    /// Channel name, or the entry position when unnamed
    pub channel: String,
    /// Why the channel was excluded
    pub error: ConfigError,
}

/// Validated channel settings keyed by channel name
#[derive(Debug, Clone, Default)]
pub struct ConfigSet {
    channels: BTreeMap<String, ChannelConfig>,
    rejected: Vec<Rejection>,
}

impl ConfigSet {
    /// Load a channel table (TOML, JSON or YAML by extension).
    ///
    /// Invalid rows are excluded and reported through [`ConfigSet::rejected`];
    /// only an unreadable file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading channel configuration from {}", path.display());

        let table: ChannelTable = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;

        Ok(Self::from_raw(table.channels))
    }

    /// Validate raw rows into a configuration set
    pub fn from_raw(rows: impl IntoIterator<Item = RawChannelConfig>) -> Self {
        let mut set = Self::default();

        for (position, row) in rows.into_iter().enumerate() {
            let name = row.name.trim().to_string();
            if name.is_empty() {
                set.reject(format!("#{position}"), ConfigError::UnnamedEntry(position));
                continue;
            }
            if set.channels.contains_key(&name) {
                set.reject(name.clone(), ConfigError::DuplicateChannel(name));
                continue;
            }

            let row = RawChannelConfig { name: name.clone(), ..row };
            match row.validate() {
                Ok(config) => {
                    set.channels.insert(name, config);
                }
                Err(err) => set.reject(name, err),
            }
        }

        info!(
            "Configuration set ready: {} channels, {} rejected",
            set.channels.len(),
            set.rejected.len()
        );
        set
    }

    /// Build a set from already validated settings (last one wins on duplicate names)
    pub fn from_configs(configs: impl IntoIterator<Item = ChannelConfig>) -> Self {
        Self {
            channels: configs
                .into_iter()
                .map(|config| (config.name.clone(), config))
                .collect(),
            rejected: Vec::new(),
        }
    }

    fn reject(&mut self, channel: String, error: ConfigError) {
        warn!("Skipping invalid configuration for channel {}: {}", channel, error);
        self.rejected.push(Rejection { channel, error });
    }

    /// Settings of one channel
    pub fn get(&self, channel: &str) -> Option<&ChannelConfig> {
        self.channels.get(channel)
    }

    /// Analyzable channels in name order
    pub fn iter(&self) -> impl Iterator<Item = &ChannelConfig> {
        self.channels.values()
    }

    /// Channels excluded at validation
    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::SetpointMode;
    use std::io::Write;

    const TABLE: &str = r#"
[[channels]]
name = "Temperature_Engine"
setpoint_channel = "Temp_Setpoint"
tolerance = 5.0
scaling = 1.0
back2back_id = "ENG"
unit = "degC"

[[channels]]
name = "Pressure_System"
static_setpoint = 100.0
tolerance = 10
back2back_id = "SYS"
unit = "bar"

[[channels]]
name = "Broken_Channel"
tolerance = 1.0
"#;

    #[test]
    fn test_load_toml_table() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();

        let set = ConfigSet::load(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get("Temperature_Engine").unwrap().mode.is_dynamic());
        assert_eq!(
            set.get("Pressure_System").unwrap().mode,
            SetpointMode::Static { setpoint: 100.0 }
        );
        assert_eq!(set.rejected().len(), 1);
        assert_eq!(set.rejected()[0].channel, "Broken_Channel");
    }

    #[test]
    fn test_missing_file() {
        assert!(ConfigSet::load("/nonexistent/channels.toml").is_err());
    }

    #[test]
    fn test_duplicates_and_unnamed() {
        let row = RawChannelConfig {
            name: "Speed".into(),
            static_setpoint: Some(50.0),
            tolerance: Some(2.0),
            ..Default::default()
        };
        let unnamed = RawChannelConfig {
            name: " ".into(),
            ..row.clone()
        };
        let set = ConfigSet::from_raw(vec![row.clone(), row, unnamed]);

        assert_eq!(set.len(), 1);
        assert_eq!(set.rejected().len(), 2);
        assert!(matches!(
            set.rejected()[0].error,
            ConfigError::DuplicateChannel(_)
        ));
        assert!(matches!(set.rejected()[1].error, ConfigError::UnnamedEntry(2)));
    }
}
