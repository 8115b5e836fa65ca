//! Channel Configuration
//!
//! Per-channel acceptance settings for recorded measurement channels:
//! setpoint mode, tolerance band, scaling, occurrence discriminator,
//! time window and test-flag gating.

mod channel;
mod error;
mod loader;
mod raw;

pub use channel::{ChannelConfig, SetpointMode, TestFlag};
pub use error::ConfigError;
pub use loader::{ConfigSet, Rejection};
pub use raw::RawChannelConfig;
