//! Panel configuration
//!
//! Typed configuration with stock defaults, plus a reader for the small TOML
//! file the firmware embeds at build time.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::{ConfigError, LightSensorConfig, PanelConfig, TimingConfig};
