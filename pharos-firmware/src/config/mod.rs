//! Configuration loading
//!
//! The panel configuration is `panel.toml`, embedded at compile time (and
//! already validated by the build script). It is parsed once at boot.

use defmt::*;

use pharos_core::config::{parse_config, PanelConfig};

/// Embedded configuration (compiled into firmware)
/// Edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../panel.toml");

/// Parse and validate the embedded configuration
///
/// Falls back to the stock defaults if the embedded file is rejected, which
/// can only happen when the build-time check and the runtime parser disagree.
pub fn load_config() -> PanelConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            return PanelConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Embedded config rejected: {:?}", e);
        error!("Using default configuration");
        return PanelConfig::default();
    }

    info!(
        "Config: tick={}ms shift_step={}ms pulse_hold={}ms",
        config.timing.tick_interval_ms, config.timing.shift_step_ms, config.timing.pulse_hold_ms
    );
    info!(
        "Light sensor: channel {}, dark above {}, indicator LED {}",
        config.light_sensor.channel.index(),
        config.light_sensor.dark_threshold,
        config.light_sensor.indicator_led.index()
    );

    config
}
