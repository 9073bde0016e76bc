//! Configuration type definitions
//!
//! Every value has a default matching the stock panel wiring, so an empty
//! configuration file yields a working panel.

use pharos_protocol::{AdcChannel, LedId};

use crate::segments::SEGMENT_COUNT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sampling period is zero
    ZeroTickInterval,
    /// Pulse hold time is zero
    ZeroPulseHold,
    /// A full display frame takes at least one sampling period
    FrameTooSlow,
}

/// Loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Sampling period
    pub tick_interval_ms: u32,
    /// Delay between consecutive shift-register bits (0 = back to back)
    pub shift_step_ms: u32,
    /// How long a relay line stays high after a pulse
    pub pulse_hold_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            shift_step_ms: 1,
            pulse_hold_ms: 500,
        }
    }
}

/// Ambient light detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LightSensorConfig {
    /// ADC channel wired to the light sensor
    pub channel: AdcChannel,
    /// Readings strictly above this count as dark
    pub dark_threshold: u16,
    /// LED mirroring the dark state
    pub indicator_led: LedId,
}

impl Default for LightSensorConfig {
    fn default() -> Self {
        Self {
            channel: AdcChannel::LIGHT_SENSOR,
            dark_threshold: 200,
            indicator_led: LedId::DARK_INDICATOR,
        }
    }
}

impl LightSensorConfig {
    /// Classify a light-sensor reading
    pub fn is_dark(&self, value: u16) -> bool {
        value > self.dark_threshold
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    pub timing: TimingConfig,
    pub light_sensor: LightSensorConfig,
}

impl PanelConfig {
    /// Check values the types cannot rule out
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.timing.pulse_hold_ms == 0 {
            return Err(ConfigError::ZeroPulseHold);
        }

        // Two digits per frame, one step per segment bit
        let frame_ms = u64::from(self.timing.shift_step_ms) * 2 * SEGMENT_COUNT as u64;
        if frame_ms >= u64::from(self.timing.tick_interval_ms) {
            return Err(ConfigError::FrameTooSlow);
        }
        Ok(())
    }
}
