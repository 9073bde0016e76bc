//! Events published by the panel to its observers

use serde::{Deserialize, Serialize};

use crate::types::{AdcChannel, ChannelTarget, LedId, Level};

const ANALOG_TOPICS: [&str; 8] = ["an0", "an1", "an2", "an3", "an4", "an5", "an6", "an7"];

/// Observer-facing topic an event is published under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Topic {
    /// One topic per ADC channel (`an0`..`an7`)
    Analog(AdcChannel),
    /// LED indicator state (`ledstatus`)
    LedStatus,
    /// Relay channel transitions (`ch`)
    Channel,
}

impl Topic {
    /// Topic name as seen by observers
    pub fn name(&self) -> &'static str {
        match self {
            Topic::Analog(channel) => ANALOG_TOPICS[channel.index() as usize],
            Topic::LedStatus => "ledstatus",
            Topic::Channel => "ch",
        }
    }
}

/// A 10-bit sample from one ADC channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogReading {
    /// Sampled channel
    pub channel: AdcChannel,
    /// Conversion result (0-1023)
    pub value: u16,
}

/// Current state of one LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedStatus {
    /// LED index
    pub led: LedId,
    /// True when lit
    pub on: bool,
}

/// A relay line changed level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelPulse {
    /// Channel and direction of the line
    pub target: ChannelTarget,
    /// New level of the line
    pub level: Level,
}

/// Everything the panel publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelEvent {
    /// ADC sample
    Analog(AnalogReading),
    /// LED state
    LedStatus(LedStatus),
    /// Relay line transition
    ChannelPulse(ChannelPulse),
}

impl PanelEvent {
    /// Topic this event is published under
    pub fn topic(&self) -> Topic {
        match self {
            PanelEvent::Analog(reading) => Topic::Analog(reading.channel),
            PanelEvent::LedStatus(_) => Topic::LedStatus,
            PanelEvent::ChannelPulse(_) => Topic::Channel,
        }
    }

    /// Shorthand for an analog reading event
    pub fn analog(channel: AdcChannel, value: u16) -> Self {
        PanelEvent::Analog(AnalogReading { channel, value })
    }

    /// Shorthand for an LED status event
    pub fn led(led: LedId, on: bool) -> Self {
        PanelEvent::LedStatus(LedStatus { led, on })
    }

    /// Shorthand for a relay transition event
    pub fn channel(target: ChannelTarget, level: Level) -> Self {
        PanelEvent::ChannelPulse(ChannelPulse { target, level })
    }
}
