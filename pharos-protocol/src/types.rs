//! Identifiers and levels shared by events and commands
//!
//! Every identifier with a restricted range is a newtype that can only be
//! built through a checked constructor, so values decoded from the uplink or
//! read from configuration are validated once at the boundary.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of ADC input channels
pub const ADC_CHANNELS: u8 = 8;

/// Number of relay channels on the pulse controller
pub const RELAY_CHANNELS: u8 = 4;

/// Number of relay lines (channels x directions)
pub const RELAY_LINES: usize = RELAY_CHANNELS as usize * 2;

/// Number of LEDs on the panel
pub const LED_COUNT: usize = 3;

/// A value was outside the range of the identifier it was meant to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeError {
    /// The rejected raw value
    pub value: u8,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value {} out of range", self.value)
    }
}

/// ADC input channel (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "u8", into = "u8")]
pub struct AdcChannel(u8);

impl AdcChannel {
    /// Channel the stock board wires to the light sensor
    pub const LIGHT_SENSOR: AdcChannel = AdcChannel(6);

    /// Create a channel, returning `None` outside 0-7
    pub const fn new(index: u8) -> Option<Self> {
        if index < ADC_CHANNELS {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Channel index (0-7)
    pub const fn index(self) -> u8 {
        self.0
    }

    /// All channels in ascending order
    pub fn all() -> impl Iterator<Item = AdcChannel> {
        (0..ADC_CHANNELS).map(AdcChannel)
    }
}

impl TryFrom<u8> for AdcChannel {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(RangeError { value })
    }
}

impl From<AdcChannel> for u8 {
    fn from(channel: AdcChannel) -> Self {
        channel.0
    }
}

/// Relay channel on the remote power controller (1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "u8", into = "u8")]
pub struct RelayChannel(u8);

impl RelayChannel {
    /// Create a relay channel, returning `None` outside 1-4
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= RELAY_CHANNELS {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Channel number (1-4)
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RelayChannel {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(RangeError { value })
    }
}

impl From<RelayChannel> for u8 {
    fn from(channel: RelayChannel) -> Self {
        channel.0
    }
}

/// Which of the two relay lines of a channel is pulsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseDirection {
    /// The "off" button of the channel
    Off,
    /// The "on" button of the channel
    On,
}

impl PulseDirection {
    /// Parse the wire value (0 = off, 1 = on)
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(PulseDirection::Off),
            1 => Some(PulseDirection::On),
            _ => None,
        }
    }

    /// Wire value (0 = off, 1 = on)
    pub const fn as_u8(self) -> u8 {
        match self {
            PulseDirection::Off => 0,
            PulseDirection::On => 1,
        }
    }
}

/// One relay line: a channel together with a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelTarget {
    /// Relay channel (1-4)
    pub channel: RelayChannel,
    /// Off or on line of that channel
    pub direction: PulseDirection,
}

impl ChannelTarget {
    /// Build a target from raw channel (1-4) and direction (0-1) values
    pub const fn new(channel: u8, direction: u8) -> Option<Self> {
        match (RelayChannel::new(channel), PulseDirection::from_u8(direction)) {
            (Some(channel), Some(direction)) => Some(Self { channel, direction }),
            _ => None,
        }
    }

    /// Index of the relay line driven by this target
    ///
    /// `(channel - 1) * 2 + direction`, always in 0-7.
    pub const fn line_index(self) -> usize {
        (self.channel.number() as usize - 1) * 2 + self.direction.as_u8() as usize
    }
}

/// Logical level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Level from a boolean (true = high)
    pub const fn from_bool(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Wire value (0 or 1)
    pub const fn as_u8(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

/// Panel LED (0-2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "u8", into = "u8")]
pub struct LedId(u8);

impl LedId {
    /// LED the stock board uses as the dark indicator
    pub const DARK_INDICATOR: LedId = LedId(2);

    /// Create an LED id, returning `None` outside 0-2
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < LED_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// LED index (0-2)
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All LEDs in ascending order
    pub fn all() -> impl Iterator<Item = LedId> {
        (0..LED_COUNT as u8).map(LedId)
    }
}

impl TryFrom<u8> for LedId {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(RangeError { value })
    }
}

impl From<LedId> for u8 {
    fn from(led: LedId) -> Self {
        led.0
    }
}

/// Requested LED change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedAction {
    /// Switch off (wire value 0)
    Off,
    /// Switch on (wire value 1)
    On,
    /// Invert the current state (wire value 2)
    Toggle,
}

/// Observer connection handle assigned by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClientId(pub u8);
