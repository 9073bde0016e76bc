//! Pharos Uplink Protocol
//!
//! This crate defines the UART-based protocol between the panel (RP2040) and
//! the observer bridge, which fans events out to every connected observer and
//! forwards their commands back to the panel.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–48B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! Payloads are postcard-encoded. Identifiers with a restricted range
//! (ADC channel, relay channel, LED) are validated while decoding, so a
//! command that reaches the panel logic is always in range.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod events;
pub mod frame;
pub mod messages;
pub mod types;

pub use events::{AnalogReading, ChannelPulse, LedStatus, PanelEvent, Topic};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{Audience, Outbound, PanelCommand};
pub use types::{
    AdcChannel, ChannelTarget, ClientId, LedAction, LedId, Level, PulseDirection, RangeError,
    RelayChannel, ADC_CHANNELS, LED_COUNT, RELAY_CHANNELS, RELAY_LINES,
};
