//! Message types for the uplink
//!
//! Message types are divided into two categories:
//! - Panel → Bridge: events for every observer, or for one observer
//! - Bridge → Panel: relay pulse requests, LED commands, connection notices

use serde::{Deserialize, Serialize};

use crate::events::PanelEvent;
use crate::frame::{Frame, FrameError};
use crate::types::{ChannelTarget, ClientId, LedAction, LedId};

// Message type IDs: Bridge → Panel
pub const MSG_PULSE: u8 = 0x01;
pub const MSG_LED: u8 = 0x02;
pub const MSG_CONNECT: u8 = 0x03;

// Message type IDs: Panel → Bridge
pub const MSG_EVENT: u8 = 0x20;
pub const MSG_DIRECT: u8 = 0x21;

/// Body of an LED command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct LedRequest {
    led: LedId,
    action: LedAction,
}

/// Commands received from the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelCommand {
    /// Pulse one relay line
    Pulse(ChannelTarget),
    /// Switch, clear or toggle an LED
    Led { led: LedId, action: LedAction },
    /// A new observer connected and needs the current indicator state
    Connect(ClientId),
}

impl PanelCommand {
    /// Parse a command from a frame
    ///
    /// Out-of-range channels, directions and LED ids are rejected here.
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_PULSE => Ok(PanelCommand::Pulse(frame.body(0)?)),
            MSG_LED => {
                let request: LedRequest = frame.body(0)?;
                Ok(PanelCommand::Led {
                    led: request.led,
                    action: request.action,
                })
            }
            MSG_CONNECT => Ok(PanelCommand::Connect(frame.body(0)?)),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this command into a frame (bridge side, or for testing)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            PanelCommand::Pulse(target) => Frame::with_body(MSG_PULSE, &[], target),
            PanelCommand::Led { led, action } => Frame::with_body(
                MSG_LED,
                &[],
                &LedRequest {
                    led: *led,
                    action: *action,
                },
            ),
            PanelCommand::Connect(client) => Frame::with_body(MSG_CONNECT, &[], client),
        }
    }
}

/// Where an outbound event is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Audience {
    /// Every connected observer
    Everyone,
    /// A single observer
    Client(ClientId),
}

/// An event addressed to its audience
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Outbound {
    /// Who receives the event
    pub audience: Audience,
    /// The event itself
    pub event: PanelEvent,
}

impl Outbound {
    /// Event for every observer
    pub fn broadcast(event: PanelEvent) -> Self {
        Self {
            audience: Audience::Everyone,
            event,
        }
    }

    /// Event for a single observer
    pub fn direct(client: ClientId, event: PanelEvent) -> Self {
        Self {
            audience: Audience::Client(client),
            event,
        }
    }

    /// Encode into a frame
    ///
    /// Direct events carry the client id as the first payload byte.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self.audience {
            Audience::Everyone => Frame::with_body(MSG_EVENT, &[], &self.event),
            Audience::Client(client) => Frame::with_body(MSG_DIRECT, &[client.0], &self.event),
        }
    }

    /// Parse an outbound frame (bridge side, or for testing)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_EVENT => Ok(Self::broadcast(frame.body(0)?)),
            MSG_DIRECT => {
                let client = *frame.payload.first().ok_or(FrameError::InvalidFrame)?;
                Ok(Self::direct(ClientId(client), frame.body(1)?))
            }
            _ => Err(FrameError::InvalidFrame),
        }
    }
}
