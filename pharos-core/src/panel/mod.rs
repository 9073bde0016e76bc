//! Sampling orchestrator
//!
//! [`Panel`] ties the drivers together on a single cooperative loop: the
//! periodic tick samples every ADC channel and refreshes the display, and
//! delayed work (display bits, relay releases) runs from its delay queue.

mod controller;

pub use controller::Panel;

use pharos_protocol::{ChannelTarget, ADC_CHANNELS};

use crate::scheduler::ScheduleError;
use crate::traits::{DisplayError, FrameStart, LineError};

/// Work the panel defers to a later instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Job {
    /// Shift the next display bit
    ShiftStep,
    /// End a relay pulse
    Release(ChannelTarget),
}

/// Errors surfaced by panel operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// An ADC, relay or LED line failed
    Line(LineError),
    /// The digit display failed
    Display(DisplayError),
    /// No room to defer more work
    Schedule(ScheduleError),
}

impl From<LineError> for PanelError {
    fn from(err: LineError) -> Self {
        PanelError::Line(err)
    }
}

impl From<DisplayError> for PanelError {
    fn from(err: DisplayError) -> Self {
        PanelError::Display(err)
    }
}

impl From<ScheduleError> for PanelError {
    fn from(err: ScheduleError) -> Self {
        PanelError::Schedule(err)
    }
}

/// Summary of one sampling tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Seconds-of-minute value sent to the display
    pub second: u8,
    /// Reading of every ADC channel, indexed by channel
    pub samples: [u16; ADC_CHANNELS as usize],
    /// Dark flag after this tick
    pub dark: bool,
    /// What became of this tick's display frame
    ///
    /// A frame that could not be started or queued is dropped; sampling
    /// still runs.
    pub display: Result<FrameStart, PanelError>,
}
