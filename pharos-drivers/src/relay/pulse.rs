//! Momentary relay lines
//!
//! Four relay channels each have an "off" and an "on" line, giving eight
//! lines addressed by [`ChannelTarget::line_index`]. The controller only
//! sets levels; the panel decides when a pulse ends.

use embedded_hal::digital::OutputPin;
use pharos_core::traits::{LineError, PulseOutputs};
use pharos_protocol::{ChannelTarget, Level, RELAY_LINES};

use crate::line::drive;

/// Owner of the eight relay lines
pub struct PulseController<P> {
    lines: [P; RELAY_LINES],
    levels: [Level; RELAY_LINES],
}

impl<P: OutputPin> PulseController<P> {
    /// Take the lines, ordered by line index, and drive them all low
    pub fn new(lines: [P; RELAY_LINES]) -> Result<Self, LineError> {
        let mut controller = Self {
            lines,
            levels: [Level::Low; RELAY_LINES],
        };
        for line in controller.lines.iter_mut() {
            drive(line, false)?;
        }
        Ok(controller)
    }
}

impl<P: OutputPin> PulseOutputs for PulseController<P> {
    fn set_level(&mut self, target: ChannelTarget, level: Level) -> Result<(), LineError> {
        let index = target.line_index();
        drive(&mut self.lines[index], level == Level::High)?;
        self.levels[index] = level;
        Ok(())
    }

    fn level(&self, target: ChannelTarget) -> Level {
        self.levels[target.line_index()]
    }
}
