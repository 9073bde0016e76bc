//! Relay and LED output traits

use pharos_protocol::{ChannelTarget, LedAction, LedId, Level};

use super::sampler::LineError;

/// Trait for the bank of relay lines
///
/// Each (channel, direction) pair drives its own line. Timing of pulses is
/// the caller's business; implementations only set levels.
pub trait PulseOutputs {
    /// Drive the line for `target`
    fn set_level(&mut self, target: ChannelTarget, level: Level) -> Result<(), LineError>;

    /// Last level written to the line for `target`
    fn level(&self, target: ChannelTarget) -> Level;
}

/// Trait for the indicator LEDs
pub trait LedOutputs {
    /// Apply `action` to `led`, returning the new state (true = lit)
    fn apply(&mut self, led: LedId, action: LedAction) -> Result<bool, LineError>;

    /// Current state of `led`
    fn is_on(&self, led: LedId) -> bool;

    /// Switch `led` on or off
    fn set(&mut self, led: LedId, on: bool) -> Result<bool, LineError> {
        let action = if on { LedAction::On } else { LedAction::Off };
        self.apply(led, action)
    }
}
