//! Indicator LEDs

use embedded_hal::digital::OutputPin;
use pharos_core::traits::{LedOutputs, LineError};
use pharos_protocol::{LedAction, LedId, LED_COUNT};

use crate::line::drive;

/// The panel's three LEDs, all off at start-up
pub struct LedBank<P> {
    pins: [P; LED_COUNT],
    states: [bool; LED_COUNT],
}

impl<P: OutputPin> LedBank<P> {
    /// Take the pins, ordered by LED id, and switch every LED off
    pub fn new(pins: [P; LED_COUNT]) -> Result<Self, LineError> {
        let mut bank = Self {
            pins,
            states: [false; LED_COUNT],
        };
        for pin in bank.pins.iter_mut() {
            drive(pin, false)?;
        }
        Ok(bank)
    }
}

impl<P: OutputPin> LedOutputs for LedBank<P> {
    fn apply(&mut self, led: LedId, action: LedAction) -> Result<bool, LineError> {
        let index = led.index();
        let on = match action {
            LedAction::Off => false,
            LedAction::On => true,
            LedAction::Toggle => !self.states[index],
        };

        drive(&mut self.pins[index], on)?;
        self.states[index] = on;
        Ok(on)
    }

    fn is_on(&self, led: LedId) -> bool {
        self.states[led.index()]
    }
}
