//! Digital line helpers
//!
//! Maps `embedded-hal` pin errors onto [`LineError`] so drivers can use `?`
//! regardless of the pin implementation.

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use pharos_core::traits::LineError;

/// Drive an output line to `high`
pub(crate) fn drive<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), LineError> {
    pin.set_state(PinState::from(high))
        .map_err(|_| LineError::Write)
}

/// One clock pulse: high, then low
pub(crate) fn pulse<P: OutputPin>(pin: &mut P) -> Result<(), LineError> {
    drive(pin, true)?;
    drive(pin, false)
}

/// Sample an input line
pub(crate) fn read<P: InputPin>(pin: &mut P) -> Result<bool, LineError> {
    pin.is_high().map_err(|_| LineError::Read)
}
