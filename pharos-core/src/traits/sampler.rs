//! Analog sampler and digital line errors

use pharos_protocol::AdcChannel;

/// Errors raised by a digital line
///
/// Drivers map their pin error type onto this at the boundary. Failures are
/// reported as-is and never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Driving an output line failed
    Write,
    /// Reading an input line failed
    Read,
}

/// Trait for multi-channel analog-to-digital converters
pub trait AnalogSampler {
    /// Run one single-ended conversion on `channel`
    ///
    /// Returns the 10-bit result (0-1023). The conversion is synchronous and
    /// finishes before this returns.
    fn sample(&mut self, channel: AdcChannel) -> Result<u16, LineError>;
}
