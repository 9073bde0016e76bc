//! MCP3008 8-channel 10-bit ADC over bit-banged SPI
//!
//! The conversation follows the device timing diagram:
//!
//! ```text
//! CS   ‾‾\________________________________________________/‾‾
//! CLK  ___/‾\_/‾\_/‾\_/‾\_/‾\_/‾\_/‾\_ ... _/‾\____________
//! DIN      S   M   D2  D1  D0  x
//! DOUT                             B9  ...  B0
//! ```
//!
//! Five command bits (start, single-ended, channel) go out on rising edges,
//! one further clock closes the sample window, then ten result bits are read
//! MSB first, each after the falling edge of its clock.

use embedded_hal::digital::{InputPin, OutputPin};
use pharos_core::traits::{AnalogSampler, LineError};
use pharos_protocol::AdcChannel;

use crate::line::{drive, pulse, read};

/// Command bits clocked out per conversion
const COMMAND_BITS: usize = 5;

/// Result resolution
const RESULT_BITS: usize = 10;

/// Largest conversion result
pub const FULL_SCALE: u16 = (1 << RESULT_BITS) - 1;

/// Command byte for a single-ended conversion, MSB aligned
///
/// `0b11ccc000`: start bit, single-ended mode bit, three channel bits.
pub const fn command_word(channel: AdcChannel) -> u8 {
    (0x18 | channel.index()) << 3
}

/// Bit-banged MCP3008
pub struct Mcp3008<CLK, DIN, DOUT, CS> {
    clk: CLK,
    din: DIN,
    dout: DOUT,
    cs: CS,
}

impl<CLK, DIN, DOUT, CS> Mcp3008<CLK, DIN, DOUT, CS>
where
    CLK: OutputPin,
    DIN: OutputPin,
    DOUT: InputPin,
    CS: OutputPin,
{
    /// Create a driver from its four lines
    pub fn new(clk: CLK, din: DIN, dout: DOUT, cs: CS) -> Self {
        Self { clk, din, dout, cs }
    }

    /// Give the lines back
    pub fn release(self) -> (CLK, DIN, DOUT, CS) {
        (self.clk, self.din, self.dout, self.cs)
    }

    fn convert(&mut self, channel: AdcChannel) -> Result<u16, LineError> {
        // Reset the clock with the chip deselected, then select it
        drive(&mut self.cs, true)?;
        drive(&mut self.clk, false)?;
        drive(&mut self.cs, false)?;

        let mut command = command_word(channel);
        for _ in 0..COMMAND_BITS {
            drive(&mut self.din, command & 0x80 != 0)?;
            command <<= 1;
            pulse(&mut self.clk)?;
        }

        // Null bit: ends the sample window
        pulse(&mut self.clk)?;

        let mut result: u16 = 0;
        for _ in 0..RESULT_BITS {
            pulse(&mut self.clk)?;
            result <<= 1;
            if read(&mut self.dout)? {
                result |= 1;
            }
        }

        Ok(result & FULL_SCALE)
    }
}

impl<CLK, DIN, DOUT, CS> AnalogSampler for Mcp3008<CLK, DIN, DOUT, CS>
where
    CLK: OutputPin,
    DIN: OutputPin,
    DOUT: InputPin,
    CS: OutputPin,
{
    fn sample(&mut self, channel: AdcChannel) -> Result<u16, LineError> {
        let result = self.convert(channel);
        // Deselect even when the conversion failed part way
        let deselect = drive(&mut self.cs, true);
        let value = result?;
        deselect?;
        Ok(value)
    }
}
