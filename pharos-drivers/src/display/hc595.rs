//! Two-digit seven-segment display behind a 74HC595 shift register
//!
//! A frame is 16 bits: the units pattern followed by the tens pattern, each
//! in segment wiring order. Every bit is presented on DS and clocked in with
//! one SHCP pulse; after the 16th bit a single STCP pulse latches the new
//! segments onto the outputs.
//!
//! Bits are sent one [`DigitShifter::step`] at a time so the caller can pace
//! them without blocking. The driver owns the frame being shifted and a
//! short queue of frames submitted while it was busy, which keeps every
//! frame a contiguous 16-bit block on the wire.

use embedded_hal::digital::OutputPin;
use heapless::Deque;
use pharos_core::segments::{pattern_for, Glyph, SegmentPattern, DECIMAL_POINT_BIT, SEGMENT_COUNT};
use pharos_core::traits::{DigitShifter, DisplayError, FrameStart, LineError, StepOutcome};

use crate::line::{drive, pulse};

/// Frames that may wait behind the one being shifted
pub const MAX_PENDING_FRAMES: usize = 2;

/// Bits per frame
pub const FRAME_BITS: u8 = 2 * SEGMENT_COUNT as u8;

/// One display update in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShiftFrame {
    units: SegmentPattern,
    tens: SegmentPattern,
    cursor: u8,
}

impl ShiftFrame {
    /// A frame that has not shifted anything yet
    pub fn new(units: Glyph, tens: Glyph) -> Self {
        Self {
            units: pattern_for(units),
            tens: pattern_for(tens),
            cursor: 0,
        }
    }

    /// Index of the next bit to shift (0-15)
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Level for the bit under the cursor
    ///
    /// When `dark` is set the units decimal point is lit whatever the
    /// pattern says.
    pub fn current_bit(&self, dark: bool) -> bool {
        let i = self.cursor as usize;
        if i < SEGMENT_COUNT {
            (i == DECIMAL_POINT_BIT && dark) || self.units.bit(i)
        } else {
            self.tens.bit(i - SEGMENT_COUNT)
        }
    }

    fn advance(&mut self) -> bool {
        self.cursor += 1;
        self.cursor >= FRAME_BITS
    }
}

/// 74HC595 driver
pub struct Hc595<DS, SHCP, STCP> {
    ds: DS,
    shcp: SHCP,
    stcp: STCP,
    active: Option<ShiftFrame>,
    pending: Deque<ShiftFrame, MAX_PENDING_FRAMES>,
}

impl<DS, SHCP, STCP> Hc595<DS, SHCP, STCP>
where
    DS: OutputPin,
    SHCP: OutputPin,
    STCP: OutputPin,
{
    /// Take the lines and drive both clocks low
    pub fn new(ds: DS, shcp: SHCP, stcp: STCP) -> Result<Self, LineError> {
        let mut driver = Self {
            ds,
            shcp,
            stcp,
            active: None,
            pending: Deque::new(),
        };
        drive(&mut driver.shcp, false)?;
        drive(&mut driver.stcp, false)?;
        Ok(driver)
    }

    /// Frame being shifted, if any
    pub fn active(&self) -> Option<&ShiftFrame> {
        self.active.as_ref()
    }

    /// Number of frames waiting behind the active one
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn clock_out(&mut self, bit: bool, last: bool) -> Result<(), LineError> {
        drive(&mut self.ds, bit)?;
        pulse(&mut self.shcp)?;
        if last {
            pulse(&mut self.stcp)?;
        }
        Ok(())
    }
}

impl<DS, SHCP, STCP> DigitShifter for Hc595<DS, SHCP, STCP>
where
    DS: OutputPin,
    SHCP: OutputPin,
    STCP: OutputPin,
{
    fn display(&mut self, units: Glyph, tens: Glyph) -> Result<FrameStart, DisplayError> {
        let frame = ShiftFrame::new(units, tens);

        if self.active.is_none() {
            self.active = Some(frame);
            return Ok(FrameStart::Started);
        }

        self.pending
            .push_back(frame)
            .map_err(|_| DisplayError::Backlog)?;
        Ok(FrameStart::Queued)
    }

    fn step(&mut self, dark: bool) -> Result<StepOutcome, DisplayError> {
        let Some(frame) = self.active.as_mut() else {
            return Ok(StepOutcome::Idle);
        };

        let bit = frame.current_bit(dark);
        let last = frame.advance();

        // A failed line leaves the register contents unknown; drop every
        // frame so the next update starts clean
        if let Err(err) = self.clock_out(bit, last) {
            self.clear();
            return Err(err.into());
        }

        if !last {
            return Ok(StepOutcome::Shifted);
        }

        self.active = self.pending.pop_front();
        Ok(StepOutcome::Latched {
            next_frame: self.active.is_some(),
        })
    }

    fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    fn clear(&mut self) {
        self.active = None;
        self.pending.clear();
    }
}
