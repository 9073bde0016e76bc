//! Digit display driver trait

use crate::segments::Glyph;

use super::sampler::LineError;

/// Errors from the digit display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// A control line failed mid-frame
    Line(LineError),
    /// Too many frames waiting behind the active one
    Backlog,
}

impl From<LineError> for DisplayError {
    fn from(err: LineError) -> Self {
        DisplayError::Line(err)
    }
}

/// Result of submitting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameStart {
    /// The frame is active; the caller must schedule the first step
    Started,
    /// Another frame is still shifting; this one follows it
    Queued,
}

/// Result of one shift step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// One bit went out; more remain in the frame
    Shifted,
    /// The last bit went out and the outputs were latched
    Latched {
        /// A queued frame became active and needs further steps
        next_frame: bool,
    },
    /// No frame was active
    Idle,
}

impl StepOutcome {
    /// True when another step must be scheduled
    pub fn needs_step(self) -> bool {
        matches!(
            self,
            StepOutcome::Shifted | StepOutcome::Latched { next_frame: true }
        )
    }
}

/// Trait for a two-digit display fed one bit at a time
///
/// A frame is the units digit followed by the tens digit. The driver owns the
/// frame in progress, so the caller only decides *when* each step runs.
/// Frames are shifted out whole and in submission order; a new frame never
/// interrupts one in progress.
pub trait DigitShifter {
    /// Submit a new frame
    fn display(&mut self, units: Glyph, tens: Glyph) -> Result<FrameStart, DisplayError>;

    /// Shift the next bit of the active frame
    ///
    /// `dark` lights the units decimal point when its bit is shifted.
    fn step(&mut self, dark: bool) -> Result<StepOutcome, DisplayError>;

    /// True while a frame is active
    fn is_busy(&self) -> bool;

    /// Drop the active frame and every queued one
    ///
    /// Used when the next step cannot be scheduled; the next submitted frame
    /// starts from a clean register.
    fn clear(&mut self);
}
