//! Hardware abstraction traits
//!
//! These traits define the interface between the panel logic and the
//! board-specific drivers and transports.

pub mod broadcast;
pub mod display;
pub mod outputs;
pub mod sampler;

pub use broadcast::Broadcast;
pub use display::{DigitShifter, DisplayError, FrameStart, StepOutcome};
pub use outputs::{LedOutputs, PulseOutputs};
pub use sampler::{AnalogSampler, LineError};
