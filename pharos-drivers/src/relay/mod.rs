//! Relay channel outputs

pub mod pulse;

pub use pulse::PulseController;
