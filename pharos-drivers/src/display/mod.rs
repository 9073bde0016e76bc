//! Digit display drivers

pub mod hc595;

pub use hc595::{Hc595, ShiftFrame, MAX_PENDING_FRAMES};
