//! Board-agnostic core logic for the Pharos peripheral panel
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (ADC sampler, digit shifter, relay and LED
//!   outputs, observer broadcast)
//! - Delayed-continuation scheduler and clock abstraction
//! - Seven-segment digit patterns
//! - Configuration types and the `panel.toml` reader
//! - The sampling orchestrator ([`panel::Panel`])

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod panel;
pub mod scheduler;
pub mod segments;
pub mod traits;
