//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pharos-core on top of `embedded-hal` digital lines:
//!
//! - ADC sampler (MCP3008, bit-banged SPI)
//! - Digit display (74HC595 shift register, one bit per step)
//! - Relay pulse lines
//! - Indicator LEDs

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod adc;
pub mod display;
pub mod led;
pub mod relay;

mod line;

#[cfg(test)]
mod scenarios;
#[cfg(test)]
mod sim;

pub use adc::Mcp3008;
pub use display::Hc595;
pub use led::LedBank;
pub use relay::PulseController;
