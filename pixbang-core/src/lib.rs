//! Board-agnostic core logic for the bit-banged WS2812 driver
//!
//! This crate contains everything that does not depend on a specific
//! microcontroller:
//!
//! - Protocol timing constants and their conversion to CPU cycles
//! - Pixel type and the green/red/blue wire order
//! - Build-time configuration types and validation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod pixel;
pub mod timing;

pub use config::{truncate_chars, ConfigError, LedConfig};
pub use pixel::Pixel;
pub use timing::{BitTiming, TimingError};
