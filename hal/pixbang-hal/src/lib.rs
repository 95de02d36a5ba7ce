//! Pixbang Hardware Abstraction Layer
//!
//! This crate defines the two capabilities the bit-banged WS2812 driver
//! needs from a microcontroller: a single output pin and a busy-wait delay
//! calibrated in CPU cycles. Chip-specific crates implement them; the
//! driver never touches registers itself.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pixbang-drivers (Ws2812 emitter)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pixbang-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pixbang-hal-cortex-m (registers, asm)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Direction and level control of one pin
//! - [`delay::CycleDelay`] - Cycle-accurate and microsecond busy-waits

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use delay::CycleDelay;
pub use gpio::OutputPin;
