//! Cortex-M adapters for the Pixbang HAL traits
//!
//! This crate provides the lowest layer under the WS2812 emitter:
//!
//! - [`gpio::SetClearPin`] - a pin driven through memory-mapped atomic
//!   set/clear registers, with layouts for common GPIO blocks
//! - [`delay::DelayPlan`] - cycle count split into `asm::delay` loop
//!   passes and trailing `nop`s
//! - `delay::CortexMDelay` - busy-wait delay executing that plan
//!   (only built for `target_arch = "arm"`)
//!
//! # Usage
//!
//! Pin multiplexing (function select, pad config) is chip specific and is
//! left to the chip HAL. Once the pin is routed to the GPIO block, hand its
//! register block address to [`gpio::SetClearPin::new`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod delay;
pub mod gpio;

#[cfg(target_arch = "arm")]
pub use delay::CortexMDelay;
pub use delay::DelayPlan;
pub use gpio::{PortLayout, SetClearPin};
