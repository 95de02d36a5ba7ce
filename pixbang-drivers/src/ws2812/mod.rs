//! WS2812 single-wire LED driver
//!
//! Drives one LED from a plain GPIO pin. Each bit is a HIGH pulse whose
//! length encodes the value, followed by LOW for the rest of a fixed
//! period; both are timed by busy-waiting on CPU cycles.

pub mod emitter;
#[cfg(test)]
mod sim;

pub use emitter::Ws2812;
pub use pixbang_core::timing::{RESET_MIN_US, RESET_US};
