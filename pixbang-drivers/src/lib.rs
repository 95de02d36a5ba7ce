//! Hardware driver implementations
//!
//! This crate provides the bit-banged WS2812 emitter on top of the
//! `pixbang-hal` pin and delay traits:
//!
//! - [`ws2812::Ws2812`] - init, bit/byte/pixel emission, latch

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod ws2812;

pub use ws2812::Ws2812;
