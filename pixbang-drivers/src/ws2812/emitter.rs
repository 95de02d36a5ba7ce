//! Bit-timed signal emitter
//!
//! Call order for one frame:
//!
//! ```text
//! init() ──► emit_pixel() / send_pixel() ──► latch()
//!   once          one LED, 24 bits             ≥50 µs LOW
//! ```
//!
//! Byte and pixel emission run inside a critical section. An interrupt
//! landing mid-bit would stretch a pulse or a gap past what the receiver
//! tolerates, and a stretched LOW phase reads as a premature latch.

use pixbang_core::timing::RESET_US;
use pixbang_core::{BitTiming, Pixel};
use pixbang_hal::{CycleDelay, OutputPin};

/// WS2812 emitter owning its data pin
///
/// The pin must not be driven by anything else while the emitter exists;
/// taking it by value enforces that in safe code.
pub struct Ws2812<P, D> {
    pin: P,
    delay: D,
    timing: BitTiming,
}

impl<P: OutputPin, D: CycleDelay> Ws2812<P, D> {
    /// Create an emitter without touching the pin
    ///
    /// `timing` must be calibrated for the same clock `delay` runs on.
    /// Call [`init`](Self::init) before the first emission.
    pub fn new(pin: P, delay: D, timing: BitTiming) -> Self {
        debug_assert_eq!(
            delay.clock_hz(),
            timing.clock_hz(),
            "bit timing calibrated for a different clock"
        );
        Self { pin, delay, timing }
    }

    /// Configure the pin as an output and drive it LOW (idle)
    ///
    /// Safe to call more than once.
    pub fn init(&mut self) {
        self.pin.set_output();
        self.pin.set_low();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ws2812: init, T0H={}ns T1H={}ns period={}ns",
            self.timing.high_ns(false),
            self.timing.high_ns(true),
            self.timing.period_ns()
        );
    }

    /// Emit one bit: HIGH for the bit's pulse width, then LOW for the rest
    /// of the period
    pub fn emit_bit(&mut self, bit: bool) {
        critical_section::with(|_| self.write_bit(bit));
    }

    /// Emit 8 bits, most significant first
    pub fn emit_byte(&mut self, value: u8) {
        critical_section::with(|_| self.write_byte(value));
    }

    /// Emit one pixel as green, red, blue
    pub fn emit_pixel(&mut self, pixel: Pixel) {
        let bytes = pixel.wire_bytes();
        critical_section::with(|_| {
            for byte in bytes {
                self.write_byte(byte);
            }
        });
    }

    /// Emit one pixel from channel values given in wire order
    ///
    /// The parameters are green, red, blue, the order the LED reads them.
    /// Callers holding red/green/blue values should build a [`Pixel`] and use
    /// [`emit_pixel`](Self::emit_pixel) instead of reordering by hand.
    pub fn send_pixel(&mut self, green: u8, red: u8, blue: u8) {
        self.emit_pixel(Pixel::from_wire(green, red, blue));
    }

    /// Hold the line LOW long enough for the LED to apply the frame
    ///
    /// Must follow the last pixel of a frame; without it the next pixel is
    /// read as a continuation of the current frame.
    pub fn latch(&mut self) {
        self.pin.set_low();
        self.delay.delay_us(RESET_US);

        #[cfg(feature = "defmt")]
        defmt::trace!("ws2812: latched");
    }

    /// Timing in use
    pub fn timing(&self) -> &BitTiming {
        &self.timing
    }

    /// Give back the pin and delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    #[inline(always)]
    fn write_bit(&mut self, bit: bool) {
        let high = self.timing.high_cycles(bit);
        let low = self.timing.low_cycles(bit);

        self.pin.set_high();
        self.delay.delay_cycles(high);
        self.pin.set_low();
        self.delay.delay_cycles(low);
    }

    #[inline(always)]
    fn write_byte(&mut self, mut value: u8) {
        for _ in 0..8 {
            self.write_bit(value & 0x80 != 0);
            value <<= 1;
        }
    }
}
