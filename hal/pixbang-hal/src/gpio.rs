//! GPIO pin abstraction
//!
//! The driver owns exactly one pin for the duration of a transmission, so
//! the trait only covers what a single-wire transmitter needs.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. `set_high` and `set_low` are on the timing-critical
/// path and must compile down to a single store where possible.
pub trait OutputPin {
    /// Configure the pin direction as output
    ///
    /// Does not change the output level. Calling this on a pin that is
    /// already an output has no effect.
    fn set_output(&mut self);

    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently configured as an output
    fn is_output(&self) -> bool;
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    #[inline(always)]
    fn set_output(&mut self) {
        T::set_output(self)
    }

    #[inline(always)]
    fn set_high(&mut self) {
        T::set_high(self)
    }

    #[inline(always)]
    fn set_low(&mut self) {
        T::set_low(self)
    }

    fn is_set_high(&self) -> bool {
        T::is_set_high(self)
    }

    fn is_output(&self) -> bool {
        T::is_output(self)
    }
}
