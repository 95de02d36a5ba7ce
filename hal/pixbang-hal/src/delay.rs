//! Busy-wait delay abstraction
//!
//! Durations below a microsecond cannot come from a timer on the chips this
//! targets, so the primitive unit is one CPU cycle.

/// Busy-wait delay calibrated against a fixed CPU clock
pub trait CycleDelay {
    /// CPU clock frequency this delay is calibrated for, in Hz
    fn clock_hz(&self) -> u32;

    /// Execute a single no-operation instruction (one cycle)
    fn nop(&mut self);

    /// Busy-wait for at least `cycles` CPU cycles
    fn delay_cycles(&mut self, cycles: u32);

    /// Busy-wait for at least `us` microseconds
    ///
    /// Coarse: the conversion rounds up to whole cycles.
    fn delay_us(&mut self, us: u32) {
        let cycles = us_to_cycles(self.clock_hz(), us);
        // Split to keep each call within u32 on very long waits
        let mut remaining = cycles;
        while remaining > 0 {
            let chunk = remaining.min(u32::MAX as u64) as u32;
            self.delay_cycles(chunk);
            remaining -= chunk as u64;
        }
    }
}

impl<T: CycleDelay + ?Sized> CycleDelay for &mut T {
    fn clock_hz(&self) -> u32 {
        T::clock_hz(self)
    }

    #[inline(always)]
    fn nop(&mut self) {
        T::nop(self)
    }

    #[inline(always)]
    fn delay_cycles(&mut self, cycles: u32) {
        T::delay_cycles(self, cycles)
    }

    fn delay_us(&mut self, us: u32) {
        T::delay_us(self, us)
    }
}

/// Number of cycles covering `us` microseconds at `clock_hz`, rounded up
pub const fn us_to_cycles(clock_hz: u32, us: u32) -> u64 {
    (clock_hz as u64 * us as u64).div_ceil(1_000_000)
}
