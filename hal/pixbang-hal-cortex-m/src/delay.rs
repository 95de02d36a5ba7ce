//! Cycle-counting delay for Cortex-M
//!
//! `cortex_m::asm::delay(n)` is a `subs`/`bne` loop that runs `n + 1` times
//! at [`LOOP_CYCLES`] core cycles per pass. It does not wait `n` cycles, so
//! a requested cycle count is first turned into a [`DelayPlan`]: whole loop
//! passes plus up to two trailing `nop`s. The plan is pure arithmetic and is
//! tested on the host; only [`CortexMDelay`] touches the core.
//!
//! Call and loop entry costs are not in the plan. Fold them into
//! `overhead_cycles` together with the pin store.
//!
//! On RP2040 the code runs from XIP flash. The first pass through the bit
//! loop after a cache eviction stalls on flash reads and stretches that
//! bit. Send a throwaway frame once at start-up so the loop is cached
//! before real data goes out.

/// Core cycles per `cortex_m::asm::delay` loop pass on M0+, M3 and M4
pub const LOOP_CYCLES: u32 = 3;

/// How a cycle count is spent: loop passes, then single `nop`s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DelayPlan {
    /// Passes through the delay loop
    pub passes: u32,
    /// Trailing `nop`s, always below [`LOOP_CYCLES`]
    pub nops: u32,
}

impl DelayPlan {
    /// Split `cycles` into loop passes and a `nop` remainder
    pub const fn for_cycles(cycles: u32) -> Self {
        Self {
            passes: cycles / LOOP_CYCLES,
            nops: cycles % LOOP_CYCLES,
        }
    }

    /// Argument for `cortex_m::asm::delay`, which adds one pass itself
    ///
    /// `None` when the loop must not run at all.
    pub const fn loop_arg(&self) -> Option<u32> {
        if self.passes == 0 {
            None
        } else {
            Some(self.passes - 1)
        }
    }

    /// Cycles the plan spends when executed
    pub const fn cycles(&self) -> u32 {
        self.passes * LOOP_CYCLES + self.nops
    }
}

#[cfg(target_arch = "arm")]
pub use self::core_delay::CortexMDelay;

#[cfg(target_arch = "arm")]
mod core_delay {
    use super::DelayPlan;
    use pixbang_hal::CycleDelay;

    /// Busy-wait delay running on the core clock
    #[derive(Debug, Clone, Copy)]
    pub struct CortexMDelay {
        clock_hz: u32,
    }

    impl CortexMDelay {
        /// Create a delay for a core running at `clock_hz`
        pub const fn new(clock_hz: u32) -> Self {
            Self { clock_hz }
        }
    }

    impl CycleDelay for CortexMDelay {
        fn clock_hz(&self) -> u32 {
            self.clock_hz
        }

        #[inline(always)]
        fn nop(&mut self) {
            cortex_m::asm::nop();
        }

        #[inline(always)]
        fn delay_cycles(&mut self, cycles: u32) {
            let plan = DelayPlan::for_cycles(cycles);
            if let Some(arg) = plan.loop_arg() {
                cortex_m::asm::delay(arg);
            }
            // Unrolled: a loop here would cost more than the nops
            match plan.nops {
                0 => {}
                1 => cortex_m::asm::nop(),
                _ => {
                    cortex_m::asm::nop();
                    cortex_m::asm::nop();
                }
            }
        }
    }
}
