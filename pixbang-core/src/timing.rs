//! WS2812 protocol timing
//!
//! Durations are specified in nanoseconds and converted to whole CPU cycles
//! for one fixed clock frequency. The conversion is a `const fn`, so a
//! clock that cannot meet the protocol is rejected when the firmware is
//! compiled rather than showing up as wrong colours on the bench.
//!
//! ```text
//!        ┌──── T0H ────┐
//!  "0"  ─┘             └────────────── T0L ──────────┐
//!        ┌────────── T1H ──────────┐
//!  "1"  ─┘                         └────── T1L ──────┐
//!        |<────────────── BIT_PERIOD ──────────────>|
//! ```

/// HIGH time of a "0" bit
pub const T0H_NS: u32 = 350;

/// HIGH time of a "1" bit
pub const T1H_NS: u32 = 700;

/// Total length of one bit, independent of its value
pub const BIT_PERIOD_NS: u32 = 1250;

/// Allowed deviation of either HIGH phase from nominal
pub const HIGH_TOLERANCE_NS: u32 = 150;

/// Allowed deviation of the bit period from nominal
pub const PERIOD_TOLERANCE_NS: u32 = 600;

/// Shortest LOW hold the receiver treats as end of frame
pub const RESET_MIN_US: u32 = 50;

/// LOW hold used by the driver to latch a frame
pub const RESET_US: u32 = 60;

const _: () = assert!(RESET_US >= RESET_MIN_US);
const _: () = assert!(T1H_NS > T0H_NS && T1H_NS < BIT_PERIOD_NS);

const NS_PER_S: u64 = 1_000_000_000;

/// Why a clock frequency cannot drive the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Clock frequency of zero
    ZeroClock,
    /// A "0" HIGH phase rounds down to no cycles at all
    ZeroHighPulse,
    /// "0" HIGH phase outside tolerance after rounding to cycles
    ZeroHighOutOfTolerance,
    /// "1" HIGH phase outside tolerance after rounding to cycles
    OneHighOutOfTolerance,
    /// "1" HIGH phase is not 1.5 to 3 times the "0" HIGH phase
    PulseRatio,
    /// "1" HIGH phase leaves no LOW time in the bit period
    NoLowPhase,
    /// Bit period outside tolerance after rounding to cycles
    PeriodOutOfTolerance,
}

impl TimingError {
    /// Human-readable description
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimingError::ZeroClock => "clock frequency is zero",
            TimingError::ZeroHighPulse => "clock too slow for a 350 ns pulse",
            TimingError::ZeroHighOutOfTolerance => "\"0\" pulse out of tolerance at this clock",
            TimingError::OneHighOutOfTolerance => "\"1\" pulse out of tolerance at this clock",
            TimingError::PulseRatio => "\"1\" and \"0\" pulses not distinguishable at this clock",
            TimingError::NoLowPhase => "\"1\" pulse fills the whole bit period",
            TimingError::PeriodOutOfTolerance => "bit period out of tolerance at this clock",
        }
    }
}

impl core::fmt::Display for TimingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert nanoseconds to the nearest whole number of cycles
pub const fn ns_to_cycles(clock_hz: u32, ns: u32) -> u32 {
    ((ns as u64 * clock_hz as u64 + NS_PER_S / 2) / NS_PER_S) as u32
}

/// Convert cycles to nanoseconds, rounding down
pub const fn cycles_to_ns(clock_hz: u32, cycles: u32) -> u32 {
    if clock_hz == 0 {
        return 0;
    }
    (cycles as u64 * NS_PER_S / clock_hz as u64) as u32
}

/// Cycle counts for one bit at a fixed clock frequency
///
/// Only constructible through [`BitTiming::checked`] (or [`BitTiming::new`],
/// which panics), so every value satisfies the protocol tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitTiming {
    clock_hz: u32,
    t0h: u32,
    t1h: u32,
    period: u32,
    /// Cycles spent per phase outside the delay (pin write, branch)
    overhead: u32,
}

impl BitTiming {
    /// Compute cycle counts for `clock_hz`, or report why it cannot work
    pub const fn checked(clock_hz: u32) -> Result<Self, TimingError> {
        if clock_hz == 0 {
            return Err(TimingError::ZeroClock);
        }

        let t0h = ns_to_cycles(clock_hz, T0H_NS);
        let t1h = ns_to_cycles(clock_hz, T1H_NS);
        let period = ns_to_cycles(clock_hz, BIT_PERIOD_NS);

        if t0h == 0 {
            return Err(TimingError::ZeroHighPulse);
        }
        if cycles_to_ns(clock_hz, t0h).abs_diff(T0H_NS) > HIGH_TOLERANCE_NS {
            return Err(TimingError::ZeroHighOutOfTolerance);
        }
        if cycles_to_ns(clock_hz, t1h).abs_diff(T1H_NS) > HIGH_TOLERANCE_NS {
            return Err(TimingError::OneHighOutOfTolerance);
        }
        // 1.5 <= t1h / t0h <= 3
        if 2 * t1h < 3 * t0h || t1h > 3 * t0h {
            return Err(TimingError::PulseRatio);
        }
        if t1h >= period {
            return Err(TimingError::NoLowPhase);
        }
        if cycles_to_ns(clock_hz, period).abs_diff(BIT_PERIOD_NS) > PERIOD_TOLERANCE_NS {
            return Err(TimingError::PeriodOutOfTolerance);
        }

        Ok(Self {
            clock_hz,
            t0h,
            t1h,
            period,
            overhead: 0,
        })
    }

    /// Compute cycle counts for `clock_hz`
    ///
    /// # Panics
    ///
    /// If the clock cannot meet the protocol. Use in a `const` item to turn
    /// that into a compile error:
    ///
    /// ```
    /// use pixbang_core::BitTiming;
    /// const TIMING: BitTiming = BitTiming::new(20_000_000);
    /// assert_eq!(TIMING.high_cycles(true), 14);
    /// ```
    pub const fn new(clock_hz: u32) -> Self {
        match Self::checked(clock_hz) {
            Ok(timing) => timing,
            Err(e) => panic!("{}", e.as_str()),
        }
    }

    /// Account for cycles spent outside the delay in each phase
    ///
    /// Every HIGH and LOW phase is shortened by `cycles`. HIGH phases never
    /// drop below one cycle.
    pub const fn with_overhead(self, cycles: u32) -> Self {
        Self {
            overhead: cycles,
            ..self
        }
    }

    /// Clock frequency these counts are calibrated for
    pub const fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    /// Per-phase overhead subtracted from the delays
    pub const fn overhead_cycles(&self) -> u32 {
        self.overhead
    }

    /// Cycles in one bit period
    pub const fn period_cycles(&self) -> u32 {
        self.period
    }

    /// Nominal HIGH cycles for `bit`, before overhead
    pub const fn pulse_cycles(&self, bit: bool) -> u32 {
        if bit {
            self.t1h
        } else {
            self.t0h
        }
    }

    /// Cycles to wait while HIGH for `bit`
    pub const fn high_cycles(&self, bit: bool) -> u32 {
        let cycles = self.pulse_cycles(bit).saturating_sub(self.overhead);
        if cycles == 0 {
            1
        } else {
            cycles
        }
    }

    /// Cycles to wait while LOW for `bit`, completing the period
    pub const fn low_cycles(&self, bit: bool) -> u32 {
        (self.period - self.pulse_cycles(bit)).saturating_sub(self.overhead)
    }

    /// Nominal HIGH time for `bit` at this clock
    pub const fn high_ns(&self, bit: bool) -> u32 {
        cycles_to_ns(self.clock_hz, self.pulse_cycles(bit))
    }

    /// Bit period at this clock
    pub const fn period_ns(&self) -> u32 {
        cycles_to_ns(self.clock_hz, self.period)
    }

    /// Convert a cycle count at this clock to nanoseconds
    pub const fn cycles_to_ns(&self, cycles: u32) -> u32 {
        cycles_to_ns(self.clock_hz, cycles)
    }
}
