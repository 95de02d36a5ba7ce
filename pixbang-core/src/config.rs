//! Build-time configuration
//!
//! The firmware reads `pixbang.toml` once, in its build script, and bakes
//! the result into constants. These types are the shared schema; the clock
//! frequency lives here and nowhere else.

use crate::timing::{BitTiming, TimingError};

/// Top-level configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedConfig {
    pub clock: ClockConfig,
    pub led: PinConfig,
}

/// `[clock]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockConfig {
    /// Core clock the firmware runs at, in Hz
    pub cpu_hz: u32,
}

/// `[led]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinConfig {
    /// GPIO number of the data line
    pub pin: u8,
    /// Cycles each phase spends outside the delay (pin store, loop branch)
    #[cfg_attr(feature = "serde", serde(default))]
    pub overhead_cycles: u32,
}

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Clock frequency cannot meet protocol timing
    Timing(TimingError),
    /// Pin number does not exist on the target
    PinOutOfRange { pin: u8, pin_count: u8 },
    /// Overhead swallows the whole "0" HIGH phase
    OverheadTooLarge { overhead: u32, t0h_cycles: u32 },
}

impl From<TimingError> for ConfigError {
    fn from(e: TimingError) -> Self {
        ConfigError::Timing(e)
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Timing(e) => write!(f, "[clock] cpu_hz: {}", e),
            ConfigError::PinOutOfRange { pin, pin_count } => {
                write!(f, "[led] pin {} out of range (0-{})", pin, pin_count.saturating_sub(1))
            }
            ConfigError::OverheadTooLarge {
                overhead,
                t0h_cycles,
            } => write!(
                f,
                "[led] overhead_cycles {} must be below the {}-cycle \"0\" pulse",
                overhead, t0h_cycles
            ),
        }
    }
}

impl LedConfig {
    /// Create a configuration with no per-phase overhead
    pub const fn new(cpu_hz: u32, pin: u8) -> Self {
        Self {
            clock: ClockConfig { cpu_hz },
            led: PinConfig {
                pin,
                overhead_cycles: 0,
            },
        }
    }

    /// Check the configuration for a target with `pin_count` GPIOs
    ///
    /// Returns the bit timing the driver should use.
    pub fn validate(&self, pin_count: u8) -> Result<BitTiming, ConfigError> {
        if self.led.pin >= pin_count {
            return Err(ConfigError::PinOutOfRange {
                pin: self.led.pin,
                pin_count,
            });
        }

        let timing = BitTiming::checked(self.clock.cpu_hz)?;

        let t0h_cycles = timing.pulse_cycles(false);
        if self.led.overhead_cycles >= t0h_cycles {
            return Err(ConfigError::OverheadTooLarge {
                overhead: self.led.overhead_cycles,
                t0h_cycles,
            });
        }

        Ok(timing.with_overhead(self.led.overhead_cycles))
    }
}

/// First `max` characters of `s`, never splitting a UTF-8 sequence
///
/// Used to fit config values and error text into fixed-width reports.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
