//! Pixbang - single WS2812 LED demo
//!
//! Bit-bangs one addressable LED from a plain RP2040 GPIO, stepping
//! through a short colour table. Pin and clock come from pixbang.toml.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use pixbang_core::{BitTiming, Pixel};
use pixbang_drivers::Ws2812;
use pixbang_hal_cortex_m::gpio::{PortLayout, SetClearPin, RP2040_SIO_BASE};
use pixbang_hal_cortex_m::CortexMDelay;

#[macro_use]
mod config {
    include!(concat!(env!("OUT_DIR"), "/pixbang_config.rs"));
}

use config::{CPU_HZ, LED_PIN, OVERHEAD_CYCLES};

/// Compile error if the configured clock cannot meet WS2812 timing
const TIMING: BitTiming = BitTiming::new(CPU_HZ).with_overhead(OVERHEAD_CYCLES);

/// Hold time per colour
const STEP_MS: u64 = 500;

/// Colours cycled by the demo
const COLOURS: [Pixel; 6] = [
    Pixel::new(32, 0, 0),
    Pixel::new(0, 32, 0),
    Pixel::new(0, 0, 32),
    Pixel::new(32, 32, 0),
    Pixel::new(16, 16, 16),
    Pixel::OFF,
];

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Pixbang firmware starting...");

    let p = embassy_rp::init(Default::default());

    // The timing constants only hold at the clock they were built for
    let clk_sys = embassy_rp::clocks::clk_sys_freq();
    defmt::assert_eq!(
        clk_sys, CPU_HZ,
        "pixbang.toml cpu_hz does not match the running clock"
    );

    // Routes the pad to SIO as an output. Kept alive: dropping it would
    // return the pad to its reset state.
    let _routed = Output::new(led_pin!(p), Level::Low);

    // SAFETY: SIO is the RP2040 GPIO block at this address, the pin was just
    // routed to it, and `_routed` is never written again.
    let pin = unwrap!(unsafe { SetClearPin::new(RP2040_SIO_BASE, LED_PIN, PortLayout::RP2040_SIO) });

    let mut led = Ws2812::new(pin, CortexMDelay::new(CPU_HZ), TIMING);
    led.init();

    // First pass through the bit loop runs from uncached XIP flash and
    // stretches bits. Send black once so the loop is cached.
    led.emit_pixel(Pixel::OFF);
    led.latch();

    info!(
        "WS2812 on GPIO{}: {} Hz, T0H={}ns T1H={}ns period={}ns",
        LED_PIN,
        CPU_HZ,
        TIMING.high_ns(false),
        TIMING.high_ns(true),
        TIMING.period_ns()
    );

    loop {
        for colour in COLOURS {
            led.emit_pixel(colour);
            led.latch();
            debug!("colour {}", colour);
            Timer::after_millis(STEP_MS).await;
        }
    }
}
