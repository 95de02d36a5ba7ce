//! Build script for pixbang-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates pixbang.toml and generates the timing constants

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pixbang_core::{truncate_chars, LedConfig};

/// GPIOs on the RP2040 bank 0
const RP2040_GPIO_COUNT: u8 = 30;

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate pixbang.toml and write `pixbang_config.rs` into OUT_DIR
fn generate_config() {
    println!("cargo:rerun-if-changed=pixbang.toml");

    let config_path = Path::new("pixbang.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: pixbang.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware needs [clock] cpu_hz and [led] pin to calibrate    ║\n\
            ║  its bit timing. Create pixbang.toml next to Cargo.toml.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read pixbang.toml", &e.to_string()),
    };

    let config: LedConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail("Invalid pixbang.toml", &e.to_string()),
    };

    let timing = match config.validate(RP2040_GPIO_COUNT) {
        Ok(timing) => timing,
        Err(e) => fail("pixbang.toml cannot drive WS2812", &e.to_string()),
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("pixbang_config.rs"), render_config(&config)).unwrap();

    println!(
        "cargo:warning=pixbang.toml validated: GPIO{} at {} Hz, T0H={} cycles, T1H={} cycles, period={} cycles",
        config.led.pin,
        config.clock.cpu_hz,
        timing.pulse_cycles(false),
        timing.pulse_cycles(true),
        timing.period_cycles()
    );
}

/// Generated constants and pin-taking macro
fn render_config(config: &LedConfig) -> String {
    let mut out = String::new();
    writeln!(out, "// Generated from pixbang.toml by build.rs").unwrap();
    writeln!(out, "pub const CPU_HZ: u32 = {};", config.clock.cpu_hz).unwrap();
    writeln!(out, "pub const LED_PIN: u8 = {};", config.led.pin).unwrap();
    writeln!(
        out,
        "pub const OVERHEAD_CYCLES: u32 = {};",
        config.led.overhead_cycles
    )
    .unwrap();
    writeln!(
        out,
        "macro_rules! led_pin {{ ($p:expr) => {{ $p.PIN_{} }}; }}",
        config.led.pin
    )
    .unwrap();
    out
}

/// Abort the build with a boxed error report
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", truncate_chars(line, 61))
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
