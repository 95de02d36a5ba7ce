//! Virtual-time pin and delay for host tests
//!
//! [`SimLine`] is one simulated data line with a cycle counter. Its pin
//! records every write with the cycle it happened at; its delay advances
//! the counter instead of spinning. Pulse widths and periods then fall out
//! of the event log exactly.

use core::cell::{Cell, RefCell};

use pixbang_core::timing::{cycles_to_ns, T0H_NS, T1H_NS};
use pixbang_hal::{CycleDelay, OutputPin};
use pixbang_hal_cortex_m::delay::{DelayPlan, LOOP_CYCLES};

/// Pin write observed on the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Output { at: u64 },
    High { at: u64 },
    Low { at: u64 },
}

/// One HIGH pulse, in cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// Cycle the line went HIGH
    pub rise: u64,
    /// Cycles spent HIGH
    pub high: u64,
    /// Cycles until the next rise (or until now, for the last pulse)
    pub period: u64,
}

pub struct SimLine {
    clock_hz: u32,
    /// Cycles each pin write takes after it lands
    write_cost: u64,
    now: Cell<u64>,
    output: Cell<bool>,
    high: Cell<bool>,
    events: RefCell<Vec<Event>>,
}

impl SimLine {
    pub fn new(clock_hz: u32) -> Self {
        Self::with_write_cost(clock_hz, 0)
    }

    pub fn with_write_cost(clock_hz: u32, write_cost: u64) -> Self {
        Self {
            clock_hz,
            write_cost,
            now: Cell::new(0),
            output: Cell::new(false),
            high: Cell::new(false),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn pin(&self) -> SimPin<'_> {
        SimPin { line: self }
    }

    pub fn delay(&self) -> SimDelay<'_> {
        SimDelay { line: self }
    }

    /// Delay costed like `cortex_m::asm::delay` plus trailing nops
    pub fn loop_delay(&self) -> SimLoopDelay<'_> {
        SimLoopDelay { line: self }
    }

    /// Put the line HIGH without logging, as left by earlier firmware
    pub fn force_high(&self) {
        self.high.set(true);
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn is_output(&self) -> bool {
        self.output.get()
    }

    pub fn is_high(&self) -> bool {
        self.high.get()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Cycle of the most recent level write
    pub fn last_level_change(&self) -> Option<u64> {
        self.events.borrow().iter().rev().find_map(|e| match *e {
            Event::High { at } | Event::Low { at } => Some(at),
            Event::Output { .. } => None,
        })
    }

    /// Every HIGH pulse on the line, in order
    pub fn pulses(&self) -> Vec<Pulse> {
        let events = self.events.borrow();
        let mut rises = Vec::new();
        let mut pulses: Vec<Pulse> = Vec::new();

        for (i, event) in events.iter().enumerate() {
            if let Event::High { at } = *event {
                let fall = events[i + 1..]
                    .iter()
                    .find_map(|e| match *e {
                        Event::Low { at } => Some(at),
                        _ => None,
                    })
                    .unwrap_or(self.now());
                rises.push(at);
                pulses.push(Pulse {
                    rise: at,
                    high: fall - at,
                    period: 0,
                });
            }
        }

        for i in 0..pulses.len() {
            let next = rises.get(i + 1).copied().unwrap_or(self.now());
            pulses[i].period = next - pulses[i].rise;
        }
        pulses
    }

    /// Bits as a receiver would read them: long pulse = 1
    pub fn decode_bits(&self) -> Vec<bool> {
        let threshold_ns = (T0H_NS + T1H_NS) / 2;
        self.pulses()
            .iter()
            .map(|p| cycles_to_ns(self.clock_hz, p.high as u32) > threshold_ns)
            .collect()
    }

    /// Decoded bits grouped MSB-first into bytes
    pub fn decode_bytes(&self) -> Vec<u8> {
        self.decode_bits()
            .chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
            .collect()
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
        self.advance(self.write_cost);
    }

    fn advance(&self, cycles: u64) {
        self.now.set(self.now.get() + cycles);
    }
}

pub struct SimPin<'a> {
    line: &'a SimLine,
}

impl OutputPin for SimPin<'_> {
    fn set_output(&mut self) {
        self.line.output.set(true);
        self.line.record(Event::Output { at: self.line.now() });
    }

    fn set_high(&mut self) {
        self.line.high.set(true);
        self.line.record(Event::High { at: self.line.now() });
    }

    fn set_low(&mut self) {
        self.line.high.set(false);
        self.line.record(Event::Low { at: self.line.now() });
    }

    fn is_set_high(&self) -> bool {
        self.line.high.get()
    }

    fn is_output(&self) -> bool {
        self.line.output.get()
    }
}

pub struct SimDelay<'a> {
    line: &'a SimLine,
}

impl CycleDelay for SimDelay<'_> {
    fn clock_hz(&self) -> u32 {
        self.line.clock_hz
    }

    fn nop(&mut self) {
        self.line.advance(1);
    }

    fn delay_cycles(&mut self, cycles: u32) {
        self.line.advance(cycles as u64);
    }
}

/// Executes a [`DelayPlan`] the way the Cortex-M core does: `delay(n)`
/// spins `n + 1` loop passes
pub struct SimLoopDelay<'a> {
    line: &'a SimLine,
}

impl CycleDelay for SimLoopDelay<'_> {
    fn clock_hz(&self) -> u32 {
        self.line.clock_hz
    }

    fn nop(&mut self) {
        self.line.advance(1);
    }

    fn delay_cycles(&mut self, cycles: u32) {
        let plan = DelayPlan::for_cycles(cycles);
        if let Some(arg) = plan.loop_arg() {
            self.line.advance(LOOP_CYCLES as u64 * (arg as u64 + 1));
        }
        self.line.advance(plan.nops as u64);
    }
}
