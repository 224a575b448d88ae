//! Test fixtures for litex-console testing.
//!
//! Provides:
//! - `MockIo`: Scripted implementation of the SerialIo trait
//! - `MockBoard`: Register-backed Board that records every side effect
//! - `BoardEvent`: One recorded side effect

#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use litex_console::hal::{Board, Demo, GpioRegisters};
use litex_console::SerialIo;
use std::collections::VecDeque;

// ============================================================================
// MockIo - Test I/O Implementation
// ============================================================================

/// Transport errors raised by `MockIo`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MockIoError {
    /// Scripted input ran out.
    Exhausted,
}

/// Mock I/O for testing.
///
/// Provides an input script and output capture. Once the script is used up,
/// `byte_available()` fails with `Exhausted` instead of returning `false`,
/// so the blocking GPIO loop ends instead of spinning forever.
#[derive(Debug, Default)]
pub struct MockIo {
    /// Input queue (simulates user typing)
    input: VecDeque<u8>,

    /// Output capture (collects all output)
    output: Vec<u8>,
}

impl MockIo {
    /// Create new MockIo with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add input to queue (simulates user typing).
    pub fn push_input(&mut self, s: &str) {
        self.input.extend(s.bytes());
    }

    /// Add raw bytes to the input queue.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// True while scripted input remains.
    pub fn has_input(&self) -> bool {
        !self.input.is_empty()
    }

    /// Get captured output as a string.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Raw captured output.
    pub fn output_bytes(&self) -> &[u8] {
        &self.output
    }

    /// Clear output buffer.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl SerialIo for MockIo {
    type Error = MockIoError;

    fn byte_available(&mut self) -> Result<bool, Self::Error> {
        if self.input.is_empty() {
            Err(MockIoError::Exhausted)
        } else {
            Ok(true)
        }
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        self.input.pop_front().ok_or(MockIoError::Exhausted)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}

// ============================================================================
// MockBoard - Test Board Implementation
// ============================================================================

/// Side effect recorded by `MockBoard`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// GPIO output register written
    WriteOut(u32),
    /// GPIO output-enable register written
    WriteOe(u32),
    /// LED register written
    WriteLeds(u32),
    /// Busy-wait
    DelayMs(u32),
    /// CPU reset requested
    Reboot,
    /// Demo launched
    Demo(Demo),
}

/// Board whose registers are plain fields.
#[derive(Debug, Default)]
pub struct MockBoard {
    /// GPIO input register (set by the test)
    pub gpio_in: u32,
    /// GPIO output register
    pub gpio_out: u32,
    /// GPIO output-enable register
    pub gpio_oe: u32,
    /// LED register
    pub leds: u32,
    /// Every side effect in order
    pub events: Vec<BoardEvent>,
}

impl MockBoard {
    /// Create board with all registers zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register writes only (delays and demos filtered out).
    pub fn register_writes(&self) -> Vec<BoardEvent> {
        self.events
            .iter()
            .copied()
            .filter(|e| {
                matches!(
                    e,
                    BoardEvent::WriteOut(_) | BoardEvent::WriteOe(_) | BoardEvent::WriteLeds(_)
                )
            })
            .collect()
    }

    /// Values written to the LED register, in order.
    pub fn led_writes(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BoardEvent::WriteLeds(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    /// Sum of all busy-waits.
    pub fn total_delay_ms(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                BoardEvent::DelayMs(ms) => *ms,
                _ => 0,
            })
            .sum()
    }
}

impl GpioRegisters for MockBoard {
    fn read_in(&mut self) -> u32 {
        self.gpio_in
    }

    fn read_out(&mut self) -> u32 {
        self.gpio_out
    }

    fn write_out(&mut self, value: u32) {
        self.gpio_out = value;
        self.events.push(BoardEvent::WriteOut(value));
    }

    fn read_oe(&mut self) -> u32 {
        self.gpio_oe
    }

    fn write_oe(&mut self, value: u32) {
        self.gpio_oe = value;
        self.events.push(BoardEvent::WriteOe(value));
    }
}

impl DelayNs for MockBoard {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(BoardEvent::DelayMs(ms));
    }
}

impl Board for MockBoard {
    fn write_leds(&mut self, value: u32) {
        self.leds = value;
        self.events.push(BoardEvent::WriteLeds(value));
    }

    fn reboot(&mut self) {
        self.events.push(BoardEvent::Reboot);
    }

    fn run_demo(&mut self, demo: Demo) {
        self.events.push(BoardEvent::Demo(demo));
    }
}
