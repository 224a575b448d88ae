//! Peripheral collaborators used by the console.
//!
//! The console never touches hardware directly. It reads and writes the GPIO
//! registers, the LED register and the reset control through these traits,
//! and blocks through `embedded_hal::delay::DelayNs`.
//!
//! Every call must reach the live register: implementations may not cache
//! values or reorder accesses, since the command handlers rely on
//! read-modify-write sequences being issued exactly as written.

use embedded_hal::delay::DelayNs;

pub mod litex;

pub use litex::{CsrMap, DemoTable, GpioCsr, LitexBoard, LitexUart};

/// GPIO register block (32 pins).
pub trait GpioRegisters {
    /// Read the input register.
    fn read_in(&mut self) -> u32;

    /// Read the output register.
    fn read_out(&mut self) -> u32;

    /// Write the output register.
    fn write_out(&mut self, value: u32);

    /// Read the output-enable register (1 = pin drives output).
    fn read_oe(&mut self) -> u32;

    /// Write the output-enable register.
    fn write_oe(&mut self, value: u32);
}

/// Built-in demo payloads launched from the top-level console.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Demo {
    /// Spinning ASCII donut
    Donut,

    /// Hello world in C
    HelloC,

    /// Hello world in C++
    HelloCpp,
}

impl Demo {
    /// Line printed before the demo starts.
    pub fn announcement(&self) -> &'static str {
        match self {
            Demo::Donut => "Donut demo...",
            Demo::HelloC => "Hello C demo...",
            Demo::HelloCpp => "Hello C++ demo...",
        }
    }
}

/// Everything the console needs from the SoC.
///
/// `DelayNs::delay_ms` is the busy-wait primitive used by `pulse`, `blink`
/// and the LED show.
pub trait Board: GpioRegisters + DelayNs {
    /// Write the LED output register.
    fn write_leds(&mut self, value: u32);

    /// Request a CPU reset.
    fn reboot(&mut self);

    /// Run a demo payload to completion.
    fn run_demo(&mut self, demo: Demo);
}
