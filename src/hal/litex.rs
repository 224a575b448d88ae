//! Memory-mapped LiteX CSR bindings.
//!
//! Every access goes through `read_volatile`/`write_volatile`, so the
//! compiler keeps register reads and writes in program order and never
//! merges or elides them.

use core::convert::Infallible;
use core::ptr::{read_volatile, write_volatile};

use embedded_hal::delay::DelayNs;

use super::{Board, Demo, GpioRegisters};
use crate::config::Capabilities;
use crate::io::SerialIo;

#[inline(always)]
fn reg_read(addr: usize) -> u32 {
    // SAFETY: addresses come from a CsrMap/UART base the caller vouched for
    unsafe { read_volatile(addr as *const u32) }
}

#[inline(always)]
fn reg_write(addr: usize, value: u32) {
    // SAFETY: see reg_read
    unsafe { write_volatile(addr as *mut u32, value) }
}

// ============================================================================
// UART
// ============================================================================

const UART_RXTX: usize = 0x00;
const UART_TXFULL: usize = 0x04;
const UART_RXEMPTY: usize = 0x08;
const UART_EV_PENDING: usize = 0x10;

const UART_EV_TX: u32 = 0x1;
const UART_EV_RX: u32 = 0x2;

/// Polled LiteX UART (32-bit CSR data width).
#[derive(Debug)]
pub struct LitexUart {
    base: usize,
}

impl LitexUart {
    /// Bind to the UART CSR block at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the address of a LiteX UART CSR block that nothing
    /// else accesses while this value lives.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }
}

impl SerialIo for LitexUart {
    type Error = Infallible;

    fn byte_available(&mut self) -> Result<bool, Self::Error> {
        Ok(reg_read(self.base + UART_RXEMPTY) == 0)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let byte = reg_read(self.base + UART_RXTX) as u8;
        reg_write(self.base + UART_EV_PENDING, UART_EV_RX);
        Ok(byte)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            while reg_read(self.base + UART_TXFULL) != 0 {
                core::hint::spin_loop();
            }
            reg_write(self.base + UART_RXTX, byte as u32);
            reg_write(self.base + UART_EV_PENDING, UART_EV_TX);
        }
        Ok(())
    }
}

// ============================================================================
// Board
// ============================================================================

/// Addresses of the GPIO core's CSRs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GpioCsr {
    /// Input register
    pub input: usize,
    /// Output register
    pub output: usize,
    /// Output-enable register
    pub oe: usize,
}

/// CSR addresses of the peripherals in this SoC build.
///
/// Absent peripherals are `None`; they also drop out of the capability set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CsrMap {
    /// `ctrl_reset` register
    pub ctrl_reset: usize,
    /// `leds_out` register
    pub leds_out: Option<usize>,
    /// GPIO block
    pub gpio: Option<GpioCsr>,
}

/// Entry points of the linked demo payloads.
#[derive(Debug, Copy, Clone)]
pub struct DemoTable {
    /// Spinning donut
    pub donut: fn(),
    /// Hello C
    pub helloc: fn(),
    /// Hello C++, when built with C++ support
    pub hellocpp: Option<fn()>,
}

/// `Board` implementation over LiteX CSRs.
pub struct LitexBoard<D: DelayNs> {
    csr: CsrMap,
    demos: DemoTable,
    delay: D,
}

impl<D: DelayNs> core::fmt::Debug for LitexBoard<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LitexBoard")
            .field("csr", &self.csr)
            .field("demos", &self.demos)
            .finish_non_exhaustive()
    }
}

impl<D: DelayNs> LitexBoard<D> {
    /// Create board from its CSR map.
    ///
    /// # Safety
    ///
    /// Every address in `csr` must point at the matching 32-bit CSR, and no
    /// other code may drive those registers while the board is alive.
    pub unsafe fn new(csr: CsrMap, demos: DemoTable, delay: D) -> Self {
        Self { csr, demos, delay }
    }

    /// Capability set implied by the CSR map and linked demos.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            leds: self.csr.leds_out.is_some(),
            gpio: self.csr.gpio.is_some(),
            cxx: self.demos.hellocpp.is_some(),
        }
    }
}

impl<D: DelayNs> GpioRegisters for LitexBoard<D> {
    fn read_in(&mut self) -> u32 {
        self.csr.gpio.map_or(0, |gpio| reg_read(gpio.input))
    }

    fn read_out(&mut self) -> u32 {
        self.csr.gpio.map_or(0, |gpio| reg_read(gpio.output))
    }

    fn write_out(&mut self, value: u32) {
        if let Some(gpio) = self.csr.gpio {
            log::trace!("GPIO_OUT <- {:#010x}", value);
            reg_write(gpio.output, value);
        }
    }

    fn read_oe(&mut self) -> u32 {
        self.csr.gpio.map_or(0, |gpio| reg_read(gpio.oe))
    }

    fn write_oe(&mut self, value: u32) {
        if let Some(gpio) = self.csr.gpio {
            log::trace!("GPIO_OE <- {:#010x}", value);
            reg_write(gpio.oe, value);
        }
    }
}

impl<D: DelayNs> DelayNs for LitexBoard<D> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

impl<D: DelayNs> Board for LitexBoard<D> {
    fn write_leds(&mut self, value: u32) {
        if let Some(addr) = self.csr.leds_out {
            reg_write(addr, value);
        }
    }

    fn reboot(&mut self) {
        log::info!("reset requested");
        reg_write(self.csr.ctrl_reset, 1);
    }

    fn run_demo(&mut self, demo: Demo) {
        match demo {
            Demo::Donut => (self.demos.donut)(),
            Demo::HelloC => (self.demos.helloc)(),
            Demo::HelloCpp => {
                if let Some(hellocpp) = self.demos.hellocpp {
                    hellocpp();
                }
            }
        }
    }
}
