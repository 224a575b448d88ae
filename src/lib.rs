//! # litex-console
//!
//! Serial console for LiteX SoC demo firmware, with zero heap allocation.
//!
//! **Key features:**
//! - **Non-blocking line input** - One byte per poll, with echo and backspace editing
//! - **Static command table** - Commands filtered once by the hardware capabilities
//! - **GPIO command mode** - Blocking sub-console for poking the GPIO registers
//! - **Platform-agnostic** - Serial I/O and peripherals sit behind traits
//!
//! The library provides a `#[derive(CommandName)]` macro mapping enum variants
//! to their lowercase command words.
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Lets the derive macro name `::litex_console` from inside this crate
extern crate self as litex_console;

// Re-export derive macro (always available)
pub use litex_console_macros::CommandName;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod io;

pub mod error;
pub mod response;

// Peripheral traits and the LiteX CSR implementation
pub mod hal;

// Console orchestration
pub mod console;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Core I/O
pub use io::SerialIo;

// Configuration
pub use config::{Capabilities, Capability, ConsoleConfig, DefaultConfig, PlainConfig};

// Error types
pub use error::{Argument, ConsoleError};

// Response types
pub use response::Response;

// Hardware
pub use hal::{Board, Demo, GpioRegisters, LitexBoard, LitexUart};

// Console types
pub use console::commands::CommandName;
pub use console::{
    CommandTable, Console, GpioCommand, GpioConsole, GpioMode, Line, LineReader, Tokenizer,
    TopCommand,
};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
