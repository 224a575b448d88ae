//! Console configuration: prompt texts and the hardware capability set.
//!
//! `ConsoleConfig` fixes the operator-facing strings at compile time.
//! `Capabilities` is resolved once at startup and decides which top-level
//! commands are registered.

/// Console text configuration trait.
///
/// All values are const (zero runtime cost).
pub trait ConsoleConfig {
    /// Top-level prompt
    const PROMPT: &'static str;

    /// Prompt shown while in GPIO command mode
    const GPIO_PROMPT: &'static str;

    /// Application name printed in the help banner
    const BANNER: &'static str;
}

/// Default configuration with the colored LiteX demo prompts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl ConsoleConfig for DefaultConfig {
    const PROMPT: &'static str = "\x1b[92;1mlitex-demo-app\x1b[0m> ";
    const GPIO_PROMPT: &'static str = "\x1b[92;1mGPIO command mode\x1b[0m> ";
    const BANNER: &'static str = "LiteX minimal demo app";
}

/// Plain configuration for terminals without ANSI color support.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlainConfig;

impl ConsoleConfig for PlainConfig {
    const PROMPT: &'static str = "litex-demo-app> ";
    const GPIO_PROMPT: &'static str = "gpio> ";
    const BANNER: &'static str = "LiteX minimal demo app";
}

/// Optional hardware feature a command may depend on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Capability {
    /// LED output register
    Leds,

    /// GPIO input/output/output-enable registers
    Gpio,

    /// C++ demo payload linked in
    Cxx,
}

/// Set of peripherals present in this hardware build.
///
/// Commands whose capability is missing are never registered, so they
/// behave exactly like unknown input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// LED register present
    pub leds: bool,

    /// GPIO block present
    pub gpio: bool,

    /// C++ demo present
    pub cxx: bool,
}

impl Capabilities {
    /// Every optional peripheral present.
    pub const fn all() -> Self {
        Self {
            leds: true,
            gpio: true,
            cxx: true,
        }
    }

    /// No optional peripherals; only the always-available commands remain.
    pub const fn none() -> Self {
        Self {
            leds: false,
            gpio: false,
            cxx: false,
        }
    }

    /// Check whether a capability is present.
    pub const fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Leds => self.leds,
            Capability::Gpio => self.gpio,
            Capability::Cxx => self.cxx,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}
