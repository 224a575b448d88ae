//! Response type for GPIO command execution.
//!
//! Handlers touch registers and describe what they did in a `Response`; the
//! sub-console writes it out. Failures are `Err(ConsoleError)`, not responses.

use core::fmt::{self, Write};

/// Maximum response length in bytes (the `status` report is the longest).
pub const MAX_RESPONSE: usize = 128;

/// Report produced by a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Report text, without trailing newline
    pub message: heapless::String<MAX_RESPONSE>,
}

impl Response {
    /// Response that prints nothing.
    pub fn silent() -> Self {
        Self {
            message: heapless::String::new(),
        }
    }

    /// Create response from format arguments; overlong text is cut short.
    pub fn formatted(args: fmt::Arguments<'_>) -> Self {
        let mut response = Self::silent();
        let _ = response.message.write_fmt(args);
        response
    }

    /// True when there is nothing to print.
    pub fn is_silent(&self) -> bool {
        self.message.is_empty()
    }
}
