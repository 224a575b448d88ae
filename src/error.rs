//! Error types for console commands.
//!
//! `ConsoleError` covers operator mistakes only. None of them is fatal: the
//! offending command is skipped and the console returns to its prompt.
//! Transport failures travel separately as `SerialIo::Error`.

use core::fmt;

/// Argument a command could not find on its line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Argument {
    /// Register value for `write`
    Value,

    /// Bit index for `set` / `clear`
    BitNumber,
}

/// Console error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// Required argument missing (input-format error)
    MissingArgument(Argument),

    /// Bit index outside 0..=31 (range error)
    BitOutOfRange(i32),

    /// First token matched no GPIO sub-command
    UnknownCommand(heapless::String<64>),
}

impl ConsoleError {
    /// Build an `UnknownCommand` error from the raw token.
    ///
    /// Invalid UTF-8 is shown as U+FFFD; overlong names are truncated.
    pub fn unknown_command(token: &[u8]) -> Self {
        let mut stored = heapless::String::new();
        let chars = token.utf8_chunks().flat_map(|chunk| {
            let invalid = !chunk.invalid().is_empty();
            chunk
                .valid()
                .chars()
                .chain(invalid.then_some(char::REPLACEMENT_CHARACTER))
        });
        for c in chars {
            if stored.push(c).is_err() {
                break;
            }
        }
        ConsoleError::UnknownCommand(stored)
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::MissingArgument(Argument::Value) => write!(f, "Missing value."),
            ConsoleError::MissingArgument(Argument::BitNumber) => {
                write!(f, "Missing bit number.")
            }
            ConsoleError::BitOutOfRange(_) => write!(f, "Bit must be between 0 and 31."),
            ConsoleError::UnknownCommand(name) => write!(f, "Unknown command: {}", name),
        }
    }
}
