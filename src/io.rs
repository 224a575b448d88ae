//! Byte-level serial transport abstraction.
//!
//! The `SerialIo` trait is the console's only view of the UART. Reads are
//! polled and never block; writes may block briefly while the transmitter
//! drains, which is acceptable on bare metal.

use core::fmt;

/// Platform-agnostic serial transport trait.
///
/// Implementations poll the receiver with `byte_available()` and fetch a byte
/// with `read_byte()`. The console always checks availability first, so
/// `read_byte()` is only called when a byte is known to be waiting.
pub trait SerialIo {
    /// Platform-specific error type
    type Error;

    /// Non-blocking check for a received byte.
    fn byte_available(&mut self) -> Result<bool, Self::Error>;

    /// Read one received byte.
    ///
    /// Only called after `byte_available()` returned `true`.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Write raw bytes to the transmitter.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Non-blocking byte read.
    ///
    /// Returns:
    /// - `Ok(Some(byte))` if a byte was waiting
    /// - `Ok(None)` if nothing has arrived yet
    /// - `Err(Self::Error)` on transport error
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if self.byte_available()? {
            self.read_byte().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Write a string.
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_bytes(s.as_bytes())
    }

    /// Write formatted text, so `write!(io, ...)` works on any transport.
    ///
    /// The first transport error aborts formatting and is returned as-is.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), Self::Error> {
        let mut adapter = FmtAdapter {
            io: self,
            error: None,
        };

        match fmt::write(&mut adapter, args) {
            Ok(()) => Ok(()),
            Err(_) => match adapter.error.take() {
                Some(e) => Err(e),
                // A Display impl failed on its own; nothing reached the wire
                None => Ok(()),
            },
        }
    }
}

/// Bridges `core::fmt::Write` onto a `SerialIo`, keeping the transport error.
struct FmtAdapter<'a, T: SerialIo + ?Sized> {
    io: &'a mut T,
    error: Option<T::Error>,
}

impl<T: SerialIo + ?Sized> fmt::Write for FmtAdapter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.io.write_str(s).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}
