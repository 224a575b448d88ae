//! Non-blocking line assembly with backspace editing.
//!
//! `LineReader` consumes at most one byte per call, echoes it, and hands out
//! a finished `Line` when the operator presses enter. Partial input stays in
//! the reader between calls, so the caller can interleave other work.

use crate::io::SerialIo;

/// Input buffer size, terminator slot included (63 usable bytes).
pub const INPUT_CAPACITY: usize = 64;

/// Backspace erase sequence (cursor left, blank, cursor left).
const ERASE: &str = "\x08 \x08";

/// What a raw input byte means to the line editor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Byte to append
    Byte(u8),

    /// Backspace key (ASCII BS or DEL)
    Backspace,

    /// Terminal bell; ignored
    Bell,

    /// Enter key (line feed or carriage return)
    Enter,
}

impl InputEvent {
    /// Classify one input byte.
    pub fn decode(byte: u8) -> Self {
        match byte {
            0x7f | 0x08 => InputEvent::Backspace,
            0x07 => InputEvent::Bell,
            b'\r' | b'\n' => InputEvent::Enter,
            other => InputEvent::Byte(other),
        }
    }
}

/// A completed input line.
///
/// Owns the bytes the operator typed; the reader starts a fresh buffer once
/// the line is handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<const N: usize = INPUT_CAPACITY> {
    bytes: heapless::Vec<u8, N>,
}

impl<const N: usize> Line<N> {
    /// Raw bytes as typed, without the terminator.
    ///
    /// Bytes are kept exactly as received, including any that are not
    /// valid UTF-8.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Line accumulation state machine.
///
/// Holds at most `N - 1` bytes; further bytes are dropped silently until the
/// line is completed. The buffer only resets on enter.
#[derive(Debug)]
pub struct LineReader<const N: usize = INPUT_CAPACITY> {
    buffer: heapless::Vec<u8, N>,
}

impl<const N: usize> LineReader<N> {
    /// Create reader with an empty buffer.
    pub const fn new() -> Self {
        Self {
            buffer: heapless::Vec::new(),
        }
    }

    /// Bytes accepted so far on the current line.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Poll for one byte and advance the line editor.
    ///
    /// Returns:
    /// - `Ok(Some(line))` when this byte completed a line
    /// - `Ok(None)` if no byte was waiting or the line is still open
    /// - `Err` on transport error
    ///
    /// Never blocks.
    pub fn try_read_line<IO: SerialIo>(
        &mut self,
        io: &mut IO,
    ) -> Result<Option<Line<N>>, IO::Error> {
        let Some(byte) = io.try_read_byte()? else {
            return Ok(None);
        };

        match InputEvent::decode(byte) {
            InputEvent::Backspace => {
                if self.buffer.pop().is_some() {
                    io.write_str(ERASE)?;
                }
                Ok(None)
            }

            InputEvent::Bell => Ok(None),

            InputEvent::Enter => {
                io.write_str("\n")?;
                let bytes = core::mem::replace(&mut self.buffer, heapless::Vec::new());
                Ok(Some(Line { bytes }))
            }

            InputEvent::Byte(b) => {
                // Last slot is reserved for the terminator
                if self.buffer.len() >= N.saturating_sub(1) {
                    return Ok(None);
                }
                if self.buffer.push(b).is_ok() {
                    io.write_bytes(&[b])?;
                }
                Ok(None)
            }
        }
    }
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::collections::VecDeque;
    use std::vec::Vec;

    struct MockIo {
        input: VecDeque<u8>,
        output: Vec<u8>,
    }

    impl MockIo {
        fn with_input(bytes: &[u8]) -> Self {
            Self {
                input: bytes.iter().copied().collect(),
                output: Vec::new(),
            }
        }
    }

    impl SerialIo for MockIo {
        type Error = ();

        fn byte_available(&mut self) -> Result<bool, ()> {
            Ok(!self.input.is_empty())
        }

        fn read_byte(&mut self) -> Result<u8, ()> {
            self.input.pop_front().ok_or(())
        }

        fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ()> {
            self.output.extend_from_slice(bytes);
            Ok(())
        }
    }

    // Feed until input runs dry, collecting every completed line
    fn drain(reader: &mut LineReader, io: &mut MockIo) -> Vec<Line> {
        let mut lines = Vec::new();
        while !io.input.is_empty() {
            if let Some(line) = reader.try_read_line(io).unwrap() {
                lines.push(line);
            }
        }
        lines
    }

    // ========================================
    // Decoding
    // ========================================

    #[test]
    fn test_decode() {
        assert_eq!(InputEvent::decode(0x7f), InputEvent::Backspace);
        assert_eq!(InputEvent::decode(0x08), InputEvent::Backspace);
        assert_eq!(InputEvent::decode(0x07), InputEvent::Bell);
        assert_eq!(InputEvent::decode(b'\r'), InputEvent::Enter);
        assert_eq!(InputEvent::decode(b'\n'), InputEvent::Enter);
        assert_eq!(InputEvent::decode(b'a'), InputEvent::Byte(b'a'));
        assert_eq!(InputEvent::decode(0x1b), InputEvent::Byte(0x1b));
    }

    // ========================================
    // Line assembly
    // ========================================

    #[test]
    fn test_no_input_returns_none() {
        let mut reader = LineReader::<INPUT_CAPACITY>::new();
        let mut io = MockIo::with_input(b"");
        assert_eq!(reader.try_read_line(&mut io), Ok(None));
        assert!(io.output.is_empty());
    }

    #[test]
    fn test_one_byte_per_call() {
        let mut reader = LineReader::<INPUT_CAPACITY>::new();
        let mut io = MockIo::with_input(b"ab\n");

        assert_eq!(reader.try_read_line(&mut io), Ok(None));
        assert_eq!(io.input.len(), 2);
        assert_eq!(reader.try_read_line(&mut io), Ok(None));
        assert_eq!(reader.pending(), b"ab");

        let line = reader.try_read_line(&mut io).unwrap().unwrap();
        assert_eq!(line.as_bytes(), b"ab");
        assert!(reader.pending().is_empty());
    }

    #[test]
    fn test_echo_and_newline() {
        let mut reader = LineReader::<INPUT_CAPACITY>::new();
        let mut io = MockIo::with_input(b"read\r");
        let lines = drain(&mut reader, &mut io);

        assert_eq!(lines.len(), 1);
        assert_eq!(io.output, b"read\n");
    }

    #[test]
    fn test_empty_line() {
        let mut reader = LineReader::<INPUT_CAPACITY>::new();
        let mut io = MockIo::with_input(b"\n");
        let lines = drain(&mut reader, &mut io);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].as_bytes().is_empty());
    }

    #[test]
    fn test_cr_and_lf_each_end_a_line() {
        let mut reader = LineReader::<INPUT_CAPACITY>::new();
        let mut io = MockIo::with_input(b"a\r\nb\n");
        let lines = drain(&mut reader, &mut io);

        let texts: Vec<&[u8]> = lines.iter().map(|l| l.as_bytes()).collect();
        assert_eq!(texts, [&b"a"[..], &b""[..], &b"b"[..]]);
    }

    // ========================================
    // Editing
    // ========================================

    #[test]
    fn test_backspace_removes_and_erases() {
        let mut reader = LineReader::<INPUT_CAPACITY>::new();
        let mut io = MockIo::with_input(b"setx\x7f 3\n");
        let lines = drain(&mut reader, &mut io);

        assert_eq!(lines[0].as_bytes(), b"set 3");
        assert_eq!(io.output, b"setx\x08 \x08 3\n");
    }

    #[test]
    fn test_backspace_on_empty_is_silent() {
        let mut reader = LineReader::<INPUT_CAPACITY>::new();
        let mut io = MockIo::with_input(b"\x08\x08\x7fok\n");
        let lines = drain(&mut reader, &mut io);

        assert_eq!(lines[0].as_bytes(), b"ok");
        assert_eq!(io.output, b"ok\n");
    }

    #[test]
    fn test_bell_ignored() {
        let mut reader = LineReader::<INPUT_CAPACITY>::new();
        let mut io = MockIo::with_input(b"he\x07lp\n");
        let lines = drain(&mut reader, &mut io);

        assert_eq!(lines[0].as_bytes(), b"help");
        assert_eq!(io.output, b"help\n");
    }

    // ========================================
    // Overflow
    // ========================================

    #[test]
    fn test_overflow_truncates_to_capacity_minus_one() {
        let mut reader = LineReader::<INPUT_CAPACITY>::new();
        let mut input = Vec::new();
        input.extend(core::iter::repeat(b'a').take(63));
        input.extend(core::iter::repeat(b'z').take(10));
        input.push(b'\n');
        let mut io = MockIo::with_input(&input);
        let lines = drain(&mut reader, &mut io);

        assert_eq!(lines[0].as_bytes().len(), 63);
        assert!(lines[0].as_bytes().iter().all(|&b| b == b'a'));
        // Dropped bytes are not echoed
        assert_eq!(io.output.len(), 64);
    }

    #[test]
    fn test_backspace_after_overflow_frees_a_slot() {
        let mut reader = LineReader::<4>::new();
        let mut io = MockIo::with_input(b"abcd\x7fe\n");
        let mut lines = Vec::new();
        while !io.input.is_empty() {
            if let Some(line) = reader.try_read_line(&mut io).unwrap() {
                lines.push(line);
            }
        }

        assert_eq!(lines[0].as_bytes(), b"abe");
    }

    #[test]
    fn test_invalid_utf8_kept_verbatim() {
        let mut reader = LineReader::<INPUT_CAPACITY>::new();
        let mut io = MockIo::with_input(b"ab\xffcd\n");
        let lines = drain(&mut reader, &mut io);

        assert_eq!(lines[0].as_bytes(), b"ab\xffcd");
        assert_eq!(io.output, b"ab\xffcd\n");
    }
}
