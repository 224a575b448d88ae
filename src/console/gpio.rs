//! GPIO command mode: a modal, blocking sub-console.
//!
//! Entering GPIO mode deliberately gives up the top-level console's
//! non-blocking contract. `GpioConsole::run` spins on the line reader until a
//! full line arrives, and `pulse`/`blink` busy-wait on the board's delay.
//! Nothing else is serviced until the operator types `exit`.
//!
//! Command execution is split from I/O: `execute` only touches registers and
//! returns a `Response` or a `ConsoleError`, and the console prints it.

use core::marker::PhantomData;

use super::commands::CommandName;
use super::line_reader::{Line, LineReader};
use super::parse::{parse_decimal, parse_unsigned};
use super::tokenizer::Tokenizer;
use crate::config::ConsoleConfig;
use crate::error::{Argument, ConsoleError};
use crate::hal::Board;
use crate::io::SerialIo;
use crate::response::Response;

/// Help block printed after an unknown sub-command.
pub const GPIO_HELP: &str = "Enter GPIO command:\n\
Available commands:\n\
\x20 write <value>    - Write value to GPIO_OUT\n\
\x20 read             - Read value from GPIO_IN\n\
\x20 set <bit>        - Set GPIO bit as output\n\
\x20 clear <bit>      - Clear GPIO bit\n\
\x20 toggle <bit>     - Toggle GPIO bit\n\
\x20 direction <bit> <in|out> - Set GPIO direction\n\
\x20 status           - Show GPIO status\n\
\x20 pulse <bit> <duration> - Pulse GPIO bit\n\
\x20 blink <bit> <count> <interval> - Blink GPIO bit\n\
\x20 exit             - Exit GPIO command mode\n";

/// GPIO sub-commands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, crate::CommandName)]
pub enum GpioCommand {
    /// Write the whole output register
    Write,
    /// Read the input register
    Read,
    /// Configure a bit as output
    Set,
    /// Clear an output bit
    Clear,
    /// Flip an output bit
    Toggle,
    /// Set a bit's direction
    Direction,
    /// Dump all three registers
    Status,
    /// Raise a bit for a while
    Pulse,
    /// Blink a bit
    Blink,
    /// Leave GPIO mode
    Exit,
}

/// GPIO mode loop state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GpioMode {
    /// Reading and executing sub-commands
    Running,

    /// `exit` received; control returns to the top level
    Exited,
}

/// Pin direction argument of `direction`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinDirection {
    /// Pin reads (output-enable bit cleared)
    Input,

    /// Pin drives (output-enable bit set)
    Output,
}

impl PinDirection {
    /// Parse the literal `in` or `out`; anything else is `None`.
    pub fn from_token(token: &[u8]) -> Option<Self> {
        match token {
            b"in" => Some(PinDirection::Input),
            b"out" => Some(PinDirection::Output),
            _ => None,
        }
    }
}

/// Mask for `bit`. Indices of 32 and above wrap modulo 32.
fn bit_mask(bit: i32) -> u32 {
    1u32.wrapping_shl(bit as u32)
}

/// Parse a bit index that must name one of the 32 pins.
fn checked_bit(token: &[u8]) -> Result<i32, ConsoleError> {
    if token.is_empty() {
        return Err(ConsoleError::MissingArgument(Argument::BitNumber));
    }
    let bit = parse_decimal(token);
    if !(0..=31).contains(&bit) {
        log::warn!("bit {} out of range", bit);
        return Err(ConsoleError::BitOutOfRange(bit));
    }
    Ok(bit)
}

/// Execute one GPIO sub-command against the board.
///
/// Remaining arguments are taken from `args`. Blocks for `pulse` and
/// `blink`. `exit` does nothing here; the caller ends the mode.
pub fn execute<B: Board>(
    board: &mut B,
    command: GpioCommand,
    args: &mut Tokenizer<'_>,
) -> Result<Response, ConsoleError> {
    log::debug!("gpio command: {}", command.name());

    match command {
        GpioCommand::Write => {
            let token = args.next_token();
            if token.is_empty() {
                return Err(ConsoleError::MissingArgument(Argument::Value));
            }
            let value = parse_unsigned(token);
            board.write_out(value);
            Ok(Response::formatted(format_args!("GPIO_OUT set to 0x{:08X}", value)))
        }

        GpioCommand::Read => {
            let value = board.read_in();
            Ok(Response::formatted(format_args!("GPIO_IN value: 0x{:08X}", value)))
        }

        GpioCommand::Set => {
            let bit = checked_bit(args.next_token())?;
            let oe = board.read_oe() | bit_mask(bit);
            board.write_oe(oe);
            let current = board.read_oe();
            Ok(Response::formatted(format_args!(
                "Bit {} activated as output. Current GPIO_OE value: 0x{:08X}",
                bit, current
            )))
        }

        GpioCommand::Clear => {
            let bit = checked_bit(args.next_token())?;
            let out = board.read_out() & !bit_mask(bit);
            board.write_out(out);
            Ok(Response::formatted(format_args!(
                "Bit {} deactivated. Current GPIO_OUT value: 0x{:08X}",
                bit, out
            )))
        }

        GpioCommand::Toggle => {
            let bit = parse_decimal(args.next_token());
            let out = board.read_out() ^ bit_mask(bit);
            board.write_out(out);
            Ok(Response::formatted(format_args!(
                "Bit {} toggled. Current GPIO_OUT value: 0x{:08X}",
                bit, out
            )))
        }

        GpioCommand::Direction => {
            let bit = parse_decimal(args.next_token());
            match PinDirection::from_token(args.next_token()) {
                Some(PinDirection::Input) => {
                    let oe = board.read_oe() & !bit_mask(bit);
                    board.write_oe(oe);
                    Ok(Response::formatted(format_args!("Bit {} set as input.", bit)))
                }
                Some(PinDirection::Output) => {
                    let oe = board.read_oe() | bit_mask(bit);
                    board.write_oe(oe);
                    Ok(Response::formatted(format_args!("Bit {} set as output.", bit)))
                }
                None => Ok(Response::silent()),
            }
        }

        GpioCommand::Status => {
            let input = board.read_in();
            let output = board.read_out();
            let oe = board.read_oe();
            Ok(Response::formatted(format_args!(
                concat!(
                    "GPIO Status:\n",
                    "  Inputs  : 0x{:08X}\n",
                    "  Outputs : 0x{:08X}\n",
                    "  Direction (OE): 0x{:08X}",
                ),
                input,
                output,
                oe
            )))
        }

        GpioCommand::Pulse => {
            let bit = parse_decimal(args.next_token());
            let duration = parse_decimal(args.next_token());
            let mask = bit_mask(bit);

            let out = board.read_out() | mask;
            board.write_out(out);
            board.delay_ms(duration.max(0) as u32);
            let out = board.read_out() & !mask;
            board.write_out(out);

            Ok(Response::formatted(format_args!(
                "Bit {} pulsed for {} ms.",
                bit, duration
            )))
        }

        GpioCommand::Blink => {
            let bit = parse_decimal(args.next_token());
            let count = parse_decimal(args.next_token());
            let interval = parse_decimal(args.next_token());
            let mask = bit_mask(bit);
            let hold = interval.max(0) as u32;

            for _ in 0..count.max(0) {
                let out = board.read_out() | mask;
                board.write_out(out);
                board.delay_ms(hold);
                let out = board.read_out() & !mask;
                board.write_out(out);
                board.delay_ms(hold);
            }

            Ok(Response::formatted(format_args!(
                "Bit {} blinked {} times with {} ms interval.",
                bit, count, interval
            )))
        }

        GpioCommand::Exit => Ok(Response::silent()),
    }
}

/// GPIO command mode session.
///
/// Borrows the top-level console's line reader, transport and board for as
/// long as the operator stays in the mode.
pub struct GpioConsole<'a, IO, B, C, const N: usize>
where
    IO: SerialIo,
    B: Board,
    C: ConsoleConfig,
{
    reader: &'a mut LineReader<N>,
    io: &'a mut IO,
    board: &'a mut B,
    mode: GpioMode,
    _config: PhantomData<C>,
}

impl<IO, B, C, const N: usize> core::fmt::Debug for GpioConsole<'_, IO, B, C, N>
where
    IO: SerialIo,
    B: Board,
    C: ConsoleConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GpioConsole")
            .field("mode", &self.mode)
            .field("pending", &self.reader.pending())
            .finish_non_exhaustive()
    }
}

impl<'a, IO, B, C, const N: usize> GpioConsole<'a, IO, B, C, N>
where
    IO: SerialIo,
    B: Board,
    C: ConsoleConfig,
{
    /// Open a session in the `Running` state.
    pub fn new(reader: &'a mut LineReader<N>, io: &'a mut IO, board: &'a mut B) -> Self {
        Self {
            reader,
            io,
            board,
            mode: GpioMode::Running,
            _config: PhantomData,
        }
    }

    /// Run the mode until `exit`.
    ///
    /// **Blocks**: spins on the transport while waiting for each line.
    /// Returns early only on transport error.
    pub fn run(mut self) -> Result<(), IO::Error> {
        log::info!("entering GPIO command mode");

        while self.mode == GpioMode::Running {
            self.io.write_str(C::GPIO_PROMPT)?;
            let line = self.read_line_blocking()?;
            self.mode = self.dispatch(line.as_bytes())?;
        }

        log::info!("leaving GPIO command mode");
        Ok(())
    }

    /// Spin until the reader yields a complete line.
    fn read_line_blocking(&mut self) -> Result<Line<N>, IO::Error> {
        loop {
            if let Some(line) = self.reader.try_read_line(self.io)? {
                return Ok(line);
            }
            core::hint::spin_loop();
        }
    }

    /// Handle one line and report the resulting state.
    ///
    /// Unknown sub-commands print the error and the help block; argument
    /// errors print `Error: ...`. Neither leaves the mode.
    pub fn dispatch(&mut self, line: &[u8]) -> Result<GpioMode, IO::Error> {
        let mut tokens = Tokenizer::new(line);
        let name = tokens.next_token();

        let Some(command) = GpioCommand::from_token(name) else {
            log::warn!("unknown gpio command \"{}\"", name.escape_ascii());
            return self
                .report(Err(ConsoleError::unknown_command(name)))
                .map(|()| GpioMode::Running);
        };

        if command == GpioCommand::Exit {
            return Ok(GpioMode::Exited);
        }

        let result = execute(self.board, command, &mut tokens);
        self.report(result)?;
        Ok(GpioMode::Running)
    }

    fn report(&mut self, result: Result<Response, ConsoleError>) -> Result<(), IO::Error> {
        match result {
            Ok(response) if response.is_silent() => Ok(()),
            Ok(response) => writeln!(self.io, "{}", response.message),
            Err(e @ ConsoleError::UnknownCommand(_)) => {
                writeln!(self.io, "{}", e)?;
                self.io.write_str(GPIO_HELP)
            }
            Err(e) => writeln!(self.io, "Error: {}", e),
        }
    }
}
