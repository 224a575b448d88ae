//! Console orchestration and top-level command processing.
//!
//! `Console` owns the transport, the board and the line reader. Its `poll()`
//! performs at most one non-blocking byte read and, when that byte finished a
//! line, one dispatch. Call it from the firmware's main loop, or call `run()`
//! to loop forever.
//!
//! The `gpio` command is the exception to the non-blocking rule: it hands the
//! reader and transport to a `GpioConsole`, which blocks until `exit`.

use core::convert::Infallible;
use core::marker::PhantomData;

use crate::config::{Capabilities, ConsoleConfig, DefaultConfig};
use crate::hal::{Board, Demo};
use crate::io::SerialIo;

// Sub-modules
pub mod commands;
pub mod gpio;
pub mod line_reader;
pub mod parse;
pub mod tokenizer;

// Re-export key types
pub use commands::{CommandMeta, CommandName, CommandTable, TopCommand};
pub use gpio::{GpioCommand, GpioConsole, GpioMode};
pub use line_reader::{INPUT_CAPACITY, InputEvent, Line, LineReader};
pub use tokenizer::Tokenizer;

/// Interactive serial console.
///
/// Generic over:
/// - `IO`: SerialIo implementation
/// - `B`: Board implementation
/// - `C`: ConsoleConfig implementation
pub struct Console<IO, B, C = DefaultConfig>
where
    IO: SerialIo,
    B: Board,
    C: ConsoleConfig,
{
    /// Serial transport
    io: IO,

    /// Peripheral access
    board: B,

    /// Commands registered for this hardware build
    commands: CommandTable,

    /// Partially typed line, kept between polls
    reader: LineReader<INPUT_CAPACITY>,

    /// Config type marker (zero-size)
    _config: PhantomData<C>,
}

impl<IO, B, C> core::fmt::Debug for Console<IO, B, C>
where
    IO: SerialIo,
    B: Board,
    C: ConsoleConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Console")
            .field("commands", &self.commands)
            .field("pending", &self.reader.pending())
            .finish_non_exhaustive()
    }
}

impl<IO, B, C> Console<IO, B, C>
where
    IO: SerialIo,
    B: Board,
    C: ConsoleConfig,
{
    /// Create console for the given capability set.
    ///
    /// Nothing is printed until `activate()`.
    pub fn new(io: IO, board: B, capabilities: Capabilities) -> Self {
        Self {
            io,
            board,
            commands: CommandTable::new(capabilities),
            reader: LineReader::new(),
            _config: PhantomData,
        }
    }

    /// Print the help banner and the first prompt.
    pub fn activate(&mut self) -> Result<(), IO::Error> {
        self.show_help()?;
        self.write_prompt()
    }

    /// Poll for one input byte and dispatch a completed line.
    ///
    /// Returns immediately when no byte is waiting. Only blocks if the line
    /// enters GPIO mode, or for the duration of a demo.
    pub fn poll(&mut self) -> Result<(), IO::Error> {
        match self.reader.try_read_line(&mut self.io)? {
            Some(line) => self.dispatch(line.as_bytes()),
            None => Ok(()),
        }
    }

    /// Service the console forever.
    ///
    /// Only returns on transport error.
    pub fn run(&mut self) -> Result<Infallible, IO::Error> {
        loop {
            self.poll()?;
        }
    }

    /// Dispatch one completed line and re-print the prompt.
    ///
    /// Unknown or unregistered commands (the empty line included) are
    /// ignored without any message. The command word must match byte for
    /// byte.
    pub fn dispatch(&mut self, line: &[u8]) -> Result<(), IO::Error> {
        let mut tokens = Tokenizer::new(line);
        let name = tokens.next_token();

        match self.commands.lookup(name) {
            Some(command) => {
                log::debug!("command: {}", command.name());
                self.execute(command, &mut tokens)?;
            }
            None => log::trace!("ignoring \"{}\"", name.escape_ascii()),
        }

        self.write_prompt()
    }

    /// Get reference to I/O for inspection.
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Get mutable reference to I/O.
    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Get reference to the board.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Get mutable reference to the board.
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Run a top-level command. None of them take arguments yet; the cursor
    /// is positioned after the command word.
    fn execute(
        &mut self,
        command: TopCommand,
        _args: &mut Tokenizer<'_>,
    ) -> Result<(), IO::Error> {
        match command {
            TopCommand::Help => self.show_help(),
            TopCommand::Reboot => {
                log::info!("rebooting");
                self.board.reboot();
                Ok(())
            }
            TopCommand::Led => self.led_show(),
            TopCommand::Donut => self.run_demo(Demo::Donut),
            TopCommand::HelloC => self.run_demo(Demo::HelloC),
            TopCommand::HelloCpp => self.run_demo(Demo::HelloCpp),
            TopCommand::Gpio => {
                let session = GpioConsole::<IO, B, C, INPUT_CAPACITY>::new(
                    &mut self.reader,
                    &mut self.io,
                    &mut self.board,
                );
                session.run()
            }
        }
    }

    fn write_prompt(&mut self) -> Result<(), IO::Error> {
        self.io.write_str(C::PROMPT)
    }

    /// Banner plus one line per registered command.
    fn show_help(&mut self) -> Result<(), IO::Error> {
        writeln!(self.io, "\n{} v{}\n", C::BANNER, crate::VERSION)?;
        self.io.write_str("Available commands:\n")?;
        for meta in self.commands.iter() {
            writeln!(self.io, "{:<18} - {}", meta.name(), meta.description)?;
        }
        Ok(())
    }

    fn run_demo(&mut self, demo: Demo) -> Result<(), IO::Error> {
        writeln!(self.io, "{}", demo.announcement())?;
        self.board.run_demo(demo);
        Ok(())
    }

    /// Counter, shift and dance patterns on the LED register.
    fn led_show(&mut self) -> Result<(), IO::Error> {
        self.io.write_str("Led demo...\n")?;

        self.io.write_str("Counter mode...\n")?;
        for value in 0..32 {
            self.board.write_leds(value);
            self.board.delay_ms(100);
        }

        self.io.write_str("Shift mode...\n")?;
        for i in 0..4 {
            self.board.write_leds(1 << i);
            self.board.delay_ms(200);
        }
        for i in 0..4 {
            self.board.write_leds(1 << (3 - i));
            self.board.delay_ms(200);
        }

        self.io.write_str("Dance mode...\n")?;
        for _ in 0..4 {
            self.board.write_leds(0x55);
            self.board.delay_ms(200);
            self.board.write_leds(0xAA);
            self.board.delay_ms(200);
        }

        Ok(())
    }
}
