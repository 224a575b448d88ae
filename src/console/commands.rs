//! Top-level command table.
//!
//! The table is static; which entries are registered is decided once from
//! the `Capabilities` the console was built with.

use crate::config::{Capabilities, Capability};

/// Mapping between command words and command enums.
///
/// Derive it with `#[derive(CommandName)]`; the command word is the
/// lowercased variant name and lookups are exact and case-sensitive.
pub trait CommandName: Copy + 'static {
    /// Parse a command word.
    fn from_name(name: &str) -> Option<Self>;

    /// Command word for this variant.
    fn name(&self) -> &'static str;

    /// Parse a raw input token. Bytes that are not UTF-8 never match.
    fn from_token(token: &[u8]) -> Option<Self> {
        core::str::from_utf8(token).ok().and_then(Self::from_name)
    }
}

/// Commands available at the top-level prompt.
#[derive(Debug, Copy, Clone, PartialEq, Eq, crate::CommandName)]
pub enum TopCommand {
    /// Show help
    Help,
    /// Reset the CPU
    Reboot,
    /// LED light show
    Led,
    /// Spinning donut demo
    Donut,
    /// Hello C demo
    HelloC,
    /// Hello C++ demo
    HelloCpp,
    /// Enter GPIO command mode
    Gpio,
}

/// Command metadata (const-initializable, no execution logic).
#[derive(Debug, Clone)]
pub struct CommandMeta {
    /// Command
    pub command: TopCommand,

    /// One-line description shown by `help`
    pub description: &'static str,

    /// Peripheral the command needs, if any
    pub requires: Option<Capability>,
}

impl CommandMeta {
    /// Command word.
    pub fn name(&self) -> &'static str {
        self.command.name()
    }
}

/// Number of commands in the full table.
pub const COMMAND_COUNT: usize = 7;

/// Every command this console knows, in help order.
pub static COMMANDS: [CommandMeta; COMMAND_COUNT] = [
    CommandMeta {
        command: TopCommand::Help,
        description: "Show this command",
        requires: None,
    },
    CommandMeta {
        command: TopCommand::Reboot,
        description: "Reboot CPU",
        requires: None,
    },
    CommandMeta {
        command: TopCommand::Led,
        description: "Led demo",
        requires: Some(Capability::Leds),
    },
    CommandMeta {
        command: TopCommand::Donut,
        description: "Spinning Donut demo",
        requires: None,
    },
    CommandMeta {
        command: TopCommand::HelloC,
        description: "Hello C",
        requires: None,
    },
    CommandMeta {
        command: TopCommand::HelloCpp,
        description: "Hello C++",
        requires: Some(Capability::Cxx),
    },
    CommandMeta {
        command: TopCommand::Gpio,
        description: "Enter to GPIO command mode",
        requires: Some(Capability::Gpio),
    },
];

/// Commands registered for this hardware build.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: heapless::Vec<&'static CommandMeta, COMMAND_COUNT>,
}

impl CommandTable {
    /// Register every command whose capability is present.
    pub fn new(capabilities: Capabilities) -> Self {
        let mut entries = heapless::Vec::new();
        for meta in COMMANDS.iter() {
            let present = meta.requires.is_none_or(|cap| capabilities.has(cap));
            if present {
                // Capacity equals the full table size
                let _ = entries.push(meta);
            }
        }
        Self { entries }
    }

    /// Look up a command word, comparing raw bytes (exact, case-sensitive).
    pub fn lookup(&self, token: &[u8]) -> Option<TopCommand> {
        self.entries
            .iter()
            .find(|meta| meta.name().as_bytes() == token)
            .map(|meta| meta.command)
    }

    /// Registered commands in help order.
    pub fn iter(&self) -> impl Iterator<Item = &'static CommandMeta> + '_ {
        self.entries.iter().copied()
    }
}
