//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

pub use fixtures::{BoardEvent, MockBoard, MockIo, MockIoError};
use litex_console::{Capabilities, Console, PlainConfig};

/// Console type used throughout the integration tests.
pub type TestConsole = Console<MockIo, MockBoard, PlainConfig>;

/// Top-level prompt as printed by `TestConsole`.
pub const PROMPT: &str = "litex-demo-app> ";

/// GPIO prompt as printed by `TestConsole`.
pub const GPIO_PROMPT: &str = "gpio> ";

// ============================================================================
// Console Creation Helpers
// ============================================================================

/// Create an activated console with every peripheral present.
pub fn create_test_console() -> TestConsole {
    create_console_with(Capabilities::all())
}

/// Create an activated console for a given hardware build.
pub fn create_console_with(capabilities: Capabilities) -> TestConsole {
    let mut console = Console::new(MockIo::new(), MockBoard::new(), capabilities);
    console.activate().unwrap();
    console.io_mut().clear_output();
    console
}

// ============================================================================
// Input Helpers
// ============================================================================

/// Feed raw input and poll until it is used up. Returns the output.
///
/// GPIO scripts must end with `exit`; a script that leaves the console in
/// GPIO mode stops at the point the input ran out.
pub fn feed(console: &mut TestConsole, input: &str) -> String {
    feed_bytes(console, input.as_bytes())
}

/// Feed raw bytes (not necessarily UTF-8) and poll until they are used up.
pub fn feed_bytes(console: &mut TestConsole, input: &[u8]) -> String {
    console.io_mut().clear_output();
    console.io_mut().push_bytes(input);

    while console.io().has_input() {
        match console.poll() {
            Ok(()) => {}
            Err(MockIoError::Exhausted) => break,
        }
    }

    console.io().output()
}

/// Type one line and press enter. Returns the output.
pub fn execute_command(console: &mut TestConsole, cmd: &str) -> String {
    let mut input = String::from(cmd);
    if !cmd.ends_with('\n') {
        input.push('\n');
    }
    feed(console, &input)
}

/// Run several lines in order. Returns the combined output.
pub fn execute_lines(console: &mut TestConsole, lines: &[&str]) -> String {
    let mut input = String::new();
    for line in lines {
        input.push_str(line);
        input.push('\n');
    }
    feed(console, &input)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert that output contains all expected strings.
pub fn assert_contains_all(output: &str, expected: &[&str]) {
    for exp in expected {
        assert!(
            output.contains(exp),
            "Expected '{}' in output, got: {:?}",
            exp,
            output
        );
    }
}

/// Assert that output does NOT contain any of the strings.
pub fn assert_contains_none(output: &str, forbidden: &[&str]) {
    for forbid in forbidden {
        assert!(
            !output.contains(forbid),
            "Did not expect '{}' in output, got: {:?}",
            forbid,
            output
        );
    }
}
