//! Space-separated token cursor.
//!
//! Splits on single `' '` bytes only. There is no quoting or escaping, and
//! separators are not collapsed: `"a  b"` yields `"a"`, `""`, `"b"`. Once
//! the line is used up every further call yields an empty token.
//!
//! Tokens are raw bytes. Command words are compared byte for byte, so input
//! that is not valid UTF-8 can never match a command.

/// Cursor over the unconsumed part of a line.
///
/// Tokens borrow from the line; nothing is copied.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    rest: &'a [u8],
}

impl<'a> Tokenizer<'a> {
    /// Start at the beginning of `line`.
    pub fn new(line: &'a [u8]) -> Self {
        Self { rest: line }
    }

    /// Take the next token and move past its separator.
    pub fn next_token(&mut self) -> &'a [u8] {
        match self.rest.iter().position(|&b| b == b' ') {
            Some(split) => {
                let token = &self.rest[..split];
                self.rest = &self.rest[split + 1..];
                token
            }
            None => core::mem::take(&mut self.rest),
        }
    }
}
