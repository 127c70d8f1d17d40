//! Character cursor shared by the timing scanner and the cue-text tokenizer
//!
//! Both scanners walk one line (or one cue payload) a character at a time
//! with single-character lookahead. Reading past the end yields `None`
//! instead of failing, which is what every grammar rule in the scanners
//! branches on.

use alloc::{string::String, vec::Vec};

/// Bounds-checked cursor over an immutable character buffer
///
/// Tracks the position as a character index together with a 1-based line
/// and column, so diagnostics can point into multi-line cue payloads.
#[derive(Debug, Clone)]
pub struct CharCursor {
    /// Characters being scanned
    chars: Vec<char>,
    /// Current character index
    position: usize,
    /// Current line number relative to the start of the buffer (1-based)
    line: usize,
    /// Current column number (1-based)
    column: usize,
}

impl CharCursor {
    /// Create a cursor positioned at the first character of `source`
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current character index
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Current line relative to the buffer start (1-based)
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Current column (1-based)
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Character under the cursor, `None` past the end
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Character `offset` places after the cursor
    #[must_use]
    pub fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    /// Check whether the current character satisfies `predicate`
    pub fn check(&self, predicate: impl Fn(char) -> bool) -> bool {
        self.peek().is_some_and(predicate)
    }

    /// Advance past the current character
    ///
    /// Returns the character that was consumed. At the end of input the
    /// cursor does not move and `None` is returned.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Skip characters while `predicate` holds, returning how many were skipped
    pub fn skip_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let start = self.position;
        while self.check(&predicate) {
            self.advance();
        }
        self.position - start
    }

    /// Collect characters while `predicate` holds
    pub fn collect_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut collected = String::new();
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            collected.push(ch);
            self.advance();
        }
        collected
    }

    /// Remaining characters from the cursor to the end of input
    #[must_use]
    pub fn remaining(&self) -> String {
        self.chars[self.position..].iter().collect()
    }

    /// Check if the cursor has passed the last character
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }
}
