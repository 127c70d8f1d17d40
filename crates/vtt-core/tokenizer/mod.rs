//! Cue-text tokenizer
//!
//! Breaks one cue payload into [`CueToken`]s with a character-level state
//! machine. Escapes are resolved against an [`EntityMap`] while text runs
//! are collected; incorrect escapes are reported and kept literally.
//!
//! The tokenizer never fails. Diagnostics are collected internally and
//! drained by the caller with [`CueTextTokenizer::take_issues`] after each
//! token, which keeps them ordered with diagnostics raised by the caller.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::{CueTextTokenizer, CueToken, EntityMap};
//!
//! let entities = EntityMap::default();
//! let mut tokenizer = CueTextTokenizer::new("<v Roger>fish &chips", &entities);
//!
//! while let Some(token) = tokenizer.next_token() {
//!     println!("{token:?}");
//! }
//! assert_eq!(tokenizer.issues().len(), 1);
//! ```

use alloc::vec::Vec;

pub mod entities;
pub mod scanner;
pub mod state;
pub mod tokens;

pub use entities::{EntityMap, DEFAULT_ENTITIES};
pub use scanner::CharCursor;
pub use state::{TokenBuffers, TokenizerState};
pub use tokens::{CueToken, StartTag};

use crate::{
    parser::errors::{ErrorKind, IssueCollector, ParseError, ParseResultWithIssues},
    utils::is_vtt_space,
};

/// Incremental tokenizer over one cue payload
#[derive(Debug, Clone)]
pub struct CueTextTokenizer<'e> {
    /// Cursor over the payload
    cursor: CharCursor,
    /// Escapes available to text runs
    entities: &'e EntityMap,
    /// Document line of the first payload line
    base_line: usize,
    /// Diagnostics not yet drained by the caller
    issues: IssueCollector,
}

impl<'e> CueTextTokenizer<'e> {
    /// Create a tokenizer whose first payload line is line 1
    #[must_use]
    pub fn new(text: &str, entities: &'e EntityMap) -> Self {
        Self {
            cursor: CharCursor::new(text),
            entities,
            base_line: 1,
            issues: IssueCollector::new(),
        }
    }

    /// Report diagnostics relative to the document line the payload starts on
    #[must_use]
    pub fn with_base_line(mut self, line: usize) -> Self {
        self.base_line = line;
        self
    }

    /// Document line the cursor is on
    #[must_use]
    pub const fn line(&self) -> usize {
        self.base_line + self.cursor.line() - 1
    }

    /// Column the cursor is on (1-based)
    #[must_use]
    pub const fn column(&self) -> usize {
        self.cursor.column()
    }

    /// Check if the whole payload has been tokenized
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Diagnostics collected since the last drain
    #[must_use]
    pub fn issues(&self) -> &[ParseError] {
        self.issues.issues()
    }

    /// Drain collected diagnostics
    pub fn take_issues(&mut self) -> Vec<ParseError> {
        self.issues.take_issues()
    }

    /// Tokenize the rest of the payload
    #[must_use]
    pub fn tokenize(mut self) -> ParseResultWithIssues<Vec<CueToken>> {
        let tokens: Vec<CueToken> = self.by_ref().collect();
        ParseResultWithIssues::with_issues(tokens, self.issues.into_issues())
    }

    /// Get the next token, `None` once the payload is exhausted
    pub fn next_token(&mut self) -> Option<CueToken> {
        use TokenizerState as S;

        if self.cursor.is_at_end() {
            return None;
        }

        let mut state = S::Data;
        let mut buffers = TokenBuffers::default();

        loop {
            let c = self.cursor.peek();

            match (state, c) {
                (S::Data, Some('&')) => {
                    buffers.start_escape();
                    state = S::Escape;
                }
                (S::Data, Some('<')) if buffers.result.is_empty() => state = S::Tag,
                (S::Data, Some('<') | None) => return Some(buffers.finish(state)),
                (S::Data, Some(ch)) => buffers.result.push(ch),

                (S::Escape, Some('<') | None) => {
                    self.report_escape();
                    match self.entities.resolve_unterminated(&buffers.buffer) {
                        Some(resolved) => buffers.result.push_str(&resolved),
                        None => buffers.result.push_str(&buffers.buffer),
                    }
                    return Some(buffers.finish(state));
                }
                (S::Escape, Some('&')) => {
                    self.report_escape();
                    buffers.result.push_str(&buffers.buffer);
                    buffers.start_escape();
                }
                (S::Escape, Some(';')) => {
                    if let Some(resolved) = self.entities.resolve(&buffers.buffer) {
                        buffers.result.push_str(&resolved);
                    } else {
                        self.report_escape();
                        buffers.result.push_str(&buffers.buffer);
                        buffers.result.push(';');
                    }
                    state = S::Data;
                }
                (S::Escape, Some(ch)) if ch.is_ascii_alphanumeric() || ch == '#' => {
                    buffers.buffer.push(ch);
                }
                (S::Escape, Some(ch)) => {
                    self.report_escape();
                    buffers.result.push_str(&buffers.buffer);
                    buffers.result.push(ch);
                    state = S::Data;
                }

                // Every remaining state is inside a tag
                (_, None | Some('>')) => {
                    if c.is_some() {
                        self.cursor.advance();
                    }
                    return Some(buffers.finish(state));
                }

                (S::Tag, Some(ch)) if is_tag_space(ch) => state = S::StartTagAnnotation,
                (S::Tag, Some('.')) => state = S::StartTagClass,
                (S::Tag, Some('/')) => state = S::EndTag,
                (S::Tag, Some(ch)) if ch.is_ascii_digit() => {
                    buffers.result.push(ch);
                    state = S::TimestampTag;
                }
                (S::Tag, Some(ch)) => {
                    buffers.result.push(ch);
                    state = S::StartTag;
                }

                (S::StartTag, Some(ch)) if is_tag_space(ch) => state = S::StartTagAnnotation,
                (S::StartTag, Some('.')) => state = S::StartTagClass,
                (S::StartTag, Some(ch)) => buffers.result.push(ch),

                (S::StartTagClass, Some(ch)) if is_tag_space(ch) => {
                    buffers.push_class();
                    state = S::StartTagAnnotation;
                }
                (S::StartTagClass, Some('.')) => buffers.push_class(),
                (S::StartTagClass, Some(ch)) => buffers.buffer.push(ch),

                (S::StartTagAnnotation, Some(ch)) => buffers.buffer.push(ch),
                (S::EndTag | S::TimestampTag, Some(ch)) => buffers.result.push(ch),
            }

            self.cursor.advance();
        }
    }

    fn report_escape(&mut self) {
        self.issues.add_issue(ParseError::with_column(
            ErrorKind::IncorrectEscape,
            self.line(),
            self.cursor.column(),
        ));
    }
}

impl Iterator for CueTextTokenizer<'_> {
    type Item = CueToken;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Whitespace that ends a tag name or class
const fn is_tag_space(ch: char) -> bool {
    is_vtt_space(ch) || matches!(ch, '\n' | '\x0C')
}

/// Tokenize a payload with the default escapes
///
/// Convenience for inspecting token streams; the parser drives
/// [`CueTextTokenizer`] directly.
#[must_use]
pub fn tokenize(text: &str) -> ParseResultWithIssues<Vec<CueToken>> {
    let entities = EntityMap::default();
    CueTextTokenizer::new(text, &entities).tokenize()
}
