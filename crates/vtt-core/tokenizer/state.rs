//! Tokenizer state machine and per-token buffers
//!
//! Each call to `next_token` starts in [`TokenizerState::Data`] with empty
//! [`TokenBuffers`] and walks the states until one token is complete.

use alloc::{string::String, vec::Vec};

use super::tokens::{CueToken, StartTag};
use crate::utils::is_vtt_space;

/// Tokenizer states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenizerState {
    /// Plain text outside any tag
    #[default]
    Data,
    /// After `&`, collecting an escape name
    Escape,
    /// Right after `<`
    Tag,
    /// Collecting a start tag name
    StartTag,
    /// Collecting a class after `.`
    StartTagClass,
    /// Collecting annotation text after whitespace
    StartTagAnnotation,
    /// Collecting an end tag name after `</`
    EndTag,
    /// Collecting timestamp tag text after `<` and a digit
    TimestampTag,
}

/// Text accumulated while one token is being scanned
#[derive(Debug, Clone, Default)]
pub struct TokenBuffers {
    /// Text run, tag name or timestamp text
    pub result: String,
    /// Escape name, current class or annotation
    pub buffer: String,
    /// Completed classes
    pub classes: Vec<String>,
}

impl TokenBuffers {
    /// Move the current class into `classes` unless it is empty
    pub fn push_class(&mut self) {
        if !self.buffer.is_empty() {
            self.classes.push(core::mem::take(&mut self.buffer));
        }
    }

    /// Restart the escape buffer at a fresh `&`
    pub fn start_escape(&mut self) {
        self.buffer.clear();
        self.buffer.push('&');
    }

    /// Build the token that ends in `state`
    #[must_use]
    pub fn finish(mut self, state: TokenizerState) -> CueToken {
        match state {
            TokenizerState::Data | TokenizerState::Escape => CueToken::Text(self.result),
            TokenizerState::Tag | TokenizerState::StartTag => {
                CueToken::StartTag(StartTag::named(self.result))
            }
            TokenizerState::StartTagClass => {
                self.push_class();
                CueToken::StartTag(StartTag {
                    name: self.result,
                    classes: self.classes,
                    annotation: String::new(),
                })
            }
            TokenizerState::StartTagAnnotation => CueToken::StartTag(StartTag {
                name: self.result,
                classes: self.classes,
                annotation: collapse_whitespace(&self.buffer),
            }),
            TokenizerState::EndTag => CueToken::EndTag(self.result),
            TokenizerState::TimestampTag => CueToken::Timestamp(self.result),
        }
    }
}

/// Trim an annotation and collapse inner whitespace runs to one space
fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    for word in text
        .split(|c: char| is_vtt_space(c) || matches!(c, '\n' | '\r' | '\x0C'))
        .filter(|word| !word.is_empty())
    {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(word);
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[test]
    fn tokens_start_in_data_state() {
        assert_eq!(TokenizerState::default(), TokenizerState::Data);
    }

    #[test]
    fn annotation_whitespace_collapses() {
        assert_eq!(collapse_whitespace("  Esme \t\n Weatherwax  "), "Esme Weatherwax");
        assert_eq!(collapse_whitespace("\n"), "");
    }

    #[test]
    fn finish_class_state_keeps_pending_class() {
        let mut buffers = TokenBuffers {
            result: "c".to_string(),
            ..TokenBuffers::default()
        };
        buffers.buffer.push_str("yellow");
        buffers.push_class();
        buffers.buffer.push_str("bg_blue");

        assert_eq!(
            buffers.finish(TokenizerState::StartTagClass),
            CueToken::StartTag(StartTag {
                name: "c".to_string(),
                classes: vec!["yellow".to_string(), "bg_blue".to_string()],
                annotation: String::new(),
            })
        );
    }

    #[test]
    fn empty_classes_are_dropped() {
        let mut buffers = TokenBuffers::default();
        buffers.push_class();
        assert!(buffers.classes.is_empty());
    }
}
