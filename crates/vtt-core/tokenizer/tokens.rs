//! Token definitions for cue-text tokenization
//!
//! Cue payload text is broken into four kinds of tokens: text runs with
//! escapes already resolved, start tags, end tags and timestamp tags. Tag
//! tokens carry the raw names as written; deciding whether a name is valid
//! belongs to the tree builder.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::{CueTextTokenizer, CueToken, EntityMap};
//!
//! let entities = EntityMap::default();
//! let tokens: Vec<CueToken> = CueTextTokenizer::new("<b>a&amp;b</b>", &entities).collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1], CueToken::Text("a&b".to_string()));
//! assert_eq!(tokens[2], CueToken::EndTag("b".to_string()));
//! ```

use alloc::{string::String, vec::Vec};
use core::fmt;

/// Opening tag such as `<c.yellow>` or `<v Esme>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartTag {
    /// Tag name, possibly empty or unknown
    pub name: String,

    /// Non-empty classes in source order
    pub classes: Vec<String>,

    /// Annotation with whitespace runs collapsed to single spaces
    pub annotation: String,
}

impl StartTag {
    /// Create a start tag without classes or annotation
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Token produced by the cue-text tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueToken {
    /// Text run with escapes resolved
    Text(String),
    /// Opening tag
    StartTag(StartTag),
    /// Closing tag with its raw name
    EndTag(String),
    /// Raw text of a timestamp tag, not yet validated
    Timestamp(String),
}

impl CueToken {
    /// Check if this token is a text run
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Short description of the token kind for logging
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::StartTag(_) => "start tag",
            Self::EndTag(_) => "end tag",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl fmt::Display for CueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::StartTag(tag) => {
                write!(f, "<{}", tag.name)?;
                for class in &tag.classes {
                    write!(f, ".{class}")?;
                }
                if !tag.annotation.is_empty() {
                    write!(f, " {}", tag.annotation)?;
                }
                f.write_str(">")
            }
            Self::EndTag(name) => write!(f, "</{name}>"),
            Self::Timestamp(text) => write!(f, "<{text}>"),
        }
    }
}
