//! # vtt-core
//!
//! Validating parser for WebVTT (Web Video Text Tracks) caption documents.
//! Checks the document signature and header, segments the document into cue
//! blocks, scans cue timings and settings, and tokenizes cue payload text into
//! a markup tree. Every problem is reported as a [`ParseError`] carrying the
//! line it was found on; malformed input never aborts a parse.
//!
//! ## Features
//!
//! - **Best-effort recovery**: bad cues are skipped at the next blank line or
//!   timing line, so one parse yields the complete diagnostic list
//! - **Strict timing grammar**: `HH:MM:SS.mmm` and `MM:SS.mmm` with exact
//!   millisecond values
//! - **Cue settings**: `vertical`, `line`, `position`, `size`, `align`
//! - **Markup tree**: `<c>`, `<i>`, `<b>`, `<u>`, `<ruby>`/`<rt>`, `<v>`,
//!   `<lang>` and in-cue timestamps, with entity resolution
//! - **Parsing modes**: standard, `metadata` and `chapters`
//!
//! ## Quick Start
//!
//! ```rust
//! use vtt_core::WebVttParser;
//!
//! let document = "WEBVTT\n\n00:00.500 --> 00:02.000\n<c.yellow>Hello</c> world\n";
//!
//! let parsed = WebVttParser::new().parse(document);
//! assert!(parsed.is_valid());
//! assert_eq!(parsed.cues().len(), 1);
//! assert_eq!(parsed.cues()[0].tree.plain_text(), "Hello world");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod parser;
pub mod tokenizer;
pub mod utils;

pub use parser::{
    Cue, CueSettings, CueTree, MarkupNode, ParseError, ParseMode, ParsedDocument, ParserConfig,
    Timestamp, WebVttParser,
};
pub use tokenizer::{CueTextTokenizer, CueToken, EntityMap};
pub use utils::CoreError;

use alloc::vec::Vec;

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for core operations, using the crate's unified `CoreError`.
///
/// Only API-boundary failures (for example an unknown mode string) use this
/// type. Problems inside a document are reported as [`ParseError`] values.
pub type Result<T> = core::result::Result<T, CoreError>;

/// Parse a document with the default configuration.
///
/// Shorthand for `WebVttParser::new().parse(input)`.
#[must_use]
pub fn parse(input: &str) -> ParsedDocument {
    WebVttParser::new().parse(input)
}

/// Validate a document and return only its diagnostics.
///
/// An empty list means the document is fully valid.
///
/// ```rust
/// assert!(vtt_core::validate("WEBVTT").is_empty());
/// assert!(!vtt_core::validate("NO_WEBVTT").is_empty());
/// ```
#[must_use]
pub fn validate(input: &str) -> Vec<ParseError> {
    parse(input).into_errors()
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    const GOOD_DOCUMENT: &str = "WEBVTT

1
00:00:00.500 --> 00:00:02.000
<c.yellow.bg_blue>This is yellow text on a blue background</c>

2
00:00:02.500 --> 00:00:04.300
and the way we access it is changing stuff position:45%,line-right align:center size:35%
";

    const BAD_DOCUMENT: &str = "WEBVTT

00:00:00.500 --> 00:00:02.000
The Web is always changing & changing

00:00:02.500 --> 00:00:04.300
and the way we access it is changing

00:00:05.500 --> 00:00:06.300 position:10%,line-left align:left size:35%
Where did he go?

00:00:13.000 --> 00:00:16.500 position:90% align:right size:35%
I think he went down this lane.

00:00:14.000 --> 00:00:16.500 position:45%,line-right align:center size:135
What are you waiting for?
";

    #[test]
    fn signature_only_document_is_valid() {
        let parsed = parse("WEBVTT");
        assert!(parsed.errors().is_empty());
        assert!(parsed.cues().is_empty());
    }

    #[test]
    fn wrong_signature_is_reported() {
        assert!(!validate("NO_WEBVTT").is_empty());
    }

    #[test]
    fn good_document_has_no_errors() {
        let parsed = parse(GOOD_DOCUMENT);
        assert_eq!(parsed.errors(), &[]);
        assert_eq!(parsed.cues().len(), 2);
        assert_eq!(parsed.cues()[0].id, "1");
        assert_eq!(parsed.cues()[1].id, "2");
    }

    #[test]
    fn bad_document_reports_every_problem() {
        let parsed = parse(BAD_DOCUMENT);
        let messages: Vec<&str> = parsed.errors().iter().map(ParseError::message).collect();

        assert!(messages.contains(&"Incorrect escape."));
        assert!(messages.contains(&"Size must be a percentage."));
        assert_eq!(parsed.cues().len(), 5);
    }

    #[test]
    fn invalid_mode_is_rejected_at_the_boundary() {
        let result: Result<ParseMode> = "subtitles".parse();
        assert!(matches!(result, Err(CoreError::InvalidMode(_))));
    }
}
