//! WebVTT document parser
//!
//! Parsing runs in three layers: the segmenter splits the document into
//! blocks, the timing scanner reads each cue's timing line and settings, and
//! the cue-text builder turns each payload into a markup tree. All layers
//! report into one [`ParseSession`], so diagnostics come back in the order
//! they were found.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::parser::{ParseMode, ParserConfig, WebVttParser};
//!
//! let document = "WEBVTT\n\nNOTE chapter list\n\n00:00.000 --> 01:00.000\nIntroduction\n";
//!
//! let parser = WebVttParser::with_config(ParserConfig::new().with_mode(ParseMode::Chapters));
//! let parsed = parser.parse(document);
//!
//! assert!(parsed.is_valid());
//! assert_eq!(parsed.cues()[0].text, "Introduction");
//! ```

use crate::utils::{normalize_input, strip_bom};

pub mod ast;
pub mod config;
pub mod cue_text;
pub mod document;
pub mod errors;
mod main;
pub mod session;
pub mod settings;
pub mod timing;

pub use ast::{Cue, CueSettings, CueTree, MarkupNode, Timestamp};
pub use config::{ParseMode, ParserConfig};
pub use cue_text::CueTextBuilder;
pub use document::ParsedDocument;
pub use errors::{ErrorKind, IssueCategory, ParseError, ParseResultWithIssues};
pub use session::ParseSession;
pub use timing::{parse_timestamp, TimingScanner};

use crate::tokenizer::EntityMap;

/// Reusable WebVTT parser
///
/// Holds only configuration, so one parser can be shared between threads
/// and used for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct WebVttParser {
    config: ParserConfig,
}

impl WebVttParser {
    /// Parser in standard mode with the default escapes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser with explicit configuration
    #[must_use]
    pub const fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a complete document
    ///
    /// Never fails: every problem is reported in
    /// [`ParsedDocument::errors`] and parsing continues after it.
    #[must_use]
    pub fn parse(&self, input: &str) -> ParsedDocument {
        let normalized = normalize_input(input);
        let (source, had_bom) = strip_bom(&normalized);
        if had_bom {
            log::trace!("stripped byte order mark");
        }
        main::Parser::new(source, &self.config).parse()
    }
}

/// Parse cue payload text on its own
///
/// `start` and `end` bound the in-cue timestamps. Diagnostics use line 1 for
/// the first payload line.
///
/// # Example
///
/// ```rust
/// use vtt_core::{parser::parse_cue_text, EntityMap, ParseMode, Timestamp};
///
/// let parsed = parse_cue_text(
///     "<i>Hi</i> &unknown;",
///     Timestamp::ZERO,
///     Timestamp::from_millis(1_000),
///     ParseMode::Standard,
///     &EntityMap::default(),
/// );
///
/// assert_eq!(parsed.value.plain_text(), "Hi &unknown;");
/// assert_eq!(parsed.issues[0].message(), "Incorrect escape.");
/// ```
#[must_use]
pub fn parse_cue_text(
    text: &str,
    start: Timestamp,
    end: Timestamp,
    mode: ParseMode,
    entities: &EntityMap,
) -> ParseResultWithIssues<CueTree> {
    let mut session = ParseSession::new();
    let tree = CueTextBuilder::new(&mut session, mode, start, end).build(text, entities, 1);
    ParseResultWithIssues::with_issues(tree, session.into_issues())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn parser_is_shareable() {
        assert_send_sync::<WebVttParser>();
        assert_send_sync::<ParsedDocument>();
    }

    #[test]
    fn bom_is_accepted() {
        let parsed = WebVttParser::new().parse("\u{FEFF}WEBVTT\n");
        assert!(parsed.is_valid());
    }

    #[test]
    fn crlf_line_numbers() {
        let parsed = WebVttParser::new().parse("WEBVTT\r\n\r\n00:01.000 --> 00:00.500\r\nx\r\n");
        assert_eq!(parsed.errors().len(), 1);
        assert_eq!(parsed.errors()[0].line, 3);
        assert_eq!(parsed.errors()[0].kind, ErrorKind::EndNotAfterStart);
    }

    #[test]
    fn standalone_cue_text() {
        let parsed = parse_cue_text(
            "<b>x",
            Timestamp::ZERO,
            Timestamp::from_millis(1),
            ParseMode::Standard,
            &EntityMap::default(),
        );
        assert_eq!(parsed.issues.len(), 1);
        assert_eq!(parsed.issues[0].kind, ErrorKind::MissingEndTag);
    }
}
