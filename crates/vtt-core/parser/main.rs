//! Document segmentation and bad-cue recovery
//!
//! Walks the normalized document line by line: checks the signature and
//! header, splits the rest into comment and cue blocks, hands timing lines
//! to the timing scanner and payloads to the cue-text builder.

use alloc::{string::String, vec::Vec};

use super::{
    ast::{Cue, Timestamp},
    config::ParserConfig,
    cue_text::CueTextBuilder,
    document::ParsedDocument,
    errors::ErrorKind,
    session::ParseSession,
    timing::TimingScanner,
};

const SIGNATURE: &str = "WEBVTT";
const ARROW: &str = "-->";
const COMMENT: &str = "NOTE";

/// Internal parser state for one document
pub(super) struct Parser<'a> {
    /// Document lines, BOM and line terminators removed
    lines: Vec<&'a str>,
    /// Index of the line being examined
    position: usize,
    /// The line at `position` is a timing line found while scanning ahead
    already_collected: bool,
    /// Mode and escapes
    config: &'a ParserConfig,
    /// Diagnostics and current line
    session: ParseSession,
    /// Accepted cues
    cues: Vec<Cue>,
}

impl<'a> Parser<'a> {
    /// Create a parser over normalized document text
    pub fn new(source: &'a str, config: &'a ParserConfig) -> Self {
        Self {
            lines: source.split('\n').collect(),
            position: 0,
            already_collected: false,
            config,
            session: ParseSession::new(),
            cues: Vec::new(),
        }
    }

    /// Parse the complete document
    pub fn parse(mut self) -> ParsedDocument {
        self.check_signature();
        self.position = 1;
        self.skip_header();

        while self.position < self.lines.len() {
            if !self.already_collected {
                while self.current().is_some_and(str::is_empty) {
                    self.position += 1;
                }
                if self.current().is_none() {
                    break;
                }
            }
            self.parse_block();
        }

        let errors = self.session.into_issues();
        log::debug!(
            "parsed {} lines: {} cues, {} diagnostics ({:?} mode)",
            self.lines.len(),
            self.cues.len(),
            errors.len(),
            self.config.mode()
        );
        ParsedDocument::from_parts(self.config.mode(), self.cues, errors)
    }

    fn check_signature(&mut self) {
        let first = self.lines.first().copied().unwrap_or_default();
        if !starts_with_token(first, SIGNATURE) {
            self.session.report_at(1, None, ErrorKind::InvalidSignature);
        }
    }

    /// Report header lines; a timing line ends the header early
    fn skip_header(&mut self) {
        while let Some(line) = self.current().filter(|line| !line.is_empty()) {
            self.report(ErrorKind::MissingBlankLineAfterSignature);
            if line.contains(ARROW) {
                self.already_collected = true;
                break;
            }
            self.position += 1;
        }
    }

    fn parse_block(&mut self) {
        let Some(line) = self.current() else {
            return;
        };
        let mut cue = Cue::default();

        if !line.contains(ARROW) {
            if line.starts_with(COMMENT) {
                self.skip_comment();
                return;
            }

            cue.id = String::from(line);
            self.position += 1;
            match self.current() {
                None | Some("") => {
                    self.report(ErrorKind::StandaloneIdentifier);
                    return;
                }
                Some(next) if !next.contains(ARROW) => {
                    self.report(ErrorKind::IdentifierWithoutTiming);
                    self.position += 1;
                    return;
                }
                Some(_) => {}
            }
        }

        self.already_collected = false;
        let timing_line = self.current().unwrap_or_default();
        let previous_start = self
            .cues
            .last()
            .map_or(Timestamp::ZERO, |previous| previous.start_time);

        self.session.set_line(self.line_number());
        if !TimingScanner::new(timing_line, &mut self.session).parse_cue(&mut cue, previous_start)
        {
            log::trace!("discarding cue at line {}", self.line_number());
            self.position += 1;
            self.skip_bad_cue();
            return;
        }
        self.position += 1;

        let first_payload_line = self.line_number();
        let mut payload = Vec::new();
        while let Some(line) = self.current().filter(|line| !line.is_empty()) {
            if line.contains(ARROW) {
                self.report(ErrorKind::MissingBlankLineBeforeCue);
                self.already_collected = true;
                break;
            }
            payload.push(line);
            self.position += 1;
        }
        cue.text = payload.join("\n");

        cue.tree = CueTextBuilder::new(
            &mut self.session,
            self.config.mode(),
            cue.start_time,
            cue.end_time,
        )
        .build(&cue.text, self.config.entities(), first_payload_line);

        log::trace!(
            "accepted cue {:?} {} --> {}",
            cue.id,
            cue.start_time,
            cue.end_time
        );
        self.cues.push(cue);
    }

    /// Skip a NOTE block, reporting timing lines inside it
    fn skip_comment(&mut self) {
        self.position += 1;
        while let Some(line) = self.current().filter(|line| !line.is_empty()) {
            if line.contains(ARROW) {
                self.report(ErrorKind::TimestampInComment);
            }
            self.position += 1;
        }
    }

    /// Skip the rest of a rejected cue block
    ///
    /// Stops at a blank line, or at a timing line which then starts the
    /// next block.
    fn skip_bad_cue(&mut self) {
        while let Some(line) = self.current().filter(|line| !line.is_empty()) {
            if line.contains(ARROW) {
                log::trace!("resuming at timing line {}", self.line_number());
                self.already_collected = true;
                break;
            }
            self.position += 1;
        }
    }

    fn current(&self) -> Option<&'a str> {
        self.lines.get(self.position).copied()
    }

    /// 1-based number of the line at `position`
    const fn line_number(&self) -> usize {
        self.position + 1
    }

    fn report(&mut self, kind: ErrorKind) {
        self.session.report_at(self.line_number(), None, kind);
    }
}

/// Check that `line` starts with `token` followed by the end of the line,
/// a space or a tab
fn starts_with_token(line: &str, token: &str) -> bool {
    line.strip_prefix(token)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
}
