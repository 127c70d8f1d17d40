//! Cue timing line scanner
//!
//! Scans `start --> end settings` lines and standalone timestamps with a
//! character cursor. Grammar violations are reported with the column of the
//! offending character; a violation inside a timestamp or a missing `-->`
//! fails the whole line, while ordering and whitespace problems are only
//! reported.

use alloc::string::String;

use super::{
    ast::{Cue, Timestamp},
    errors::{ErrorKind, ParseResultWithIssues},
    session::ParseSession,
    settings,
};
use crate::{tokenizer::CharCursor, utils::is_vtt_space};

/// Scanner over a single timing line
pub struct TimingScanner<'s> {
    cursor: CharCursor,
    session: &'s mut ParseSession,
}

impl<'s> TimingScanner<'s> {
    /// Create a scanner reporting on the session's current line
    pub fn new(line: &str, session: &'s mut ParseSession) -> Self {
        Self {
            cursor: CharCursor::new(line),
            session,
        }
    }

    /// Parse a cue timing line into `cue`
    ///
    /// Returns `false` when the line is unusable and the cue must be
    /// discarded. `previous_start` is the start time of the last accepted
    /// cue.
    pub fn parse_cue(&mut self, cue: &mut Cue, previous_start: Timestamp) -> bool {
        self.cursor.skip_while(is_vtt_space);

        let Some(start) = self.timestamp() else {
            return false;
        };
        cue.start_time = start;
        if start < previous_start {
            self.report(ErrorKind::StartBeforePreviousCue);
        }

        if self.cursor.skip_while(is_vtt_space) == 0 {
            self.report(ErrorKind::MissingSpaceBeforeArrow);
        }

        if !self.at_arrow() {
            self.report(ErrorKind::NoTimestampSeparator);
            return false;
        }
        for _ in 0..3 {
            self.cursor.advance();
        }

        if self.cursor.skip_while(is_vtt_space) == 0 {
            self.report(ErrorKind::MissingSpaceAfterArrow);
        }

        let Some(end) = self.timestamp() else {
            return false;
        };
        cue.end_time = end;
        if end <= start {
            self.report(ErrorKind::EndNotAfterStart);
        }

        if self.cursor.skip_while(is_vtt_space) == 0 && !self.cursor.is_at_end() {
            self.report(ErrorKind::MissingSpaceBeforeSettings);
        }

        let column = self.cursor.column();
        settings::parse_settings(&self.cursor.remaining(), column, cue, self.session);
        true
    }

    /// Parse a timestamp that must span the whole input
    pub fn parse_standalone(&mut self) -> Option<Timestamp> {
        let timestamp = self.timestamp()?;
        if !self.cursor.is_at_end() {
            self.report(ErrorKind::TrailingTimestampCharacters);
            return None;
        }
        Some(timestamp)
    }

    /// Scan one `[hh:]mm:ss.ttt` timestamp
    fn timestamp(&mut self) -> Option<Timestamp> {
        match self.cursor.peek() {
            None => return self.fail(ErrorKind::NoTimestamp),
            Some(ch) if !ch.is_ascii_digit() => return self.fail(ErrorKind::TimestampNotDigit),
            Some(_) => {}
        }

        let first = self.digits();
        let is_hours = first.len() > 2 || digit_value(&first) > 59;

        if !self.eat(':') {
            return self.fail(ErrorKind::NoTimeUnitSeparator);
        }
        let second = self.digits();
        if second.len() != 2 {
            return self.fail(ErrorKind::NotTwoDigits);
        }

        let (hours, minutes, seconds) = if is_hours || self.cursor.peek() == Some(':') {
            if !self.eat(':') {
                return self.fail(ErrorKind::NoSecondsFound);
            }
            let third = self.digits();
            if third.len() != 2 {
                return self.fail(ErrorKind::NotTwoDigits);
            }
            (first, second, third)
        } else {
            if first.len() != 2 {
                return self.fail(ErrorKind::NotTwoDigits);
            }
            (String::from("0"), first, second)
        };

        if !self.eat('.') {
            return self.fail(ErrorKind::NoDecimalSeparator);
        }
        let millis = self.digits();
        if millis.len() != 3 {
            return self.fail(ErrorKind::MillisecondsNotThreeDigits);
        }

        let minutes = digit_value(&minutes);
        let seconds = digit_value(&seconds);
        if minutes > 59 {
            return self.fail(ErrorKind::MinutesOutOfRange);
        }
        if seconds > 59 {
            return self.fail(ErrorKind::SecondsOutOfRange);
        }

        let timestamp = Timestamp::from_parts(
            digit_value(&hours),
            minutes,
            seconds,
            digit_value(&millis),
        );
        if timestamp.is_none() {
            return self.fail(ErrorKind::HoursOutOfRange);
        }
        timestamp
    }

    fn digits(&mut self) -> String {
        self.cursor.collect_while(|c| c.is_ascii_digit())
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.cursor.peek() == Some(expected) {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    fn at_arrow(&self) -> bool {
        self.cursor.peek() == Some('-')
            && self.cursor.peek_ahead(1) == Some('-')
            && self.cursor.peek_ahead(2) == Some('>')
    }

    fn report(&mut self, kind: ErrorKind) {
        self.session.report_column(kind, self.cursor.column());
    }

    fn fail<T>(&mut self, kind: ErrorKind) -> Option<T> {
        self.report(kind);
        None
    }
}

/// Value of an all-digit string, saturating on overflow
fn digit_value(digits: &str) -> u64 {
    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

/// Parse a standalone timestamp such as the text of an in-cue timestamp tag
///
/// The value is `None` when the text is not a complete timestamp; the
/// diagnostics say why. Columns count from the first character of `input`.
///
/// # Example
///
/// ```rust
/// use vtt_core::parser::parse_timestamp;
///
/// let parsed = parse_timestamp("00:01:02.500");
/// assert_eq!(parsed.value.map(|ts| ts.as_millis()), Some(62_500));
///
/// let bad = parse_timestamp("00:01.5");
/// assert!(bad.value.is_none());
/// assert_eq!(bad.issues[0].message(), "Milliseconds must be given in three digits.");
/// ```
#[must_use]
pub fn parse_timestamp(input: &str) -> ParseResultWithIssues<Option<Timestamp>> {
    let mut session = ParseSession::new();
    let value = TimingScanner::new(input, &mut session).parse_standalone();
    ParseResultWithIssues::with_issues(value, session.into_issues())
}
