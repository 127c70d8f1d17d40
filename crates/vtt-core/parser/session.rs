//! Per-parse state shared by every scanner
//!
//! A [`ParseSession`] owns the diagnostic sink and the line currently being
//! scanned. The segmenter moves the line forward; the timing scanner and the
//! cue-text builder report through the same session so that diagnostics stay
//! in emission order.

use alloc::vec::Vec;

use super::errors::{ErrorKind, IssueCollector, ParseError};

/// Mutable state for one parse
#[derive(Debug, Clone)]
pub struct ParseSession {
    /// Line being scanned (1-based)
    line: usize,
    /// Drop reported diagnostics instead of collecting them
    muted: bool,
    /// Collected diagnostics
    issues: IssueCollector,
}

impl ParseSession {
    /// Create a session positioned on line 1
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line: 1,
            muted: false,
            issues: IssueCollector::new(),
        }
    }

    /// Line currently being scanned (1-based)
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Move the session to another line
    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    /// Switch diagnostic suppression, returning the previous setting
    pub fn mute(&mut self, muted: bool) -> bool {
        core::mem::replace(&mut self.muted, muted)
    }

    /// Check if diagnostics are currently suppressed
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Report a diagnostic at a column of the current line
    pub fn report_column(&mut self, kind: ErrorKind, column: usize) {
        self.report_at(self.line, Some(column), kind);
    }

    /// Report a diagnostic at an explicit position
    pub fn report_at(&mut self, line: usize, column: Option<usize>, kind: ErrorKind) {
        if self.muted {
            return;
        }
        self.issues.add_issue(ParseError { line, column, kind });
    }

    /// Append diagnostics collected elsewhere, honoring suppression
    pub fn absorb(&mut self, issues: impl IntoIterator<Item = ParseError>) {
        if self.muted {
            return;
        }
        for issue in issues {
            self.issues.add_issue(issue);
        }
    }

    /// Diagnostics collected so far
    #[must_use]
    pub fn issues(&self) -> &[ParseError] {
        self.issues.issues()
    }

    /// Consume the session and return its diagnostics
    #[must_use]
    pub fn into_issues(self) -> Vec<ParseError> {
        self.issues.into_issues()
    }
}

impl Default for ParseSession {
    fn default() -> Self {
        Self::new()
    }
}
