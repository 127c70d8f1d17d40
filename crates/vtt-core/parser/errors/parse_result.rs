//! Issue collection and results that carry diagnostics
//!
//! [`IssueCollector`] accumulates diagnostics in emission order for one
//! parse. [`ParseResultWithIssues`] pairs a value produced by one of the
//! standalone entry points with the diagnostics found while producing it.

use alloc::vec::Vec;

use super::parse_error::{IssueCategory, ParseError};

/// Ordered sink for diagnostics found during one parse
#[derive(Debug, Clone, Default)]
pub struct IssueCollector {
    /// Diagnostics in emission order
    issues: Vec<ParseError>,
}

impl IssueCollector {
    /// Create new empty issue collector
    #[must_use]
    pub const fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Add a diagnostic to the collection
    pub fn add_issue(&mut self, issue: ParseError) {
        self.issues.push(issue);
    }

    /// Get all collected diagnostics
    #[must_use]
    pub fn issues(&self) -> &[ParseError] {
        &self.issues
    }

    /// Take all diagnostics, leaving the collector empty
    pub fn take_issues(&mut self) -> Vec<ParseError> {
        core::mem::take(&mut self.issues)
    }

    /// Consume the collector and return its diagnostics
    #[must_use]
    pub fn into_issues(self) -> Vec<ParseError> {
        self.issues
    }
}

/// Value produced by a parsing entry point plus its diagnostics
///
/// The value is always present: scanners recover instead of failing, and
/// whether the result is usable is decided by the caller from `issues`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResultWithIssues<T> {
    /// The produced value
    pub value: T,

    /// Diagnostics found while producing the value
    pub issues: Vec<ParseError>,
}

impl<T> ParseResultWithIssues<T> {
    /// Create result with no diagnostics
    pub const fn ok(value: T) -> Self {
        Self {
            value,
            issues: Vec::new(),
        }
    }

    /// Create result with pre-collected diagnostics
    pub const fn with_issues(value: T, issues: Vec<ParseError>) -> Self {
        Self { value, issues }
    }

    /// Check if no diagnostics were found
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Count diagnostics in one category
    #[must_use]
    pub fn count_by_category(&self, category: IssueCategory) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.category() == category)
            .count()
    }

    /// Split into the value and its diagnostics
    pub fn into_parts(self) -> (T, Vec<ParseError>) {
        (self.value, self.issues)
    }
}

impl<T> From<T> for ParseResultWithIssues<T> {
    fn from(value: T) -> Self {
        Self::ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::errors::ErrorKind;
    use alloc::vec;

    #[test]
    fn collector_keeps_emission_order() {
        let mut collector = IssueCollector::new();
        assert!(collector.issues().is_empty());

        collector.add_issue(ParseError::new(ErrorKind::NoTimestamp, 3));
        collector.add_issue(ParseError::new(ErrorKind::InvalidSignature, 1));

        assert_eq!(collector.issues().len(), 2);
        assert_eq!(collector.issues()[0].line, 3);
        assert_eq!(collector.issues()[1].line, 1);
    }

    #[test]
    fn take_issues_empties_collector() {
        let mut collector = IssueCollector::new();
        collector.add_issue(ParseError::new(ErrorKind::InvalidSetting, 2));

        let taken = collector.take_issues();
        assert_eq!(taken.len(), 1);
        assert!(collector.issues().is_empty());
    }

    #[test]
    fn result_counts_by_category() {
        let result = ParseResultWithIssues::with_issues(
            "value",
            vec![
                ParseError::new(ErrorKind::DuplicateSetting, 2),
                ParseError::new(ErrorKind::InvalidSetting, 2),
                ParseError::new(ErrorKind::EndNotAfterStart, 2),
            ],
        );

        assert!(!result.is_clean());
        assert_eq!(result.count_by_category(IssueCategory::Semantic), 2);
        assert_eq!(result.count_by_category(IssueCategory::Grammar), 1);
        assert_eq!(result.count_by_category(IssueCategory::Structure), 0);
    }

    #[test]
    fn result_from_value_is_clean() {
        let result = ParseResultWithIssues::from(42);
        assert!(result.is_clean());
        assert_eq!(result.into_parts(), (42, vec![]));
    }
}
