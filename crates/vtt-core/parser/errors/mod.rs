//! Diagnostic types for WebVTT parsing
//!
//! Parsing never fails on malformed input. Every problem is recorded as a
//! [`ParseError`] and parsing carries on from the next recoverable point.
//!
//! # Module Organization
//!
//! - `parse_error` - Diagnostic record, kinds and categories
//! - `parse_result` - Issue collection and results carrying diagnostics

pub mod parse_error;
pub mod parse_result;

pub use parse_error::{ErrorKind, IssueCategory, ParseError};
pub use parse_result::{IssueCollector, ParseResultWithIssues};
