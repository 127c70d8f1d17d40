//! Result of parsing one document

use alloc::vec::Vec;

use super::{
    ast::Cue,
    errors::{IssueCategory, ParseError},
    ParseMode,
};

/// Cues and diagnostics of a parsed document
///
/// Produced for every input, however malformed. A document is valid when
/// no diagnostics were reported.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedDocument {
    /// Mode the document was parsed in
    mode: ParseMode,

    /// Accepted cues in document order
    cues: Vec<Cue>,

    /// Diagnostics in emission order
    errors: Vec<ParseError>,
}

impl ParsedDocument {
    /// Assemble a document from its parts
    #[must_use]
    pub const fn from_parts(
        mode: ParseMode,
        cues: Vec<Cue>,
        errors: Vec<ParseError>,
    ) -> Self {
        Self {
            mode,
            cues,
            errors,
        }
    }

    /// Mode the document was parsed in
    #[must_use]
    pub const fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Accepted cues in document order
    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Diagnostics in emission order
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Check if no diagnostics were reported
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Diagnostics of one category
    pub fn errors_in(&self, category: IssueCategory) -> impl Iterator<Item = &ParseError> {
        self.errors
            .iter()
            .filter(move |error| error.category() == category)
    }

    /// Find a cue by identifier
    #[must_use]
    pub fn cue_by_id(&self, id: &str) -> Option<&Cue> {
        self.cues.iter().find(|cue| cue.id == id)
    }

    /// Consume the document, keeping only its diagnostics
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Consume the document into cues and diagnostics
    #[must_use]
    pub fn into_parts(self) -> (Vec<Cue>, Vec<ParseError>) {
        (self.cues, self.errors)
    }
}
