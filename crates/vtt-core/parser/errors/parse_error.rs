//! Diagnostic record for problems found while parsing a document
//!
//! Every problem the parser finds becomes a [`ParseError`]: the 1-based line
//! it was found on, an optional column, and an [`ErrorKind`] that fixes both
//! the human-readable message and the [`IssueCategory`]. None of them stop
//! a parse.

use core::fmt;

/// Issue categories following the parser's recovery policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IssueCategory {
    /// Signature, header, blank-line, identifier and comment problems
    ///
    /// Parsing resumes at the next recoverable boundary.
    Structure,

    /// Timestamp, settings, escape and tag syntax violations
    ///
    /// On a timing line these discard the cue being parsed.
    Grammar,

    /// Ordering, duplicate, range and nesting violations
    ///
    /// Reported only; the cue is kept.
    Semantic,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure => write!(f, "structure"),
            Self::Grammar => write!(f, "grammar"),
            Self::Semantic => write!(f, "semantic"),
        }
    }
}

/// Every diagnostic the parser can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    // Document structure
    InvalidSignature,
    MissingBlankLineAfterSignature,
    TimestampInComment,
    StandaloneIdentifier,
    IdentifierWithoutTiming,
    MissingBlankLineBeforeCue,

    // Timestamp grammar
    NoTimestamp,
    TimestampNotDigit,
    NoTimeUnitSeparator,
    NotTwoDigits,
    NoSecondsFound,
    NoDecimalSeparator,
    MillisecondsNotThreeDigits,
    MinutesOutOfRange,
    SecondsOutOfRange,
    HoursOutOfRange,
    TrailingTimestampCharacters,

    // Cue timing line
    StartBeforePreviousCue,
    MissingSpaceBeforeArrow,
    NoTimestampSeparator,
    MissingSpaceAfterArrow,
    EndNotAfterStart,
    MissingSpaceBeforeSettings,

    // Cue settings
    DuplicateSetting,
    MissingSettingValue,
    InvalidWritingDirection,
    InvalidLinePosition,
    NegativeLinePercentage,
    LinePercentageOutOfRange,
    InvalidLineAlignment,
    TextPositionNotPercentage,
    InvalidTextPosition,
    TextPositionOutOfRange,
    InvalidPositionAlignment,
    SizeNotPercentage,
    InvalidSize,
    SizeOutOfRange,
    InvalidAlignment,
    InvalidSetting,

    // Cue text
    IncorrectEscape,
    StartTagInChapters,
    EndTagInChapters,
    TimestampInChapters,
    AnnotationNotAllowed,
    NestedVoice,
    VoiceWithoutAnnotation,
    IncorrectStartTag,
    IncorrectEndTag,
    TimestampOutsideCue,
    TimestampNotIncreasing,
    MissingEndTag,
    NestingTooDeep,
}

impl ErrorKind {
    /// Human-readable message for this diagnostic
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidSignature => "No valid signature. (File needs to start with \"WEBVTT\".)",
            Self::MissingBlankLineAfterSignature => "No blank line after the signature.",
            Self::TimestampInComment => "Cannot have timestamp in a comment.",
            Self::StandaloneIdentifier => "Cue identifier cannot be standalone.",
            Self::IdentifierWithoutTiming => "Cue identifier needs to be followed by timestamp.",
            Self::MissingBlankLineBeforeCue => "Blank line missing before cue.",

            Self::NoTimestamp => "No timestamp found.",
            Self::TimestampNotDigit => "Timestamp must start with a character in the range 0-9.",
            Self::NoTimeUnitSeparator => "No time unit separator found.",
            Self::NotTwoDigits => "Must be exactly two digits.",
            Self::NoSecondsFound => "No seconds found or minutes is greater than 59.",
            Self::NoDecimalSeparator => "No decimal separator (\".\") found.",
            Self::MillisecondsNotThreeDigits => "Milliseconds must be given in three digits.",
            Self::MinutesOutOfRange => "You cannot have more than 59 minutes.",
            Self::SecondsOutOfRange => "You cannot have more than 59 seconds.",
            Self::HoursOutOfRange => "Timestamp hours out of range.",
            Self::TrailingTimestampCharacters => "Timestamp must not have trailing characters.",

            Self::StartBeforePreviousCue => {
                "Start timestamp is not greater than or equal to start timestamp of previous cue."
            }
            Self::MissingSpaceBeforeArrow => "Timestamp not separated from \"-->\" by whitespace.",
            Self::NoTimestampSeparator => "No valid timestamp separator found.",
            Self::MissingSpaceAfterArrow => "\"-->\" not separated from timestamp by whitespace.",
            Self::EndNotAfterStart => "End timestamp is not greater than start timestamp.",
            Self::MissingSpaceBeforeSettings => {
                "Settings must be separated from the end timestamp by whitespace."
            }

            Self::DuplicateSetting => "Duplicate setting.",
            Self::MissingSettingValue => "No value for setting defined.",
            Self::InvalidWritingDirection => "Writing direction can only be set to 'rl' or 'lr'.",
            Self::InvalidLinePosition => "Line position takes a number or percentage.",
            Self::NegativeLinePercentage => "Line position cannot be a negative percentage.",
            Self::LinePercentageOutOfRange => "Line position cannot be >100%.",
            Self::InvalidLineAlignment => "Line alignment needs to be one of start, center or end.",
            Self::TextPositionNotPercentage => "Text position must be a percentage.",
            Self::InvalidTextPosition => "Text position needs to be a number.",
            Self::TextPositionOutOfRange => "Text position needs to be between 0 and 100%.",
            Self::InvalidPositionAlignment => {
                "Position alignment needs to be one of line-left, center or line-right."
            }
            Self::SizeNotPercentage => "Size must be a percentage.",
            Self::InvalidSize => "Size needs to be a number.",
            Self::SizeOutOfRange => "Size needs to be between 0 and 100%.",
            Self::InvalidAlignment => {
                "Alignment can only be set to one of start, center, end, left, right."
            }
            Self::InvalidSetting => "Invalid setting.",

            Self::IncorrectEscape => "Incorrect escape.",
            Self::StartTagInChapters => "Start tags not allowed in chapter title text.",
            Self::EndTagInChapters => "End tags not allowed in chapter title text.",
            Self::TimestampInChapters => "Timestamp not allowed in chapter title text.",
            Self::AnnotationNotAllowed => "Only <v> and <lang> can have an annotation.",
            Self::NestedVoice => "<v> cannot be nested inside itself.",
            Self::VoiceWithoutAnnotation => "<v> requires an annotation.",
            Self::IncorrectStartTag => "Incorrect start tag.",
            Self::IncorrectEndTag => "Incorrect end tag.",
            Self::TimestampOutsideCue => {
                "Timestamp must be between start timestamp and end timestamp."
            }
            Self::TimestampNotIncreasing => "Timestamp must be greater than any previous timestamp.",
            Self::MissingEndTag => "Required end tag missing.",
            Self::NestingTooDeep => "Markup is nested too deeply.",
        }
    }

    /// Recovery category this diagnostic belongs to
    #[must_use]
    pub const fn category(self) -> IssueCategory {
        match self {
            Self::InvalidSignature
            | Self::MissingBlankLineAfterSignature
            | Self::TimestampInComment
            | Self::StandaloneIdentifier
            | Self::IdentifierWithoutTiming
            | Self::MissingBlankLineBeforeCue => IssueCategory::Structure,

            Self::StartBeforePreviousCue
            | Self::EndNotAfterStart
            | Self::DuplicateSetting
            | Self::NegativeLinePercentage
            | Self::LinePercentageOutOfRange
            | Self::TextPositionOutOfRange
            | Self::SizeOutOfRange
            | Self::StartTagInChapters
            | Self::EndTagInChapters
            | Self::TimestampInChapters
            | Self::AnnotationNotAllowed
            | Self::NestedVoice
            | Self::VoiceWithoutAnnotation
            | Self::IncorrectEndTag
            | Self::TimestampOutsideCue
            | Self::TimestampNotIncreasing
            | Self::MissingEndTag
            | Self::NestingTooDeep => IssueCategory::Semantic,

            _ => IssueCategory::Grammar,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// One diagnostic: where it was found and what went wrong
///
/// `column` is set for diagnostics raised by the character-level scanners
/// and counts characters from 1 within the reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseError {
    /// Line number where the problem was found (1-based)
    pub line: usize,

    /// Column within the line (1-based), when known
    pub column: Option<usize>,

    /// What went wrong
    pub kind: ErrorKind,
}

impl ParseError {
    /// Create a line-level diagnostic
    #[must_use]
    pub const fn new(kind: ErrorKind, line: usize) -> Self {
        Self {
            line,
            column: None,
            kind,
        }
    }

    /// Create a diagnostic pointing at a specific column
    #[must_use]
    pub const fn with_column(kind: ErrorKind, line: usize, column: usize) -> Self {
        Self {
            line,
            column: Some(column),
            kind,
        }
    }

    /// Human-readable message
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// Recovery category of this diagnostic
    #[must_use]
    pub const fn category(&self) -> IssueCategory {
        self.kind.category()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "line {}:{}: {}", self.line, column, self.message()),
            None => write!(f, "line {}: {}", self.line, self.message()),
        }
    }
}
