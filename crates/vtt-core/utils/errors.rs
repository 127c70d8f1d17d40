//! Core error type for vtt-rs operations
//!
//! `CoreError` covers failures at the API boundary: an unrecognized parsing
//! mode, a malformed entity map entry, or timestamp text handed to
//! [`Timestamp::from_str`](crate::Timestamp). Problems found inside a document
//! are never errors of this kind; they are collected as
//! [`ParseError`](crate::ParseError) diagnostics instead.
//!
//! # Examples
//!
//! ```rust
//! use vtt_core::{CoreError, ParseMode};
//!
//! let err = "karaoke".parse::<ParseMode>().unwrap_err();
//! assert!(matches!(err, CoreError::InvalidMode(_)));
//! assert!(err.to_string().contains("karaoke"));
//! ```

use alloc::{format, string::String};
use core::fmt;

#[cfg(feature = "std")]
use thiserror::Error;

/// Main error type for vtt-rs core operations
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Parsing mode outside the recognized set
    InvalidMode(String),

    /// Entity map entry that cannot be used as an escape
    InvalidEntity { key: String, reason: String },

    /// Timestamp text rejected by the timestamp grammar
    InvalidTime(String),
}

impl CoreError {
    /// Create mode error from the rejected mode text
    pub fn invalid_mode<T: fmt::Display>(mode: T) -> Self {
        Self::InvalidMode(format!("{mode}"))
    }

    /// Create entity error from key and reason
    pub fn invalid_entity<T: fmt::Display>(key: T, reason: &str) -> Self {
        Self::InvalidEntity {
            key: format!("{key}"),
            reason: reason.into(),
        }
    }

    /// Create time error from the rejected text and the grammar message
    pub fn invalid_time<T: fmt::Display>(time: T, reason: &str) -> Self {
        Self::InvalidTime(format!("'{time}': {reason}"))
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMode(mode) => write!(
                f,
                "Invalid parsing mode '{mode}': expected '', 'metadata' or 'chapters'"
            ),
            Self::InvalidEntity { key, reason } => {
                write!(f, "Invalid entity '{key}': {reason}")
            }
            Self::InvalidTime(msg) => write!(f, "Invalid time format: {msg}"),
        }
    }
}

/// no_std compatible Error implementation
#[cfg(not(feature = "std"))]
impl core::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn mode_error_names_the_mode() {
        let err = CoreError::invalid_mode("karaoke");
        assert_eq!(err, CoreError::InvalidMode("karaoke".to_string()));
        assert!(err.to_string().contains("'karaoke'"));
    }

    #[test]
    fn entity_error_carries_reason() {
        let err = CoreError::invalid_entity("amp", "must start with '&'");
        assert!(matches!(err, CoreError::InvalidEntity { .. }));
        assert_eq!(err.to_string(), "Invalid entity 'amp': must start with '&'");
    }

    #[test]
    fn time_error_display() {
        let err = CoreError::invalid_time("1:2", "Must be exactly two digits.");
        assert_eq!(
            err.to_string(),
            "Invalid time format: '1:2': Must be exactly two digits."
        );
    }
}
