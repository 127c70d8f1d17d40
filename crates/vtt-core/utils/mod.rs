//! Utility functions and shared types for vtt-rs core
//!
//! Contains the crate-wide error type, hashing helpers used by the entity
//! map, and the input normalization applied before a document is segmented.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::utils::{normalize_input, strip_bom};
//!
//! let normalized = normalize_input("WEBVTT\r\n\r00:01.000");
//! assert_eq!(normalized, "WEBVTT\n\n00:01.000");
//!
//! assert_eq!(strip_bom("\u{FEFF}WEBVTT"), ("WEBVTT", true));
//! ```

use alloc::string::String;

pub mod errors;
pub mod hashers;

pub use errors::CoreError;
pub use hashers::{create_hash_map, create_hash_map_with_capacity, HashMap};

/// Byte order mark accepted in front of the signature line
pub const BOM: char = '\u{FEFF}';

/// Normalize a raw document before line segmentation
///
/// Every NUL becomes U+FFFD, then CRLF pairs and lone CRs become LF. The
/// replacement happens in a single pass so a `\r\n` pair is never counted
/// as two line breaks.
#[must_use]
pub fn normalize_input(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\0' => normalized.push('\u{FFFD}'),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                normalized.push('\n');
            }
            other => normalized.push(other),
        }
    }

    normalized
}

/// Strip a leading byte order mark
///
/// Returns the remaining text and whether a BOM was removed.
#[must_use]
pub fn strip_bom(text: &str) -> (&str, bool) {
    text.strip_prefix(BOM)
        .map_or((text, false), |stripped| (stripped, true))
}

/// Whitespace recognized between timestamps and cue settings
#[must_use]
pub const fn is_vtt_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t')
}
