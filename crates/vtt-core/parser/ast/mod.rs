//! Output model of a parsed WebVTT document
//!
//! Every type here is an owned value: a parsed document does not borrow from
//! its input, so it can outlive the source text and cross thread boundaries.
//!
//! # Examples
//!
//! ```rust
//! use vtt_core::parser::ast::{Cue, Timestamp, WritingDirection};
//!
//! let cue = Cue {
//!     start_time: Timestamp::from_millis(1_000),
//!     end_time: Timestamp::from_millis(3_000),
//!     ..Cue::new("intro")
//! };
//!
//! assert_eq!(cue.duration_millis(), 2_000);
//! assert_eq!(cue.settings.direction, WritingDirection::Horizontal);
//! ```

mod cue;
mod markup;
mod timestamp;

pub use cue::{
    Cue, CueSettings, LineAlign, LinePosition, PositionAlign, TextAlign, TextPosition,
    WritingDirection, DEFAULT_CUE_SETTINGS,
};
pub use markup::{CueTree, MarkupNode, Nodes, ObjectNode, TagName};
pub use timestamp::Timestamp;
