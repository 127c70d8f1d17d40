//! Cue record and cue display settings
//!
//! A [`Cue`] is produced for every cue block whose timing line parses. Its
//! [`CueSettings`] start from [`DEFAULT_CUE_SETTINGS`] and are overwritten
//! one setting at a time by the settings scanner.

use alloc::string::String;
use core::fmt;

use super::{markup::CueTree, timestamp::Timestamp};

/// Writing direction from the `vertical` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WritingDirection {
    /// No `vertical` setting given
    #[default]
    Horizontal,
    /// `vertical:rl`
    Rl,
    /// `vertical:lr`
    Lr,
}

impl WritingDirection {
    /// Parse a `vertical` value
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "rl" => Some(Self::Rl),
            "lr" => Some(Self::Lr),
            _ => None,
        }
    }

    /// Setting keyword for this direction
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Rl => "rl",
            Self::Lr => "lr",
        }
    }
}

/// Line position from the `line` setting
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinePosition {
    /// Chosen by the renderer
    #[default]
    Auto,
    /// Line number, or percentage when `snap_to_lines` is false
    Number(f64),
}

/// Line alignment from the `line` setting's second component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineAlign {
    #[default]
    Start,
    Center,
    End,
}

impl LineAlign {
    /// Parse a line alignment keyword
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// Text position from the `position` setting
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextPosition {
    /// Chosen by the renderer
    #[default]
    Auto,
    /// Percentage of the viewport, 0 to 100
    Percentage(f64),
}

/// Position alignment from the `position` setting's second component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionAlign {
    #[default]
    Auto,
    LineLeft,
    Center,
    LineRight,
}

impl PositionAlign {
    /// Parse a position alignment keyword
    ///
    /// `auto` is the default and cannot be written explicitly.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "line-left" => Some(Self::LineLeft),
            "center" => Some(Self::Center),
            "line-right" => Some(Self::LineRight),
            _ => None,
        }
    }
}

/// Text alignment from the `align` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlign {
    Start,
    #[default]
    Center,
    End,
    Left,
    Right,
}

impl TextAlign {
    /// Parse an `align` value
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "start" => Some(Self::Start),
            "center" => Some(Self::Center),
            "end" => Some(Self::End),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Setting keyword for this alignment
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings a cue carries when its timing line omits them
pub const DEFAULT_CUE_SETTINGS: CueSettings = CueSettings {
    direction: WritingDirection::Horizontal,
    snap_to_lines: true,
    line_position: LinePosition::Auto,
    line_align: LineAlign::Start,
    text_position: TextPosition::Auto,
    position_align: PositionAlign::Auto,
    size: 100.0,
    alignment: TextAlign::Center,
};

/// Display settings of a single cue
///
/// # Examples
///
/// ```rust
/// use vtt_core::parser::ast::{CueSettings, LinePosition, TextAlign};
///
/// let settings = CueSettings::default();
/// assert!(settings.snap_to_lines);
/// assert_eq!(settings.line_position, LinePosition::Auto);
/// assert_eq!(settings.alignment, TextAlign::Center);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CueSettings {
    /// Writing direction
    pub direction: WritingDirection,

    /// Whether `line_position` counts lines (true) or is a percentage (false)
    pub snap_to_lines: bool,

    /// Line position
    pub line_position: LinePosition,

    /// Line alignment
    pub line_align: LineAlign,

    /// Text position
    pub text_position: TextPosition,

    /// Position alignment
    pub position_align: PositionAlign,

    /// Cue box size as a percentage, 0 to 100
    pub size: f64,

    /// Text alignment
    pub alignment: TextAlign,
}

impl Default for CueSettings {
    fn default() -> Self {
        DEFAULT_CUE_SETTINGS
    }
}

/// One timed caption entry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cue {
    /// Cue identifier, empty when the block has none
    pub id: String,

    /// Start of the cue
    pub start_time: Timestamp,

    /// End of the cue
    pub end_time: Timestamp,

    /// Pause playback when the cue ends
    pub pause_on_exit: bool,

    /// Display settings
    pub settings: CueSettings,

    /// Raw payload, lines joined with LF
    pub text: String,

    /// Payload parsed into markup
    pub tree: CueTree,

    /// A setting value was written in a form that would not be reproduced
    /// verbatim when the cue is written back out
    pub non_serializable: bool,
}

impl Cue {
    /// Create an empty cue with default settings
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start_time: Timestamp::ZERO,
            end_time: Timestamp::ZERO,
            pause_on_exit: false,
            settings: DEFAULT_CUE_SETTINGS,
            text: String::new(),
            tree: CueTree::default(),
            non_serializable: false,
        }
    }

    /// Cue duration in milliseconds, zero when the end is not after the start
    #[must_use]
    pub const fn duration_millis(&self) -> u64 {
        self.end_time
            .as_millis()
            .saturating_sub(self.start_time.as_millis())
    }
}

impl Default for Cue {
    fn default() -> Self {
        Self::new(String::new())
    }
}
