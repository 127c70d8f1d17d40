//! Millisecond-precision timestamp value
//!
//! Cue start and end times and in-cue timestamp tags are all stored as
//! [`Timestamp`]. The value only supports comparison and conversion; it is
//! never used for arithmetic on cue timelines.

use core::{fmt, str::FromStr};

use crate::{parser::timing, utils::CoreError};

/// Point in a media timeline with millisecond precision
///
/// # Examples
///
/// ```rust
/// use vtt_core::Timestamp;
///
/// let ts: Timestamp = "01:02:03.004".parse()?;
/// assert_eq!(ts.as_millis(), 3_723_004);
/// assert_eq!(ts.to_string(), "01:02:03.004");
///
/// let short: Timestamp = "02:03.004".parse()?;
/// assert_eq!(short.hours(), 0);
/// assert!(short < ts);
/// # Ok::<(), vtt_core::CoreError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u64);

impl Timestamp {
    /// Start of the timeline
    pub const ZERO: Self = Self(0);

    const MILLIS_PER_SECOND: u64 = 1_000;
    const MILLIS_PER_MINUTE: u64 = 60 * Self::MILLIS_PER_SECOND;
    const MILLIS_PER_HOUR: u64 = 60 * Self::MILLIS_PER_MINUTE;

    /// Create a timestamp from whole milliseconds
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Create a timestamp from its components
    ///
    /// Returns `None` when the total does not fit the value range. Minutes,
    /// seconds and milliseconds are not range-checked here.
    #[must_use]
    pub const fn from_parts(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<Self> {
        let parts = [
            (hours, Self::MILLIS_PER_HOUR),
            (minutes, Self::MILLIS_PER_MINUTE),
            (seconds, Self::MILLIS_PER_SECOND),
            (millis, 1),
        ];

        let mut total: u64 = 0;
        let mut index = 0;
        while index < parts.len() {
            let (value, scale) = parts[index];
            let Some(scaled) = value.checked_mul(scale) else {
                return None;
            };
            let Some(sum) = total.checked_add(scaled) else {
                return None;
            };
            total = sum;
            index += 1;
        }
        Some(Self(total))
    }

    /// Total milliseconds since the start of the timeline
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Fractional seconds since the start of the timeline
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Hours component
    #[must_use]
    pub const fn hours(self) -> u64 {
        self.0 / Self::MILLIS_PER_HOUR
    }

    /// Minutes component (0-59)
    #[must_use]
    pub const fn minutes(self) -> u64 {
        (self.0 % Self::MILLIS_PER_HOUR) / Self::MILLIS_PER_MINUTE
    }

    /// Seconds component (0-59)
    #[must_use]
    pub const fn seconds(self) -> u64 {
        (self.0 % Self::MILLIS_PER_MINUTE) / Self::MILLIS_PER_SECOND
    }

    /// Milliseconds component (0-999)
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0 % Self::MILLIS_PER_SECOND
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.millis()
        )
    }
}

impl FromStr for Timestamp {
    type Err = CoreError;

    /// Parse a standalone timestamp, rejecting trailing characters
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = timing::parse_timestamp(s);
        match (parsed.value, parsed.issues.first()) {
            (Some(timestamp), None) => Ok(timestamp),
            (_, Some(issue)) => Err(CoreError::invalid_time(s, issue.message())),
            (None, None) => Err(CoreError::invalid_time(s, "No timestamp found.")),
        }
    }
}
