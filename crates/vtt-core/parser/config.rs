//! Parser configuration
//!
//! [`ParserConfig`] selects the [`ParseMode`] and the escapes available to
//! cue text. Both are fixed for the duration of a parse.

use core::{fmt, str::FromStr};

use crate::{tokenizer::EntityMap, utils::CoreError};

/// How cue payloads are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseMode {
    /// Captions and subtitles
    #[default]
    Standard,
    /// Metadata tracks: payload diagnostics are suppressed
    Metadata,
    /// Chapter titles: markup and timestamps are reported
    Chapters,
}

impl ParseMode {
    /// Mode name as accepted by [`FromStr`], empty for standard
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "",
            Self::Metadata => "metadata",
            Self::Chapters => "chapters",
        }
    }
}

impl FromStr for ParseMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Standard),
            "metadata" => Ok(Self::Metadata),
            "chapters" => Ok(Self::Chapters),
            other => Err(CoreError::invalid_mode(other)),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parser configuration
///
/// # Examples
///
/// ```rust
/// use vtt_core::{EntityMap, ParseMode, ParserConfig};
///
/// let mut entities = EntityMap::new();
/// entities.insert("&hellip", "\u{2026}")?;
///
/// let config = ParserConfig::default()
///     .with_mode("chapters".parse()?)
///     .with_entities(entities);
///
/// assert_eq!(config.mode(), ParseMode::Chapters);
/// assert_eq!(config.entities().get("&hellip"), Some("\u{2026}"));
/// # Ok::<(), vtt_core::CoreError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    mode: ParseMode,
    entities: EntityMap,
}

impl ParserConfig {
    /// Default configuration: standard mode and the default escapes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parsing mode
    #[must_use]
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the escapes available to cue text
    ///
    /// An empty map keeps the default escapes.
    #[must_use]
    pub fn with_entities(mut self, entities: EntityMap) -> Self {
        self.entities = if entities.is_empty() {
            EntityMap::default()
        } else {
            entities
        };
        self
    }

    /// Configure the mode from its textual name
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidMode`] for anything other than `""`,
    /// `"metadata"` or `"chapters"`.
    pub fn with_mode_name(self, mode: &str) -> crate::Result<Self> {
        Ok(self.with_mode(mode.parse()?))
    }

    /// Parsing mode
    #[must_use]
    pub const fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Escapes available to cue text
    #[must_use]
    pub const fn entities(&self) -> &EntityMap {
        &self.entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn mode_names_roundtrip() {
        for mode in [ParseMode::Standard, ParseMode::Metadata, ParseMode::Chapters] {
            assert_eq!(mode.to_string().parse::<ParseMode>(), Ok(mode));
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert_eq!(
            "Chapters".parse::<ParseMode>(),
            Err(CoreError::InvalidMode("Chapters".to_string()))
        );
        assert!(ParserConfig::new().with_mode_name("subtitles").is_err());
    }

    #[test]
    fn empty_entity_map_falls_back_to_defaults() {
        let config = ParserConfig::new().with_entities(EntityMap::new());
        assert_eq!(config.entities().get("&amp"), Some("&"));
    }
}
