//! Character escapes in cue text
//!
//! An [`EntityMap`] maps escape names such as `&amp` (leading `&`, no
//! trailing `;`) to their replacement text. Besides named escapes the
//! resolver understands decimal (`&#38;`) and hexadecimal (`&#x26;`)
//! character references.
//!
//! # Example
//!
//! ```rust
//! use vtt_core::EntityMap;
//!
//! let mut entities = EntityMap::default();
//! entities.insert("&copy", "\u{A9}")?;
//!
//! assert_eq!(entities.resolve("&copy").as_deref(), Some("\u{A9}"));
//! assert_eq!(entities.resolve("&#x41").as_deref(), Some("A"));
//! assert_eq!(entities.resolve("&ampx").as_deref(), Some("&x;"));
//! assert_eq!(entities.resolve("&bogus"), None);
//! # Ok::<(), vtt_core::CoreError>(())
//! ```

use alloc::{
    format,
    string::{String, ToString},
};

use crate::{
    utils::{create_hash_map_with_capacity, CoreError, HashMap},
    Result,
};

/// Escapes recognized when no custom map is supplied
pub const DEFAULT_ENTITIES: [(&str, &str); 6] = [
    ("&amp", "&"),
    ("&lt", "<"),
    ("&gt", ">"),
    ("&lrm", "\u{200E}"),
    ("&rlm", "\u{200F}"),
    ("&nbsp", "\u{A0}"),
];

/// Mapping from escape name to replacement text
///
/// Immutable while a parse runs; one map can be shared between parsers.
#[derive(Debug, Clone)]
pub struct EntityMap {
    entries: HashMap<String, String>,
}

impl EntityMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: create_hash_map_with_capacity(DEFAULT_ENTITIES.len()),
        }
    }

    /// Add or replace an escape
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidEntity`] when the key does not start with
    /// `&`, is a bare `&`, or contains `;`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>> {
        let key = key.into();
        validate_key(&key)?;
        Ok(self.entries.insert(key, value.into()))
    }

    /// Replacement text for an exact escape name
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Longest escape name that is a prefix of `text`
    ///
    /// Returns the matched name together with its replacement.
    #[must_use]
    pub fn longest_prefix(&self, text: &str) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .filter(|(key, _)| text.starts_with(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of escapes in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no escapes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an escape terminated by `;`
    ///
    /// Tries a character reference, then an exact name, then the longest
    /// name that prefixes the buffer; the unmatched rest of the buffer and
    /// the `;` are kept literally. `None` means the escape is incorrect.
    #[must_use]
    pub fn resolve(&self, buffer: &str) -> Option<String> {
        if let Some(ch) = character_reference(buffer) {
            return Some(ch.to_string());
        }
        if let Some(value) = self.get(buffer) {
            return Some(value.to_string());
        }
        self.longest_prefix(buffer)
            .map(|(key, value)| format!("{value}{};", &buffer[key.len()..]))
    }

    /// Resolve an escape cut off by `<` or the end of the payload
    ///
    /// Only character references and exact names are considered.
    #[must_use]
    pub fn resolve_unterminated(&self, buffer: &str) -> Option<String> {
        character_reference(buffer)
            .map(|ch| ch.to_string())
            .or_else(|| self.get(buffer).map(ToString::to_string))
    }
}

impl Default for EntityMap {
    fn default() -> Self {
        let mut entries = create_hash_map_with_capacity(DEFAULT_ENTITIES.len());
        for (key, value) in DEFAULT_ENTITIES {
            entries.insert(key.to_string(), value.to_string());
        }
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EntityMap {
    /// Collect escapes, skipping keys that cannot be used as escapes
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            if let Err(err) = map.insert(key, value) {
                log::warn!("skipping entity: {err}");
            }
        }
        map
    }
}

fn validate_key(key: &str) -> Result<()> {
    if !key.starts_with('&') {
        return Err(CoreError::invalid_entity(key, "must start with '&'"));
    }
    if key.len() == 1 {
        return Err(CoreError::invalid_entity(key, "must name an escape after '&'"));
    }
    if key.contains(';') {
        return Err(CoreError::invalid_entity(key, "must not contain ';'"));
    }
    Ok(())
}

/// Decode `&#NNN` or `&#xHHH`
///
/// NUL, surrogates and values beyond the Unicode range decode to U+FFFD.
fn character_reference(buffer: &str) -> Option<char> {
    let reference = buffer.strip_prefix("&#")?;
    let (digits, radix) = match reference.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (reference, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let decoded = u32::from_str_radix(digits, radix)
        .ok()
        .filter(|&code| code != 0)
        .and_then(char::from_u32);
    Some(decoded.unwrap_or(char::REPLACEMENT_CHARACTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let entities = EntityMap::default();
        assert_eq!(entities.len(), 6);
        assert_eq!(entities.get("&amp"), Some("&"));
        assert_eq!(entities.get("&lrm"), Some("\u{200E}"));
        assert_eq!(entities.get("&nbsp"), Some("\u{A0}"));
        assert_eq!(entities.get("&amp;"), None);
    }

    #[test]
    fn insert_validates_keys() {
        let mut entities = EntityMap::new();
        assert!(entities.is_empty());
        assert!(entities.insert("amp", "&").is_err());
        assert!(entities.insert("&", "&").is_err());
        assert!(entities.insert("&amp;", "&").is_err());
        assert_eq!(entities.insert("&hellip", "\u{2026}"), Ok(None));
        assert_eq!(
            entities.insert("&hellip", "..."),
            Ok(Some("\u{2026}".to_string()))
        );
    }

    #[test]
    fn longest_prefix_prefers_longer_names() {
        let entities: EntityMap = [("&a", "1"), ("&ab", "2")].into_iter().collect();
        assert_eq!(entities.longest_prefix("&abc"), Some(("&ab", "2")));
        assert_eq!(entities.longest_prefix("&ax"), Some(("&a", "1")));
        assert_eq!(entities.longest_prefix("&x"), None);
    }

    #[test]
    fn from_iter_skips_invalid_keys() {
        let entities: EntityMap = [("&ok", "1"), ("bad", "2")].into_iter().collect();
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn numeric_references() {
        assert_eq!(character_reference("&#65"), Some('A'));
        assert_eq!(character_reference("&#x41"), Some('A'));
        assert_eq!(character_reference("&#X2014"), Some('\u{2014}'));
        assert_eq!(character_reference("&#0"), Some('\u{FFFD}'));
        assert_eq!(character_reference("&#xD800"), Some('\u{FFFD}'));
        assert_eq!(character_reference("&#99999999999"), Some('\u{FFFD}'));
        assert_eq!(character_reference("&#"), None);
        assert_eq!(character_reference("&#xZZ"), None);
        assert_eq!(character_reference("&amp"), None);
    }

    #[test]
    fn resolve_order() {
        let entities = EntityMap::default();
        assert_eq!(entities.resolve("&lt").as_deref(), Some("<"));
        assert_eq!(entities.resolve("&#38").as_deref(), Some("&"));
        assert_eq!(entities.resolve("&ltx").as_deref(), Some("<x;"));
        assert_eq!(entities.resolve("&unknown"), None);
    }

    #[test]
    fn unterminated_skips_prefix_match() {
        let entities = EntityMap::default();
        assert_eq!(entities.resolve_unterminated("&amp").as_deref(), Some("&"));
        assert_eq!(entities.resolve_unterminated("&ampx"), None);
        assert_eq!(entities.resolve_unterminated("&#65").as_deref(), Some("A"));
    }
}
