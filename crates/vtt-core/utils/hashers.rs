//! Hash map construction with ahash
//!
//! The entity map is looked up once per escape in cue text, so it uses
//! ahash for fast string hashing. Under the `nostd` feature the map type
//! comes from `hashbrown` instead of `std::collections`.

use ahash::RandomState;

#[cfg(feature = "nostd")]
pub use hashbrown::HashMap as StdHashMap;
#[cfg(not(feature = "nostd"))]
pub use std::collections::HashMap as StdHashMap;

/// Hash map type used throughout vtt-rs
pub type HashMap<K, V> = StdHashMap<K, V, RandomState>;

/// Create a new `HashMap` with the ahash hasher
///
/// # Example
///
/// ```rust
/// use vtt_core::utils::hashers::create_hash_map;
///
/// let mut map = create_hash_map::<String, String>();
/// map.insert("&amp".to_string(), "&".to_string());
/// assert_eq!(map.len(), 1);
/// ```
#[must_use]
pub fn create_hash_map<K, V>() -> HashMap<K, V> {
    HashMap::with_hasher(RandomState::new())
}

/// Create a new `HashMap` with pre-allocated capacity
#[must_use]
pub fn create_hash_map_with_capacity<K, V>(capacity: usize) -> HashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, RandomState::new())
}
