//! Hasher selection for the backing position map.
//!
//! The map is keyed by positions only, so the hasher never affects the
//! observable order of a sequence. The `fxhash` and `ahash` features swap
//! in a faster hasher; `fxhash` takes precedence when both are enabled.

use std::collections::HashMap;

#[cfg(feature = "fxhash")]
pub(crate) type StoreHasher = rustc_hash::FxBuildHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub(crate) type StoreHasher = ahash::RandomState;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) type StoreHasher = std::collections::hash_map::RandomState;

/// Position → element map backing an `IndexedSequence`.
pub(crate) type Store<T> = HashMap<usize, T, StoreHasher>;

/// Creates an empty store with room for `capacity` entries.
pub(crate) fn with_capacity<T>(capacity: usize) -> Store<T> {
    HashMap::with_capacity_and_hasher(capacity, StoreHasher::default())
}
