//! Ordered sequences stored in a position-keyed map.
//!
//! This module provides [`IndexedSequence`], a sequence that behaves
//! exactly like a conventional growable, zero-indexed sequence while
//! keeping its elements in a hash map from position to element:
//!
//! - [`IndexedSequence`]: the sequence itself
//! - [`Key`]: an integer position or a [`Slice`] descriptor
//! - [`IndexRange`]: a slice resolved against a concrete length
//! - [`Replacement`] / [`Selection`]: the value sides of `set` and `get`
//! - [`SequenceError`]: out-of-range, bad key type, length mismatch
//!
//! # Density
//!
//! The keys of the backing map are always exactly `0..len`. Every mutation
//! that changes the length re-keys the entries it displaces before it
//! returns, so no gap or stray key is ever observable.
//!
//! # Examples
//!
//! ## Integer keys
//!
//! ```rust
//! use listy::sequence::IndexedSequence;
//!
//! let mut sequence: IndexedSequence<char> = "abc".chars().collect();
//! assert_eq!(sequence.get_index(-1), Ok(&'c'));
//!
//! sequence.set_index(0, 'z').unwrap();
//! sequence.delete_index(1).unwrap();
//! assert_eq!(sequence, ['z', 'c']);
//! ```
//!
//! ## Slice keys
//!
//! ```rust
//! use listy::sequence::{IndexedSequence, Slice};
//!
//! let mut sequence: IndexedSequence<i32> = (0..10).collect();
//!
//! // [::3]
//! let every_third = Slice::new(None, None, Some(3)).unwrap();
//! assert_eq!(sequence.get_slice(every_third), [0, 3, 6, 9]);
//!
//! // [2:5] = [] removes a run
//! sequence.set_slice(Slice::range(2, 5), []).unwrap();
//! assert_eq!(sequence, [0, 1, 5, 6, 7, 8, 9]);
//!
//! // [:2] = [...] grows the sequence
//! sequence.set_slice(Slice::from(..2_isize), [-3, -2, -1]).unwrap();
//! assert_eq!(sequence, [-3, -2, -1, 5, 6, 7, 8, 9]);
//! ```

mod error;
mod indexed;
mod key;
mod protocol;
mod store;

pub use error::SequenceError;
pub use indexed::IndexedSequence;
pub use indexed::Replacement;
pub use indexed::Selection;
pub use key::IndexRange;
pub use key::IndexRangeIterator;
pub use key::Key;
pub use key::Slice;
pub use protocol::IndexedSequenceIntoIterator;
pub use protocol::IndexedSequenceIterator;
