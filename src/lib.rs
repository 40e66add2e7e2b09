//! # listy
//!
//! A reference sequence type that stores its elements in a sparse
//! position → element map instead of contiguous memory.
//!
//! ## Overview
//!
//! [`IndexedSequence`](sequence::IndexedSequence) behaves exactly like a
//! conventional growable, zero-indexed sequence. It is meant as a
//! correctness oracle rather than a fast container:
//!
//! - **Indexing**: integer keys, negative keys counting from the end
//! - **Slicing**: `(start, stop, step)` descriptors with optional bounds,
//!   negative and non-unit steps
//! - **Mutation**: slice assignment that grows or shrinks, extended slice
//!   assignment, deletion, insertion
//! - **Protocol**: iteration, equality against standard sequences,
//!   list-literal display
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` as a plain sequence
//! - `fxhash`: back the position map with `rustc-hash`
//! - `ahash`: back the position map with `ahash`
//!
//! ## Example
//!
//! ```rust
//! use listy::prelude::*;
//!
//! let mut sequence: IndexedSequence<i32> = vec![1, 2, 3, 4, 5].into();
//! sequence.delete(Slice::range(1, 4)).unwrap();
//! assert_eq!(sequence, [1, 5]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use listy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::sequence::*;
}

pub mod sequence;
