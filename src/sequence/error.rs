//! Error type for [`IndexedSequence`](super::IndexedSequence) operations.
//!
//! Every fallible operation reports one of the [`SequenceError`] kinds.
//! Errors are raised before any entry is touched, so a failed operation
//! leaves the sequence exactly as it was.

use std::error::Error;
use std::fmt;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when indexing or mutating an `IndexedSequence`.
///
/// # Examples
///
/// ```rust
/// use listy::sequence::{IndexedSequence, SequenceError};
///
/// let sequence: IndexedSequence<i32> = vec![1, 2, 3].into();
/// assert_eq!(
///     sequence.get_index(3),
///     Err(SequenceError::OutOfRange { index: 3, length: 3 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// An integer key fell outside `-length..length`.
    OutOfRange {
        /// The key as requested, before normalization.
        index: isize,
        /// The length of the sequence at the time of the request.
        length: usize,
    },

    /// A type-erased key was neither an integer nor a slice.
    InvalidKeyType {
        /// Name of the offending type.
        type_name: &'static str,
    },

    /// An extended slice assignment supplied the wrong number of elements.
    ///
    /// Also reported when a multi-element replacement targets a single
    /// integer position.
    LengthMismatch {
        /// Number of positions addressed by the key.
        expected: usize,
        /// Number of replacement elements supplied.
        found: usize,
    },

    /// A slice was built with a step of zero.
    ZeroStep,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, length } => {
                write!(
                    formatter,
                    "sequence index {index} out of range for length {length}"
                )
            }
            Self::InvalidKeyType { type_name } => {
                write!(
                    formatter,
                    "sequence indices must be integers or slices, not {type_name}"
                )
            }
            Self::LengthMismatch { expected, found } => {
                write!(
                    formatter,
                    "attempt to assign sequence of size {found} to extended slice of size {expected}"
                )
            }
            Self::ZeroStep => write!(formatter, "slice step cannot be zero"),
        }
    }
}

impl Error for SequenceError {}
