//! Sequence backed by a sparse position map.
//!
//! This module provides [`IndexedSequence`], an ordered, zero-indexed,
//! growable sequence whose elements live in a hash map keyed by position
//! rather than in contiguous memory.
//!
//! # Overview
//!
//! Every observable behavior matches a conventional dynamically-sized
//! sequence: negative indices count from the end, slices may be empty,
//! stepped or reversed, unit-step slice assignment grows and shrinks the
//! sequence, and extended slice assignment requires an exact element count.
//!
//! After every public operation the keys of the backing map are exactly
//! `0..len`. Mutations that change the length re-key the affected entries
//! from a snapshot taken before any entry is written back.
//!
//! | Operation      | Key            | Effect                                      |
//! |----------------|----------------|---------------------------------------------|
//! | `get`          | index          | element at the position                     |
//! | `get`          | slice          | new sequence of the addressed elements      |
//! | `set`          | index          | overwrite, length unchanged                 |
//! | `set`          | unit slice     | replace the range, growing or shrinking     |
//! | `set`          | extended slice | overwrite each addressed position           |
//! | `delete`       | index          | remove, later elements move down by one     |
//! | `delete`       | slice          | remove addressed positions, compact         |
//! | `insert`       | position       | clamp, later elements move up by one        |
//!
//! # Examples
//!
//! ```rust
//! use listy::sequence::{IndexedSequence, Slice};
//! use std::num::NonZeroIsize;
//!
//! let mut sequence: IndexedSequence<i32> = vec![10, 20, 30, 40, 50].into();
//!
//! let step = NonZeroIsize::new(2).unwrap();
//! sequence.set_slice(Slice::stepped(1, 4, step), [99, 88]).unwrap();
//! assert_eq!(sequence, [10, 99, 30, 88, 50]);
//!
//! sequence.delete_slice(Slice::range(1, 4));
//! assert_eq!(sequence, [10, 50]);
//!
//! sequence.insert(0, 0);
//! assert_eq!(sequence.to_string(), "[0, 10, 50]");
//! ```

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

use log::{debug, trace};

use super::key::{IndexRange, Key, Slice, clamp_index, normalize_index};
use super::store::{self, Store};
use super::SequenceError;

// =============================================================================
// Replacement and Selection
// =============================================================================

/// The value side of [`IndexedSequence::set`].
///
/// A slice key takes any number of replacement elements; a [`Single`]
/// value is treated as a one-element sequence.
///
/// [`Single`]: Replacement::Single
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement<T> {
    /// A single element.
    Single(T),
    /// An ordered run of elements.
    Many(Vec<T>),
}

impl<T> Replacement<T> {
    /// Number of elements carried.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(values) => values.len(),
        }
    }

    /// Returns `true` if no element is carried.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts into the ordered replacement elements.
    #[must_use]
    pub fn into_values(self) -> Vec<T> {
        match self {
            Self::Single(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    fn into_single(self) -> Result<T, SequenceError> {
        match self {
            Self::Single(value) => Ok(value),
            Self::Many(values) => {
                let found = values.len();
                let mut values = values.into_iter();
                match (values.next(), values.next()) {
                    (Some(value), None) => Ok(value),
                    _ => Err(SequenceError::LengthMismatch { expected: 1, found }),
                }
            }
        }
    }
}

impl<T> From<Vec<T>> for Replacement<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

impl<T> FromIterator<T> for Replacement<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Many(iter.into_iter().collect())
    }
}

/// The result of [`IndexedSequence::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a, T> {
    /// The element at an integer key.
    Element(&'a T),
    /// A new sequence holding the elements addressed by a slice key.
    Slice(IndexedSequence<T>),
}

impl<'a, T> Selection<'a, T> {
    /// Returns the element, if an integer key produced this selection.
    #[must_use]
    pub const fn element(&self) -> Option<&'a T> {
        match self {
            Self::Element(element) => Some(*element),
            Self::Slice(_) => None,
        }
    }

    /// Returns the sub-sequence, if a slice key produced this selection.
    #[must_use]
    pub fn into_slice(self) -> Option<IndexedSequence<T>> {
        match self {
            Self::Element(_) => None,
            Self::Slice(sequence) => Some(sequence),
        }
    }
}

// =============================================================================
// IndexedSequence Definition
// =============================================================================

/// An ordered sequence stored as a position → element map.
///
/// # Time Complexity
///
/// | Operation        | Complexity          |
/// |------------------|---------------------|
/// | `len`            | O(1)                |
/// | `get_index`      | O(1) expected       |
/// | `set_index`      | O(1) expected       |
/// | `get_slice`      | O(k)                |
/// | `set_slice`      | O(N + k)            |
/// | `delete_index`   | O(N)                |
/// | `delete_slice`   | O(N log N)          |
/// | `insert`         | O(N)                |
///
/// # Examples
///
/// ```rust
/// use listy::sequence::{IndexedSequence, Key, Replacement, Selection, Slice};
///
/// let mut sequence: IndexedSequence<&str> = vec!["a", "b"].into();
/// sequence.insert(0, "x");
/// assert_eq!(sequence, ["x", "a", "b"]);
///
/// let reversed = sequence.get(Slice::reversed()).unwrap();
/// assert_eq!(reversed.into_slice().unwrap(), ["b", "a", "x"]);
///
/// sequence.set(Key::Index(-1), Replacement::Single("z")).unwrap();
/// assert_eq!(sequence.get(Key::Index(-1)).unwrap(), Selection::Element(&"z"));
/// ```
pub struct IndexedSequence<T> {
    pub(super) entries: Store<T>,
}

impl<T> IndexedSequence<T> {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty sequence with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: store::with_capacity(capacity),
        }
    }

    /// Number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] unless `-len <= index < len`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::IndexedSequence;
    ///
    /// let sequence: IndexedSequence<i32> = vec![1, 2, 3].into();
    /// assert_eq!(sequence.get_index(0), Ok(&1));
    /// assert_eq!(sequence.get_index(-1), Ok(&3));
    /// assert!(sequence.get_index(-4).is_err());
    /// ```
    pub fn get_index(&self, index: isize) -> Result<&T, SequenceError> {
        let length = self.len();
        let position = normalize_index(index, length)?;
        self.entries
            .get(&position)
            .ok_or(SequenceError::OutOfRange { index, length })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] unless `-len <= index < len`.
    pub fn get_index_mut(&mut self, index: isize) -> Result<&mut T, SequenceError> {
        let length = self.len();
        let position = normalize_index(index, length)?;
        self.entries
            .get_mut(&position)
            .ok_or(SequenceError::OutOfRange { index, length })
    }

    /// Overwrites the element at `index`, returning the previous element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] unless `-len <= index < len`.
    pub fn set_index(&mut self, index: isize, value: T) -> Result<T, SequenceError> {
        let slot = self.get_index_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Assigns `values` to the positions addressed by `slice`.
    ///
    /// A unit-step slice is replaced as a whole, so the sequence grows or
    /// shrinks when the counts differ; an empty unit-step slice inserts at
    /// its normalized start. An extended slice (step other than 1) is
    /// overwritten position by position and requires exactly one value per
    /// addressed position.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::LengthMismatch`] when an extended slice and
    /// `values` differ in length. The sequence is left unmodified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::{IndexedSequence, SequenceError, Slice};
    ///
    /// let mut sequence: IndexedSequence<i32> = vec![1, 2, 3].into();
    /// sequence.set_slice(Slice::range(1, 2), [7, 8, 9]).unwrap();
    /// assert_eq!(sequence, [1, 7, 8, 9, 3]);
    ///
    /// let result = sequence.set_slice(Slice::reversed(), [0]);
    /// assert_eq!(result, Err(SequenceError::LengthMismatch { expected: 5, found: 1 }));
    /// assert_eq!(sequence, [1, 7, 8, 9, 3]);
    /// ```
    pub fn set_slice<I>(&mut self, slice: Slice, values: I) -> Result<(), SequenceError>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        let range = slice.indices(self.len());

        if !slice.is_extended() {
            self.splice(range, values);
            return Ok(());
        }

        if values.len() != range.len() {
            debug!(
                "rejected assignment of {} elements to {slice} addressing {} positions",
                values.len(),
                range.len()
            );
            return Err(SequenceError::LengthMismatch {
                expected: range.len(),
                found: values.len(),
            });
        }

        for (position, value) in range.iter().zip(values) {
            self.entries.insert(position, value);
        }
        Ok(())
    }

    /// Assigns `value` at `key`.
    ///
    /// # Errors
    ///
    /// - [`SequenceError::OutOfRange`] for an integer key outside the sequence.
    /// - [`SequenceError::LengthMismatch`] for an extended slice whose length
    ///   differs from the replacement, or a multi-element replacement at an
    ///   integer key.
    pub fn set(&mut self, key: impl Into<Key>, value: Replacement<T>) -> Result<(), SequenceError> {
        match key.into() {
            Key::Index(index) => {
                normalize_index(index, self.len())?;
                let value = value.into_single()?;
                self.set_index(index, value).map(drop)
            }
            Key::Slice(slice) => self.set_slice(slice, value.into_values()),
        }
    }

    /// Removes and returns the element at `index`.
    ///
    /// Every later element moves down by one position.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] unless `-len <= index < len`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::IndexedSequence;
    ///
    /// let mut sequence: IndexedSequence<i32> = vec![1, 2, 3].into();
    /// assert_eq!(sequence.delete_index(-3), Ok(1));
    /// assert_eq!(sequence, [2, 3]);
    /// ```
    pub fn delete_index(&mut self, index: isize) -> Result<T, SequenceError> {
        let length = self.len();
        let position = normalize_index(index, length)?;
        let removed = self
            .entries
            .remove(&position)
            .ok_or(SequenceError::OutOfRange { index, length })?;
        self.reindex(position + 1, -1);
        Ok(removed)
    }

    /// Removes every element addressed by `slice`.
    ///
    /// Surviving elements keep their relative order and are renumbered to
    /// close the gaps. An empty slice is a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::{IndexedSequence, Slice};
    ///
    /// let mut sequence: IndexedSequence<i32> = (0..10).collect();
    /// sequence.delete_slice(Slice::new(None, None, Some(3)).unwrap());
    /// assert_eq!(sequence, [1, 2, 4, 5, 7, 8]);
    /// ```
    pub fn delete_slice(&mut self, slice: Slice) {
        let range = slice.indices(self.len());
        let Some(lowest) = range.min() else {
            return;
        };

        for position in range.iter() {
            self.entries.remove(&position);
        }

        let mut survivors: Vec<(usize, T)> = self
            .entries
            .extract_if(|position, _| *position > lowest)
            .collect();
        survivors.sort_unstable_by_key(|(position, _)| *position);

        trace!(
            "removed {} positions of {slice}, compacting {} entries from {lowest}",
            range.len(),
            survivors.len()
        );

        for (offset, (_, value)) in survivors.into_iter().enumerate() {
            self.entries.insert(lowest + offset, value);
        }
    }

    /// Removes the element or elements at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] for an integer key outside the
    /// sequence. Slice keys never fail.
    pub fn delete(&mut self, key: impl Into<Key>) -> Result<(), SequenceError> {
        match key.into() {
            Key::Index(index) => self.delete_index(index).map(drop),
            Key::Slice(slice) => {
                self.delete_slice(slice);
                Ok(())
            }
        }
    }

    /// Inserts `value` before `index`.
    ///
    /// A negative `index` counts from the end, and the result is clamped
    /// into `0..=len`, so inserting far past either end prepends or appends.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::IndexedSequence;
    ///
    /// let mut sequence: IndexedSequence<i32> = vec![1, 2].into();
    /// sequence.insert(-1, 9);
    /// sequence.insert(100, 3);
    /// sequence.insert(-100, 0);
    /// assert_eq!(sequence, [0, 1, 9, 2, 3]);
    /// ```
    pub fn insert(&mut self, index: isize, value: T) {
        let position = clamp_index(index, self.len());
        self.reindex(position, 1);
        self.entries.insert(position, value);
    }

    /// Compares against any type-erased value.
    ///
    /// `IndexedSequence<T>`, `Vec<T>`, `VecDeque<T>` and `Box<[T]>` compare
    /// element-wise; every other type is unequal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::IndexedSequence;
    ///
    /// let sequence: IndexedSequence<i32> = vec![1, 2].into();
    /// assert!(sequence.equals_any(&vec![1, 2]));
    /// assert!(!sequence.equals_any(&12));
    /// ```
    #[must_use]
    pub fn equals_any(&self, other: &dyn Any) -> bool
    where
        T: PartialEq + 'static,
    {
        if let Some(other) = other.downcast_ref::<Self>() {
            self == other
        } else if let Some(other) = other.downcast_ref::<Vec<T>>() {
            self == other
        } else if let Some(other) = other.downcast_ref::<VecDeque<T>>() {
            self == other
        } else if let Some(other) = other.downcast_ref::<Box<[T]>>() {
            self.equals(other)
        } else {
            false
        }
    }

    /// Element-wise comparison against a slice of comparable elements.
    #[must_use]
    pub fn equals<U>(&self, other: &[U]) -> bool
    where
        T: PartialEq<U>,
    {
        self.len() == other.len() && self.iter().zip(other).all(|(left, right)| left == right)
    }

    /// Replaces the positions of a unit-step `range` with `values`.
    ///
    /// Entries past the replaced run move by the difference in counts
    /// before the new values are written.
    pub(super) fn splice(&mut self, range: IndexRange, values: Vec<T>) {
        let start = usize::try_from(range.start()).unwrap_or_default();
        let removed = range.len();

        for position in range.iter() {
            self.entries.remove(&position);
        }

        if values.len() != removed {
            let delta = values.len().cast_signed() - removed.cast_signed();
            self.reindex(start + removed, delta);
        }

        for (offset, value) in values.into_iter().enumerate() {
            self.entries.insert(start + offset, value);
        }
    }

    /// Moves every entry at or beyond `from` by `delta` positions.
    fn reindex(&mut self, from: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        let moved: Vec<(usize, T)> = self
            .entries
            .extract_if(|position, _| *position >= from)
            .collect();
        if moved.is_empty() {
            return;
        }
        trace!("re-keying {} entries from {from} by {delta}", moved.len());
        for (position, value) in moved {
            self.entries
                .insert(position.saturating_add_signed(delta), value);
        }
    }
}

impl<T: Clone> IndexedSequence<T> {
    /// Returns a new sequence with the elements addressed by `slice`.
    ///
    /// Elements appear in progression order, so a negative step yields them
    /// reversed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::{IndexedSequence, Slice};
    ///
    /// let sequence: IndexedSequence<i32> = (0..6).collect();
    /// let odd = sequence.get_slice(Slice::new(Some(1), None, Some(2)).unwrap());
    /// assert_eq!(odd, [1, 3, 5]);
    /// ```
    #[must_use]
    pub fn get_slice(&self, slice: Slice) -> Self {
        let range = slice.indices(self.len());
        let mut selected = Self::with_capacity(range.len());
        let values = range
            .iter()
            .filter_map(|position| self.entries.get(&position).cloned())
            .collect();
        selected.splice(Slice::full().indices(0), values);
        selected
    }

    /// Returns the element or sub-sequence at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] for an integer key outside the
    /// sequence. Slice keys never fail.
    pub fn get(&self, key: impl Into<Key>) -> Result<Selection<'_, T>, SequenceError> {
        match key.into() {
            Key::Index(index) => self.get_index(index).map(Selection::Element),
            Key::Slice(slice) => Ok(Selection::Slice(self.get_slice(slice))),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for IndexedSequence<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for IndexedSequence<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T, U> PartialEq<IndexedSequence<U>> for IndexedSequence<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &IndexedSequence<U>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }
}

impl<T: Eq> Eq for IndexedSequence<T> {}

impl<T, U> PartialEq<[U]> for IndexedSequence<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.equals(other)
    }
}

impl<T, U> PartialEq<&[U]> for IndexedSequence<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.equals(other)
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for IndexedSequence<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.equals(other)
    }
}

impl<T, U> PartialEq<Vec<U>> for IndexedSequence<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self.equals(other)
    }
}

impl<T, U> PartialEq<VecDeque<U>> for IndexedSequence<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &VecDeque<U>) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(left, right)| left == right)
    }
}

impl<T, U> PartialEq<IndexedSequence<U>> for Vec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &IndexedSequence<U>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }
}

impl<T, U> PartialEq<IndexedSequence<U>> for [T]
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &IndexedSequence<U>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }
}

impl<T, U, const N: usize> PartialEq<IndexedSequence<U>> for [T; N]
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &IndexedSequence<U>) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<IndexedSequence<U>> for VecDeque<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &IndexedSequence<U>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }
}

/// Renders the elements as a list literal, `[e0, e1, ...]`.
impl<T: fmt::Debug> fmt::Display for IndexedSequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for IndexedSequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::num::NonZeroIsize;

    fn sequence<T: Clone>(elements: &[T]) -> IndexedSequence<T> {
        elements.iter().cloned().collect()
    }

    fn stepped(start: Option<isize>, stop: Option<isize>, step: isize) -> Slice {
        Slice::new(start, stop, Some(step)).unwrap()
    }

    fn assert_dense<T>(sequence: &IndexedSequence<T>) {
        let mut keys: Vec<usize> = sequence.entries.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..sequence.len()).collect::<Vec<_>>());
    }

    // =========================================================================
    // get
    // =========================================================================

    #[rstest]
    #[case(0, 10)]
    #[case(4, 50)]
    #[case(-1, 50)]
    #[case(-5, 10)]
    fn test_get_index(#[case] index: isize, #[case] expected: i32) {
        let sequence = sequence(&[10, 20, 30, 40, 50]);
        assert_eq!(sequence.get_index(index), Ok(&expected));
    }

    #[rstest]
    #[case(5)]
    #[case(-6)]
    fn test_get_index_out_of_range(#[case] index: isize) {
        let sequence = sequence(&[10, 20, 30, 40, 50]);
        assert_eq!(
            sequence.get_index(index),
            Err(SequenceError::OutOfRange { index, length: 5 })
        );
    }

    #[rstest]
    fn test_get_dispatches_on_key() {
        let sequence = sequence(&[1, 2, 3]);
        assert_eq!(sequence.get(Key::Index(1)).unwrap().element(), Some(&2));
        let selected = sequence.get(1_isize..).unwrap().into_slice().unwrap();
        assert_eq!(selected, [2, 3]);
        assert_dense(&selected);
    }

    #[rstest]
    fn test_get_slice_negative_step_reverses() {
        let sequence = sequence(&[1, 2, 3, 4, 5]);
        assert_eq!(sequence.get_slice(stepped(Some(3), None, -2)), [4, 2]);
        assert_eq!(sequence.get_slice(Slice::reversed()), [5, 4, 3, 2, 1]);
    }

    #[rstest]
    fn test_get_slice_empty() {
        let sequence = sequence(&[1, 2, 3]);
        assert!(sequence.get_slice(Slice::range(2, 1)).is_empty());
        assert!(IndexedSequence::<i32>::new().get_slice(Slice::full()).is_empty());
    }

    // =========================================================================
    // set
    // =========================================================================

    #[rstest]
    fn test_set_index_returns_previous() {
        let mut sequence = sequence(&[1, 2, 3]);
        assert_eq!(sequence.set_index(-1, 9), Ok(3));
        assert_eq!(sequence, [1, 2, 9]);
        assert_eq!(
            sequence.set_index(3, 0),
            Err(SequenceError::OutOfRange { index: 3, length: 3 })
        );
    }

    #[rstest]
    fn test_set_extended_slice() {
        let mut sequence = sequence(&[10, 20, 30, 40, 50]);
        let step = NonZeroIsize::new(2).unwrap();
        sequence.set_slice(Slice::stepped(1, 4, step), [99, 88]).unwrap();
        assert_eq!(sequence, [10, 99, 30, 88, 50]);
        assert_dense(&sequence);
    }

    #[rstest]
    fn test_set_unit_slice_grows() {
        let mut sequence = sequence(&[1, 2, 3]);
        sequence.set_slice(Slice::range(1, 2), [7, 8, 9]).unwrap();
        assert_eq!(sequence, [1, 7, 8, 9, 3]);
        assert_dense(&sequence);
    }

    #[rstest]
    fn test_set_unit_slice_shrinks() {
        let mut sequence = sequence(&[1, 2, 3, 4, 5]);
        sequence.set_slice(Slice::range(1, 4), [0]).unwrap();
        assert_eq!(sequence, [1, 0, 5]);
        assert_dense(&sequence);
    }

    #[rstest]
    fn test_set_unit_slice_empty_values_deletes() {
        let mut sequence = sequence(&[1, 2, 3, 4, 5]);
        sequence.set_slice(Slice::range(-2, 100), []).unwrap();
        assert_eq!(sequence, [1, 2, 3]);
        assert_dense(&sequence);
    }

    #[rstest]
    fn test_set_inverted_unit_slice_inserts_at_start() {
        let mut sequence = sequence(&[1, 2, 3]);
        sequence.set_slice(Slice::range(2, 0), [9]).unwrap();
        assert_eq!(sequence, [1, 2, 9, 3]);
        assert_dense(&sequence);
    }

    #[rstest]
    fn test_set_slice_past_end_appends() {
        let mut sequence = sequence(&[1, 2]);
        sequence.set_slice(Slice::range(10, 20), [3, 4]).unwrap();
        assert_eq!(sequence, [1, 2, 3, 4]);
        assert_dense(&sequence);
    }

    #[rstest]
    fn test_set_full_slice_on_empty_builds() {
        let mut sequence = IndexedSequence::new();
        sequence.set_slice(Slice::full(), ["a", "b"]).unwrap();
        assert_eq!(sequence, ["a", "b"]);
    }

    #[rstest]
    #[case(stepped(None, None, 2), vec![0, 0])]
    #[case(stepped(None, None, -1), vec![0; 6])]
    #[case(stepped(Some(4), Some(0), -2), vec![])]
    fn test_set_extended_slice_mismatch_leaves_sequence(
        #[case] slice: Slice,
        #[case] values: Vec<i32>,
    ) {
        let mut sequence = sequence(&[1, 2, 3, 4, 5]);
        let expected = slice.indices(5).len();
        let found = values.len();
        assert_eq!(
            sequence.set_slice(slice, values),
            Err(SequenceError::LengthMismatch { expected, found })
        );
        assert_eq!(sequence, [1, 2, 3, 4, 5]);
    }

    #[rstest]
    fn test_set_reversed_slice() {
        let mut sequence = sequence(&[1, 2, 3]);
        sequence.set_slice(Slice::reversed(), [7, 8, 9]).unwrap();
        assert_eq!(sequence, [9, 8, 7]);
    }

    #[rstest]
    fn test_set_empty_extended_slice_with_no_values() {
        let mut sequence = sequence(&[1, 2, 3]);
        sequence.set_slice(stepped(Some(0), Some(0), 2), []).unwrap();
        assert_eq!(sequence, [1, 2, 3]);
    }

    #[rstest]
    fn test_set_single_replacement_on_slice() {
        let mut sequence = sequence(&[1, 2, 3]);
        sequence.set(Slice::range(0, 2), Replacement::Single(0)).unwrap();
        assert_eq!(sequence, [0, 3]);
    }

    #[rstest]
    fn test_set_index_with_replacements() {
        let mut sequence = sequence(&[1, 2, 3]);
        sequence.set(Key::Index(0), Replacement::Many(vec![7])).unwrap();
        assert_eq!(sequence, [7, 2, 3]);
        assert_eq!(
            sequence.set(Key::Index(0), Replacement::Many(vec![1, 2])),
            Err(SequenceError::LengthMismatch { expected: 1, found: 2 })
        );
        assert_eq!(
            sequence.set(Key::Index(5), Replacement::Many(vec![1, 2])),
            Err(SequenceError::OutOfRange { index: 5, length: 3 })
        );
    }

    // =========================================================================
    // delete
    // =========================================================================

    #[rstest]
    fn test_delete_index_negative_uses_normalized_position() {
        let mut sequence = sequence(&[1, 2, 3, 4]);
        assert_eq!(sequence.delete_index(-2), Ok(3));
        assert_eq!(sequence, [1, 2, 4]);
        assert_dense(&sequence);
    }

    #[rstest]
    fn test_delete_index_out_of_range() {
        let mut sequence = sequence(&[1, 2, 3]);
        assert_eq!(
            sequence.delete_index(-4),
            Err(SequenceError::OutOfRange { index: -4, length: 3 })
        );
        assert_eq!(sequence, [1, 2, 3]);
    }

    #[rstest]
    fn test_delete_unit_slice() {
        let mut sequence = sequence(&[1, 2, 3, 4, 5]);
        sequence.delete(Slice::range(1, 4)).unwrap();
        assert_eq!(sequence, [1, 5]);
        assert_dense(&sequence);
    }

    #[rstest]
    #[case(stepped(None, None, 2), vec![2, 4])]
    #[case(stepped(None, None, -2), vec![2, 4])]
    #[case(stepped(Some(-1), Some(0), -3), vec![1, 3, 4])]
    #[case(Slice::reversed(), vec![])]
    #[case(Slice::range(3, 1), vec![1, 2, 3, 4, 5])]
    fn test_delete_extended_slice(#[case] slice: Slice, #[case] expected: Vec<i32>) {
        let mut sequence = sequence(&[1, 2, 3, 4, 5]);
        sequence.delete_slice(slice);
        assert_eq!(sequence, expected);
        assert_dense(&sequence);
    }

    // =========================================================================
    // insert
    // =========================================================================

    #[rstest]
    fn test_insert_front() {
        let mut sequence = sequence(&["a", "b"]);
        sequence.insert(0, "x");
        assert_eq!(sequence, ["x", "a", "b"]);
        assert_dense(&sequence);
    }

    #[rstest]
    #[case(2, vec![1, 2, 0])]
    #[case(99, vec![1, 2, 0])]
    #[case(-1, vec![1, 0, 2])]
    #[case(-99, vec![0, 1, 2])]
    fn test_insert_clamps(#[case] index: isize, #[case] expected: Vec<i32>) {
        let mut sequence = sequence(&[1, 2]);
        sequence.insert(index, 0);
        assert_eq!(sequence, expected);
        assert_dense(&sequence);
    }

    // =========================================================================
    // Equality and Formatting
    // =========================================================================

    #[rstest]
    fn test_equality_is_symmetric() {
        let sequence = sequence(&[1, 2, 3]);
        let vector = vec![1, 2, 3];
        assert_eq!(sequence, vector);
        assert_eq!(vector, sequence);
        assert_eq!([1, 2, 3], sequence);
        assert_ne!(sequence, [1, 2]);
        assert_ne!(sequence, [1, 2, 4]);
        assert_eq!(VecDeque::from(vec![1, 2, 3]), sequence);
    }

    #[rstest]
    fn test_equals_any_rejects_non_sequences() {
        let sequence = sequence(&[1, 2]);
        assert!(sequence.equals_any(&sequence.clone()));
        assert!(sequence.equals_any(&vec![1, 2].into_boxed_slice()));
        assert!(!sequence.equals_any(&"[1, 2]"));
        assert!(!sequence.equals_any(&vec![1_i64, 2]));
    }

    #[rstest]
    fn test_display_and_debug() {
        let sequence = sequence(&["a", "b"]);
        assert_eq!(sequence.to_string(), r#"["a", "b"]"#);
        assert_eq!(format!("{sequence:?}"), r#"["a", "b"]"#);
        assert_eq!(IndexedSequence::<i32>::new().to_string(), "[]");
    }
}
