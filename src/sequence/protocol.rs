//! Sequence-protocol conveniences for [`IndexedSequence`].
//!
//! Everything here is layered on the core operations: appending and
//! extending assign at the empty slice past the end, popping deletes by
//! index, and construction assigns the full slice of an empty sequence.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::{Add, AddAssign};

use super::key::Slice;
use super::store::Store;
use super::{IndexedSequence, SequenceError};

static_assertions::assert_impl_all!(IndexedSequence<i32>: Send, Sync, Clone, Default);

// =============================================================================
// Sequence Operations
// =============================================================================

impl<T> IndexedSequence<T> {
    /// Returns an iterator over the elements in position order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::IndexedSequence;
    ///
    /// let sequence: IndexedSequence<i32> = vec![1, 2, 3].into();
    /// let doubled: Vec<i32> = sequence.iter().map(|element| element * 2).collect();
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> IndexedSequenceIterator<'_, T> {
        IndexedSequenceIterator {
            entries: &self.entries,
            front: 0,
            back: self.len(),
        }
    }

    /// Returns the first element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get_index(0).ok()
    }

    /// Returns the last element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.get_index(-1).ok()
    }

    /// Appends `value` to the end.
    pub fn push(&mut self, value: T) {
        self.splice(Self::end().indices(self.len()), vec![value]);
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::OutOfRange`] unless `-len <= index < len`.
    pub fn pop(&mut self, index: isize) -> Result<T, SequenceError> {
        self.delete_index(index)
    }

    /// Removes and returns the last element, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        self.delete_index(-1).ok()
    }

    /// Returns `true` if some element equals `value`.
    #[must_use]
    pub fn contains<U>(&self, value: &U) -> bool
    where
        T: PartialEq<U>,
    {
        self.iter().any(|element| element == value)
    }

    /// Position of the first element equal to `value`.
    #[must_use]
    pub fn index_of<U>(&self, value: &U) -> Option<usize>
    where
        T: PartialEq<U>,
    {
        self.iter().position(|element| element == value)
    }

    /// Number of elements equal to `value`.
    #[must_use]
    pub fn count<U>(&self, value: &U) -> usize
    where
        T: PartialEq<U>,
    {
        self.iter().filter(|element| *element == value).count()
    }

    /// Removes and returns the first element equal to `value`.
    pub fn remove_first<U>(&mut self, value: &U) -> Option<T>
    where
        T: PartialEq<U>,
    {
        let position = self.index_of(value)?;
        self.delete_index(isize::try_from(position).ok()?).ok()
    }

    /// Reverses the elements in place.
    pub fn reverse(&mut self) {
        let length = self.len();
        for low in 0..length / 2 {
            let high = length - 1 - low;
            if let (Some(left), Some(right)) =
                (self.entries.remove(&low), self.entries.remove(&high))
            {
                self.entries.insert(low, right);
                self.entries.insert(high, left);
            }
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The empty slice just past the last element.
    const fn end() -> Slice {
        Slice::range(isize::MAX, isize::MAX)
    }
}

impl<T: Clone> IndexedSequence<T> {
    /// Copies the elements into a `Vec` in position order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

// =============================================================================
// Iterator Definitions
// =============================================================================

/// Borrowing iterator over an [`IndexedSequence`], in position order.
pub struct IndexedSequenceIterator<'a, T> {
    entries: &'a Store<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for IndexedSequenceIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let element = self.entries.get(&self.front);
        self.front += 1;
        element
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IndexedSequenceIterator<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.entries.get(&self.back)
    }
}

impl<T> ExactSizeIterator for IndexedSequenceIterator<'_, T> {}

impl<T> FusedIterator for IndexedSequenceIterator<'_, T> {}

impl<T> Clone for IndexedSequenceIterator<'_, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IndexedSequenceIterator<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.clone()).finish()
    }
}

/// Owning iterator over an [`IndexedSequence`], in position order.
pub struct IndexedSequenceIntoIterator<T> {
    entries: Store<T>,
    front: usize,
    back: usize,
}

impl<T> Iterator for IndexedSequenceIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let element = self.entries.remove(&self.front);
        self.front += 1;
        element
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IndexedSequenceIntoIterator<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.entries.remove(&self.back)
    }
}

impl<T> ExactSizeIterator for IndexedSequenceIntoIterator<T> {}

impl<T> FusedIterator for IndexedSequenceIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> FromIterator<T> for IndexedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let mut sequence = Self::with_capacity(values.len());
        sequence.splice(Slice::full().indices(0), values);
        sequence
    }
}

impl<T> Extend<T> for IndexedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let values: Vec<T> = iter.into_iter().collect();
        self.splice(Self::end().indices(self.len()), values);
    }
}

impl<T> From<Vec<T>> for IndexedSequence<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for IndexedSequence<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> From<IndexedSequence<T>> for Vec<T> {
    fn from(sequence: IndexedSequence<T>) -> Self {
        sequence.into_iter().collect()
    }
}

impl<T> IntoIterator for IndexedSequence<T> {
    type Item = T;
    type IntoIter = IndexedSequenceIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        let back = self.len();
        IndexedSequenceIntoIterator {
            entries: self.entries,
            front: 0,
            back,
        }
    }
}

impl<'a, T> IntoIterator for &'a IndexedSequence<T> {
    type Item = &'a T;
    type IntoIter = IndexedSequenceIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Add for IndexedSequence<T> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self::Output {
        self.extend(other);
        self
    }
}

impl<T, I> AddAssign<I> for IndexedSequence<T>
where
    I: IntoIterator<Item = T>,
{
    fn add_assign(&mut self, other: I) {
        self.extend(other);
    }
}

/// Hashes the length followed by each element in position order, so equal
/// sequences hash equally.
impl<T: Hash> Hash for IndexedSequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for IndexedSequence<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct IndexedSequenceVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> IndexedSequenceVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for IndexedSequenceVisitor<T>
where
    T: serde::Deserialize<'de>,
{
    type Value = IndexedSequence<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(elements.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for IndexedSequence<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(IndexedSequenceVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
