//! Keys addressing an [`IndexedSequence`](super::IndexedSequence).
//!
//! A [`Key`] is either a single integer position or a [`Slice`]
//! descriptor. Integer keys may be negative, counting back from the end
//! (`-1` is the last element). Slices follow the conventional stepped-range
//! rules: `None` components default to either end depending on the sign of
//! the step, negative components are offset by the length, and the result
//! is clamped into the sequence.
//!
//! Resolving a slice against a length yields an [`IndexRange`], the
//! materialized arithmetic progression of positions the slice addresses.
//!
//! # Examples
//!
//! ```rust
//! use listy::sequence::Slice;
//!
//! // [8:2:-2] over ten elements addresses 8, 6, 4
//! let slice = Slice::new(Some(8), Some(2), Some(-2)).unwrap();
//! let positions: Vec<usize> = slice.indices(10).iter().collect();
//! assert_eq!(positions, vec![8, 6, 4]);
//!
//! // [::-1] walks the whole sequence backwards
//! let positions: Vec<usize> = Slice::reversed().indices(3).iter().collect();
//! assert_eq!(positions, vec![2, 1, 0]);
//! ```

use std::any::{Any, type_name, type_name_of_val};
use std::fmt;
use std::iter::FusedIterator;
use std::num::NonZeroIsize;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use super::SequenceError;

const UNIT_STEP: NonZeroIsize = match NonZeroIsize::new(1) {
    Some(step) => step,
    None => unreachable!(),
};

const REVERSE_STEP: NonZeroIsize = match NonZeroIsize::new(-1) {
    Some(step) => step,
    None => unreachable!(),
};

// =============================================================================
// Position Normalization
// =============================================================================

/// Resolves an integer key against `length`.
///
/// Valid keys lie in `-length..length`; negative keys count from the end.
pub(crate) fn normalize_index(index: isize, length: usize) -> Result<usize, SequenceError> {
    let position = if index >= 0 {
        Some(index.unsigned_abs())
    } else {
        length.checked_sub(index.unsigned_abs())
    };
    match position {
        Some(position) if position < length => Ok(position),
        _ => Err(SequenceError::OutOfRange { index, length }),
    }
}

/// Resolves an insertion point against `length`, clamping into `0..=length`.
pub(crate) fn clamp_index(index: isize, length: usize) -> usize {
    if index >= 0 {
        index.unsigned_abs().min(length)
    } else {
        length.saturating_sub(index.unsigned_abs())
    }
}

// =============================================================================
// Slice Definition
// =============================================================================

/// A `(start, stop, step)` slice descriptor.
///
/// `start`, `stop` and `step` are optional; `start` and `stop` may be
/// negative. An omitted step behaves as 1 but is remembered as omitted,
/// so `[1:4]` and `[1:4:1]` address the same positions yet compare and
/// render differently, as conventional slices do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice {
    start: Option<isize>,
    stop: Option<isize>,
    step: Option<NonZeroIsize>,
}

impl Slice {
    /// Creates a slice from optional components.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::ZeroStep`] if `step` is `Some(0)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::{SequenceError, Slice};
    ///
    /// assert!(Slice::new(Some(1), Some(4), Some(2)).is_ok());
    /// assert_eq!(Slice::new(None, None, Some(0)), Err(SequenceError::ZeroStep));
    /// ```
    pub fn new(
        start: Option<isize>,
        stop: Option<isize>,
        step: Option<isize>,
    ) -> Result<Self, SequenceError> {
        let step = match step {
            None => None,
            Some(step) => Some(NonZeroIsize::new(step).ok_or(SequenceError::ZeroStep)?),
        };
        Ok(Self { start, stop, step })
    }

    /// The slice `[:]`, addressing every position in order.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            start: None,
            stop: None,
            step: None,
        }
    }

    /// The slice `[::-1]`, addressing every position in reverse order.
    #[must_use]
    pub const fn reversed() -> Self {
        Self {
            start: None,
            stop: None,
            step: Some(REVERSE_STEP),
        }
    }

    /// The unit-step slice `[start:stop]`.
    #[must_use]
    pub const fn range(start: isize, stop: isize) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: None,
        }
    }

    /// The slice `[start:stop:step]` with explicit bounds.
    #[must_use]
    pub const fn stepped(start: isize, stop: isize, step: NonZeroIsize) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
            step: Some(step),
        }
    }

    /// The requested start, if any.
    #[must_use]
    pub const fn start(&self) -> Option<isize> {
        self.start
    }

    /// The requested stop, if any.
    #[must_use]
    pub const fn stop(&self) -> Option<isize> {
        self.stop
    }

    /// The effective step, 1 when omitted.
    #[must_use]
    pub const fn step(&self) -> NonZeroIsize {
        match self.step {
            Some(step) => step,
            None => UNIT_STEP,
        }
    }

    /// The requested step, if any.
    #[must_use]
    pub const fn requested_step(&self) -> Option<NonZeroIsize> {
        self.step
    }

    /// Returns `true` for slices with a step other than 1.
    #[must_use]
    pub const fn is_extended(&self) -> bool {
        self.step().get() != 1
    }

    /// Normalizes the slice against `length`.
    ///
    /// Defaults fill from either end depending on the sign of the step,
    /// negative components are offset by `length`, and the results are
    /// clamped into `[0, length]` for a positive step or
    /// `[-1, length - 1]` for a negative one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::Slice;
    ///
    /// let range = Slice::new(Some(-100), Some(100), None).unwrap().indices(5);
    /// assert_eq!(range.start(), 0);
    /// assert_eq!(range.len(), 5);
    ///
    /// let range = Slice::range(3, 1).indices(5);
    /// assert!(range.is_empty());
    /// assert_eq!(range.start(), 3);
    /// ```
    #[must_use]
    pub fn indices(&self, length: usize) -> IndexRange {
        let length = isize::try_from(length).unwrap_or(isize::MAX);
        let step = self.step().get();
        let (lower, upper) = if step > 0 {
            (0, length)
        } else {
            (-1, length - 1)
        };

        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(value) if value < 0 => (value + length).max(lower),
            Some(value) => value.min(upper),
        };

        let (start, stop) = if step > 0 {
            (clamp(self.start, lower), clamp(self.stop, upper))
        } else {
            (clamp(self.start, upper), clamp(self.stop, lower))
        };

        let len = if step > 0 && start < stop {
            (stop - start - 1).unsigned_abs() / step.unsigned_abs() + 1
        } else if step < 0 && stop < start {
            (start - stop - 1).unsigned_abs() / step.unsigned_abs() + 1
        } else {
            0
        };

        IndexRange { start, step, len }
    }
}

impl Default for Slice {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let component = |value: Option<isize>| value.map_or_else(|| "None".to_string(), |value| value.to_string());
        write!(
            formatter,
            "slice({}, {}, {})",
            component(self.start),
            component(self.stop),
            component(self.step.map(NonZeroIsize::get))
        )
    }
}

impl From<Range<isize>> for Slice {
    fn from(range: Range<isize>) -> Self {
        Self::range(range.start, range.end)
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(range: RangeFrom<isize>) -> Self {
        Self {
            start: Some(range.start),
            stop: None,
            step: None,
        }
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(range: RangeTo<isize>) -> Self {
        Self {
            start: None,
            stop: Some(range.end),
            step: None,
        }
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

// =============================================================================
// IndexRange Definition
// =============================================================================

/// The materialized index sequence of a [`Slice`] resolved against a length.
///
/// This is the progression `start, start + step, ...` stopping strictly
/// before the normalized stop. Every position it yields is a valid
/// position of the sequence it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    start: isize,
    step: isize,
    len: usize,
}

impl IndexRange {
    /// The normalized start.
    ///
    /// For an empty unit-step range this is still the insertion point used
    /// by slice assignment.
    #[must_use]
    pub const fn start(&self) -> isize {
        self.start
    }

    /// The step of the progression.
    #[must_use]
    pub const fn step(&self) -> isize {
        self.step
    }

    /// Number of positions addressed.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no position is addressed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The position at `offset` into the progression.
    #[must_use]
    pub fn nth(&self, offset: usize) -> Option<usize> {
        if offset >= self.len {
            return None;
        }
        let offset = isize::try_from(offset).ok()?;
        usize::try_from(self.start + self.step * offset).ok()
    }

    /// The lowest addressed position.
    #[must_use]
    pub fn min(&self) -> Option<usize> {
        if self.step > 0 {
            self.nth(0)
        } else {
            self.nth(self.len.checked_sub(1)?)
        }
    }

    /// The highest addressed position.
    #[must_use]
    pub fn max(&self) -> Option<usize> {
        if self.step > 0 {
            self.nth(self.len.checked_sub(1)?)
        } else {
            self.nth(0)
        }
    }

    /// Returns `true` if `position` is one of the addressed positions.
    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        let Ok(position) = isize::try_from(position) else {
            return false;
        };
        if self.is_empty() {
            return false;
        }
        let offset = position - self.start;
        if offset % self.step != 0 {
            return false;
        }
        let steps = offset / self.step;
        steps >= 0 && steps.unsigned_abs() < self.len
    }

    /// Iterates the addressed positions in progression order.
    #[must_use]
    pub fn iter(&self) -> IndexRangeIterator {
        IndexRangeIterator {
            range: *self,
            front: 0,
            back: self.len,
        }
    }
}

impl IntoIterator for IndexRange {
    type Item = usize;
    type IntoIter = IndexRangeIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the positions of an [`IndexRange`].
#[derive(Debug, Clone)]
pub struct IndexRangeIterator {
    range: IndexRange,
    front: usize,
    back: usize,
}

impl Iterator for IndexRangeIterator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let position = self.range.nth(self.front);
        self.front += 1;
        position
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for IndexRangeIterator {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.range.nth(self.back)
    }
}

impl ExactSizeIterator for IndexRangeIterator {}

impl FusedIterator for IndexRangeIterator {}

// =============================================================================
// Key Definition
// =============================================================================

/// A key addressing either one position or a slice of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A single position; negative values count from the end.
    Index(isize),
    /// A slice descriptor.
    Slice(Slice),
}

impl Key {
    /// Classifies a key of any statically known type.
    ///
    /// Delegates to [`Key::classify_dyn`]; a rejected key is reported with
    /// the name of `K`. Boxed `dyn Any` keys are unwrapped first.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidKeyType`] for any type other than the
    /// supported integer and slice types.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::{Key, SequenceError, Slice};
    ///
    /// assert_eq!(Key::classify(&-1_i32), Ok(Key::Index(-1)));
    /// assert_eq!(Key::classify(&(1_isize..3)), Ok(Key::Slice(Slice::range(1, 3))));
    /// assert_eq!(
    ///     Key::classify(&1.5_f64),
    ///     Err(SequenceError::InvalidKeyType { type_name: "f64" })
    /// );
    /// ```
    pub fn classify<K: Any>(key: &K) -> Result<Self, SequenceError> {
        let erased: &dyn Any = key;
        let boxed = erased.is::<Box<dyn Any>>() || erased.is::<Box<dyn Any + Send>>();
        Self::classify_dyn(erased).map_err(|error| match error {
            SequenceError::InvalidKeyType { .. } if !boxed => SequenceError::InvalidKeyType {
                type_name: type_name::<K>(),
            },
            error => error,
        })
    }

    /// Classifies a type-erased key.
    ///
    /// Signed and unsigned machine integers become [`Key::Index`] (values
    /// beyond `isize` saturate and are later reported as out of range);
    /// [`Slice`] and the half-open `isize` range types become
    /// [`Key::Slice`]. A `Box<dyn Any>` is classified by its contents.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidKeyType`] for any other type. The
    /// concrete type behind a `dyn Any` has no recoverable name, so the
    /// error carries the erased type's name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listy::sequence::{Key, SequenceError};
    /// use std::any::Any;
    ///
    /// let keys: Vec<Box<dyn Any>> = vec![Box::new(1_isize), Box::new(-2_i64), Box::new("x")];
    /// let classified: Vec<_> = keys.iter().map(|key| Key::classify_dyn(key.as_ref())).collect();
    /// assert_eq!(classified[0], Ok(Key::Index(1)));
    /// assert_eq!(classified[1], Ok(Key::Index(-2)));
    /// assert!(matches!(classified[2], Err(SequenceError::InvalidKeyType { .. })));
    /// ```
    pub fn classify_dyn(key: &dyn Any) -> Result<Self, SequenceError> {
        let saturate = |negative: bool| if negative { isize::MIN } else { isize::MAX };

        if let Some(boxed) = key.downcast_ref::<Box<dyn Any>>() {
            Self::classify_dyn(&**boxed)
        } else if let Some(boxed) = key.downcast_ref::<Box<dyn Any + Send>>() {
            Self::classify_dyn(&**boxed)
        } else if let Some(index) = key.downcast_ref::<isize>() {
            Ok(Self::Index(*index))
        } else if let Some(index) = key.downcast_ref::<i64>() {
            Ok(Self::Index(
                isize::try_from(*index).unwrap_or_else(|_| saturate(*index < 0)),
            ))
        } else if let Some(index) = key.downcast_ref::<i32>() {
            Ok(Self::Index(
                isize::try_from(*index).unwrap_or_else(|_| saturate(*index < 0)),
            ))
        } else if let Some(index) = key.downcast_ref::<usize>() {
            Ok(Self::Index(isize::try_from(*index).unwrap_or(isize::MAX)))
        } else if let Some(slice) = key.downcast_ref::<Slice>() {
            Ok(Self::Slice(*slice))
        } else if let Some(range) = key.downcast_ref::<Range<isize>>() {
            Ok(Self::Slice(range.clone().into()))
        } else if let Some(range) = key.downcast_ref::<RangeFrom<isize>>() {
            Ok(Self::Slice(range.clone().into()))
        } else if let Some(range) = key.downcast_ref::<RangeTo<isize>>() {
            Ok(Self::Slice((*range).into()))
        } else if key.is::<RangeFull>() {
            Ok(Self::Slice(Slice::full()))
        } else {
            Err(SequenceError::InvalidKeyType {
                type_name: type_name_of_val(key),
            })
        }
    }
}

impl From<isize> for Key {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

impl From<Slice> for Key {
    fn from(slice: Slice) -> Self {
        Self::Slice(slice)
    }
}

impl From<Range<isize>> for Key {
    fn from(range: Range<isize>) -> Self {
        Self::Slice(range.into())
    }
}

impl From<RangeFrom<isize>> for Key {
    fn from(range: RangeFrom<isize>) -> Self {
        Self::Slice(range.into())
    }
}

impl From<RangeTo<isize>> for Key {
    fn from(range: RangeTo<isize>) -> Self {
        Self::Slice(range.into())
    }
}

impl From<RangeFull> for Key {
    fn from(range: RangeFull) -> Self {
        Self::Slice(range.into())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(formatter, "{index}"),
            Self::Slice(slice) => write!(formatter, "{slice}"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
