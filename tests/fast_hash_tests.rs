//! Tests for the hasher feature flags.
//!
//! The `fxhash` and `ahash` features only change the hasher of the backing
//! position map. These tests run under every feature combination and check
//! that ordering, equality and hashing never depend on the hasher.

use std::collections::HashSet;

use listy::sequence::{IndexedSequence, Slice};
use rstest::rstest;

/// Iteration follows positions, never the map's bucket order.
#[rstest]
fn test_iteration_order_is_position_order() {
    let sequence: IndexedSequence<usize> = (0..1000).rev().collect();
    let collected: Vec<usize> = sequence.iter().copied().collect();
    let expected: Vec<usize> = (0..1000).rev().collect();
    assert_eq!(collected, expected);
}

/// A stepped delete followed by a front insert re-keys every entry.
#[rstest]
fn test_large_reindex_keeps_order() {
    let mut sequence: IndexedSequence<usize> = (0..1000).collect();
    sequence.delete_slice(Slice::new(None, None, Some(7)).unwrap());
    sequence.insert(0, 1000);
    let expected: Vec<usize> = std::iter::once(1000)
        .chain((0..1000).filter(|value| value % 7 != 0))
        .collect();
    assert_eq!(sequence, expected);
}

/// Equal contents hash equally, whatever order they were built in.
#[rstest]
fn test_sequences_usable_as_hash_keys() {
    let mut seen = HashSet::new();
    let first: IndexedSequence<i32> = vec![1, 2, 3].into();
    let mut second: IndexedSequence<i32> = vec![3, 2, 1].into();
    second.reverse();

    assert!(seen.insert(first));
    assert!(!seen.insert(second));
    assert_eq!(seen.len(), 1);
}
