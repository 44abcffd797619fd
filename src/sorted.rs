//! Comparator-ordered operations shared by the set and map facades.
//!
//! Everything here works on a bare [`RawWBTree`] plus a comparison closure, so the set
//! (ordering whole items) and the map (ordering the key half of a pair) route the same
//! way: ties go right, and distinct mode stops on an equal item instead of inserting.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::{Bound, RangeBounds};

use crate::error::{Error, Result};
use crate::raw::{Descend, Handle, RawWBTree, Slot};

/// Inserts `item` unless distinct mode finds an equal one. Returns the node holding the
/// item and whether it was newly inserted.
pub(crate) fn insert<T, F>(tree: &mut RawWBTree<T>, distinct: bool, item: T, mut compare: F) -> (Handle, bool)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let slot = tree.locate(|other, _| match compare(&item, other) {
        Ordering::Less => Descend::Left,
        Ordering::Equal if distinct => Descend::Stop,
        Ordering::Equal | Ordering::Greater => Descend::Right,
    });

    match slot {
        Slot::Occupied(handle) => (handle, false),
        Slot::Vacant(at) => (tree.attach(at, item), true),
    }
}

/// Stable-sorts `items`; in distinct mode rejects the first pair that compares equal.
///
/// The error names the sorted position of the second item of the pair. Nothing is
/// built until this has succeeded, so a rejected batch leaves the collection untouched.
pub(crate) fn sort_items<T, F>(mut items: Vec<T>, distinct: bool, mut compare: F) -> Result<Vec<T>>
where
    F: FnMut(&T, &T) -> Ordering,
{
    items.sort_by(&mut compare);
    if distinct {
        if let Some(index) = items.windows(2).position(|pair| compare(&pair[0], &pair[1]).is_eq()) {
            tracing::debug!(index = index + 1, "rejected initialization with a duplicate key");
            return Err(Error::DuplicateKey {
                index: index + 1,
            });
        }
    }
    Ok(items)
}

/// Replaces the tree's contents with items already in order.
pub(crate) fn build<T>(tree: &mut RawWBTree<T>, items: Vec<T>) {
    let len = items.len();
    tree.build(items);
    tracing::debug!(len, "bulk-initialized tree");
}

/// Removes the run of items equal under `probe` and returns how many there were.
///
/// The run's handles are collected first and removed back to front.
pub(crate) fn remove_run<T, P>(tree: &mut RawWBTree<T>, probe: P) -> usize
where
    P: Fn(&T) -> Ordering,
{
    let handles = tree.handles_between(|item| probe(item) != Ordering::Greater, |item| probe(item).is_eq());
    let removed = tree.remove_batch(&handles);
    tracing::trace!(removed, "removed equal-key run");
    removed
}

/// Removes every item from the first one satisfying `start` up to the last one
/// satisfying `end`.
pub(crate) fn remove_where<T, S, E>(tree: &mut RawWBTree<T>, start: S, end: E) -> usize
where
    S: FnMut(&T) -> bool,
    E: FnMut(&T) -> bool,
{
    let handles = tree.handles_between(start, end);
    let removed = tree.remove_batch(&handles);
    tracing::trace!(removed, "removed predicate range");
    removed
}

/// Removes the items at positions within `range` (clamped to the tree).
pub(crate) fn remove_range<T, R>(tree: &mut RawWBTree<T>, range: R) -> usize
where
    R: RangeBounds<usize>,
{
    let (start, end) = clamp_range(&range, tree.len());
    let handles = tree.handles_in(start, end);
    let removed = tree.remove_batch(&handles);
    tracing::trace!(start, end, removed, "removed index range");
    removed
}

/// Converts `range` into `start..end` positions clamped to `0..=len`.
pub(crate) fn clamp_range<R>(range: &R, len: usize) -> (usize, usize)
where
    R: RangeBounds<usize>,
{
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.saturating_add(1),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };
    (start.min(len), end.min(len))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn items(tree: &RawWBTree<(i32, char)>) -> Vec<(i32, char)> {
        crate::iter::Iter::new(tree).copied().collect()
    }

    fn by_key(a: &(i32, char), b: &(i32, char)) -> Ordering {
        a.0.cmp(&b.0)
    }

    #[test]
    fn distinct_insert_stops_on_equal_key() {
        let mut tree = RawWBTree::new();
        let (first, inserted) = insert(&mut tree, true, (1, 'a'), by_key);
        assert!(inserted);
        let (again, inserted) = insert(&mut tree, true, (1, 'b'), by_key);
        assert!(!inserted);
        assert_eq!(again, first);
        assert_eq!(items(&tree), vec![(1, 'a')]);
    }

    #[test]
    fn multi_insert_keeps_arrival_order() {
        let mut tree = RawWBTree::new();
        for item in [(2, 'a'), (1, 'b'), (2, 'c'), (2, 'd'), (1, 'e')] {
            insert(&mut tree, false, item, by_key);
        }
        assert_eq!(items(&tree), vec![(1, 'b'), (1, 'e'), (2, 'a'), (2, 'c'), (2, 'd')]);

        assert_eq!(remove_run(&mut tree, |item: &(i32, char)| 2.cmp(&item.0)), 3);
        assert_eq!(items(&tree), vec![(1, 'b'), (1, 'e')]);
        assert_eq!(remove_run(&mut tree, |item: &(i32, char)| 7.cmp(&item.0)), 0);
    }

    #[test]
    fn sort_is_stable_and_rejects_duplicates_in_distinct_mode() {
        let sorted = sort_items(vec![(3, 'x'), (1, 'y'), (3, 'z')], false, by_key).unwrap();
        assert_eq!(sorted, vec![(1, 'y'), (3, 'x'), (3, 'z')]);

        let error = sort_items(vec![(3, 'x'), (1, 'y'), (3, 'z')], true, by_key).unwrap_err();
        assert_eq!(error, Error::DuplicateKey { index: 2 });
    }

    #[test]
    fn ranges_are_clamped() {
        assert_eq!(clamp_range(&(2..100), 10), (2, 10));
        assert_eq!(clamp_range(&(..=3), 10), (0, 4));
        assert_eq!(clamp_range(&(20..), 10), (10, 10));
        assert_eq!(clamp_range(&(..), 0), (0, 0));
    }

    #[test]
    fn remove_range_and_predicate_range() {
        let mut tree = RawWBTree::new();
        tree.build((0..10).map(|i| (i, 'k')).collect());
        assert_eq!(remove_range(&mut tree, 8..20), 2);
        assert_eq!(remove_where(&mut tree, |item| item.0 >= 2, |item| item.0 <= 4), 3);
        let keys: Vec<i32> = items(&tree).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![0, 1, 5, 6, 7]);
        tree.assert_invariants();
    }
}
