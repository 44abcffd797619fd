use core::ops::Index;

use super::SortedSet;
use crate::Rank;
use crate::compare::Comparator;

impl<T, C: Comparator<T>, const MULTI: bool> SortedSet<T, C, MULTI> {
    /// Returns the item at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.get_by_rank(1), Some(&20));
    /// assert!(set.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.raw.get_at(rank).map(|handle| self.raw.item(handle))
    }

    /// Returns the zero-based rank of `value` in sorted order, or `None` if no equal item
    /// is present. In a multiset this is the rank of the first equal item.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::WBTreeMultiSet;
    ///
    /// let set = WBTreeMultiSet::from([10, 20, 20]);
    ///
    /// assert_eq!(set.rank_of(&20), Some(1));
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, value: &T) -> Option<usize> {
        self.first_index_of(value)
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use wbt_collections::{Rank, WBTreeSet};
///
/// let set = WBTreeSet::from([10, 20, 30]);
/// assert_eq!(set[Rank(1)], 20);
/// ```
impl<T, C: Comparator<T>, const MULTI: bool> Index<Rank> for SortedSet<T, C, MULTI> {
    type Output = T;

    fn index(&self, rank: Rank) -> &T {
        self.get_by_rank(rank.0).expect("`SortedSet::index()` - `rank` is out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{Rank, WBTreeMultiSet, WBTreeSet};

    #[test]
    fn rank_round_trip() {
        let set: WBTreeSet<u32> = (0..50).map(|x| x * 3).collect();
        for rank in 0..set.len() {
            let value = *set.get_by_rank(rank).unwrap();
            assert_eq!(set.rank_of(&value), Some(rank));
            assert_eq!(set[Rank(rank)], value);
        }
        assert_eq!(set.rank_of(&1), None);
    }

    #[test]
    #[should_panic(expected = "`SortedSet::index()` - `rank` is out of bounds")]
    fn index_past_end_panics() {
        let set = WBTreeMultiSet::from([1, 1]);
        let _ = set[Rank(2)];
    }
}
