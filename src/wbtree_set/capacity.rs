use super::SortedSet;
use crate::compare::NaturalOrder;
use crate::raw::RawWBTree;

impl<T: Ord, const MULTI: bool> SortedSet<T, NaturalOrder, MULTI> {
    /// Creates an empty set with room for at least `capacity` items before the node
    /// storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::WBTreeSet;
    ///
    /// let set: WBTreeSet<i32> = WBTreeSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T, C, const MULTI: bool> SortedSet<T, C, MULTI> {
    /// Creates an empty set ordered by `cmp` with room for at least `capacity` items.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        SortedSet {
            raw: RawWBTree::with_capacity(capacity),
            cmp,
        }
    }

    /// Returns the number of items the set can hold without reallocating its node storage.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
