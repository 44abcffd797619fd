use super::SortedMap;
use crate::compare::NaturalOrder;
use crate::raw::RawWBTree;

impl<K: Ord, V, const MULTI: bool> SortedMap<K, V, NaturalOrder, MULTI> {
    /// Creates an empty map with room for at least `capacity` pairs before the node
    /// storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::WBTreeMap;
    ///
    /// let map: WBTreeMap<i32, &str> = WBTreeMap::with_capacity(10);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 10);
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

impl<K, V, C, const MULTI: bool> SortedMap<K, V, C, MULTI> {
    /// Creates an empty map ordered by `cmp` with room for at least `capacity` pairs.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        SortedMap {
            raw: RawWBTree::with_capacity(capacity),
            cmp,
        }
    }

    /// Returns the number of pairs the map can hold without reallocating its node storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
