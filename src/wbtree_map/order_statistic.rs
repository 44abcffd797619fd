use core::ops::{Index, IndexMut};

use super::SortedMap;
use crate::Rank;
use crate::compare::Comparator;

impl<K, V, C: Comparator<K>, const MULTI: bool> SortedMap<K, V, C, MULTI> {
    /// Returns the key-value pair at position `rank` in sorted order.
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
    /// use wbt_collections::WBTreeMap;
    ///
    /// let mut map = WBTreeMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// let (key, value) = map.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.get_at(rank).map(|handle| {
            let (key, value) = self.raw.item(handle);
            (key, value)
        })
    }

    /// Returns the key and a mutable reference to the value at position `rank` in sorted
    /// order.
    ///
    /// The key is returned as a shared reference because mutating it would violate the
    /// map's ordering.
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.get_at(rank)?;
        let (key, value) = self.raw.item_mut(handle);
        Some((&*key, value))
    }

    /// Returns the zero-based rank of the first pair with key `key`, or `None` if the key
    /// is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::WBTreeMap;
    ///
    /// let map = WBTreeMap::from([(10, "a"), (20, "b")]);
    ///
    /// assert_eq!(map.rank_of(&20), Some(1));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.first_index_of(key)
    }
}

/// Indexes into the map by rank, yielding the value.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use wbt_collections::{Rank, WBTreeMap};
///
/// let mut map = WBTreeMap::new();
/// map.insert("a", 10);
/// map.insert("b", 20);
///
/// assert_eq!(map[Rank(0)], 10);
/// map[Rank(1)] += 1;
/// assert_eq!(map[Rank(1)], 21);
/// ```
impl<K, V, C: Comparator<K>, const MULTI: bool> Index<Rank> for SortedMap<K, V, C, MULTI> {
    type Output = V;

    fn index(&self, rank: Rank) -> &V {
        self.get_by_rank(rank.0).map(|(_, value)| value).expect("`SortedMap::index()` - `rank` is out of bounds")
    }
}

impl<K, V, C: Comparator<K>, const MULTI: bool> IndexMut<Rank> for SortedMap<K, V, C, MULTI> {
    fn index_mut(&mut self, rank: Rank) -> &mut V {
        self.get_by_rank_mut(rank.0).map(|(_, value)| value).expect("`SortedMap::index_mut()` - `rank` is out of bounds")
    }
}
