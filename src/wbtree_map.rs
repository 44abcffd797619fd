//! Ordered maps and multimaps.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Index, RangeBounds};

use crate::compare::{Comparator, NaturalOrder};
use crate::error::{Error, Result};
use crate::iter::{self, IntoIter, ItemsWhere, ItemsWhereRev};
use crate::node::{NodeId, NodeRef};
use crate::raw::{Descend, RawWBTree, Slot};
use crate::sorted;

mod capacity;
mod entry;
mod order_statistic;

pub use entry::{Entry, OccupiedEntry, VacantEntry};

/// An ordered map with one value per key.
///
/// See [`SortedMap`] for the full API.
pub type WBTreeMap<K, V, C = NaturalOrder> = SortedMap<K, V, C, false>;

/// An ordered map that keeps every inserted pair; pairs with equal keys stay in
/// insertion order.
///
/// See [`SortedMap`] for the full API.
pub type WBTreeMultiMap<K, V, C = NaturalOrder> = SortedMap<K, V, C, true>;

/// An ordered map backed by a weight-balanced binary tree with subtree sizes.
///
/// Pairs are stored as `(K, V)` tuples ordered by key with the comparator `C`. Use the
/// aliases [`WBTreeMap`] (distinct keys) and [`WBTreeMultiMap`] (duplicate keys, stable).
/// Predicate searches see both halves of a pair, but must be monotonic in key order.
///
/// # Examples
///
/// ```
/// use wbt_collections::WBTreeMap;
///
/// let mut map = WBTreeMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// map.insert_or_assign("a", 9);
///
/// assert_eq!(map.get_value(&"a"), Some(&9));
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.remove(&"z"), None);
/// ```
pub struct SortedMap<K, V, C, const MULTI: bool> {
    raw: RawWBTree<(K, V)>,
    cmp: C,
}

impl<K: Ord, V, const MULTI: bool> SortedMap<K, V, NaturalOrder, MULTI> {
    /// Makes a new, empty map ordered by `K`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C, const MULTI: bool> SortedMap<K, V, C, MULTI> {
    /// Makes a new, empty map whose keys are ordered by `cmp`.
    ///
    /// ```
    /// use wbt_collections::WBTreeMap;
    /// use wbt_collections::compare::{NaturalOrder, Reversed};
    ///
    /// let mut map = WBTreeMap::with_comparator(Reversed(NaturalOrder));
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [2, 1]);
    /// ```
    #[must_use]
    pub const fn with_comparator(cmp: C) -> Self {
        SortedMap {
            raw: RawWBTree::new(),
            cmp,
        }
    }

    /// The comparator that orders the keys.
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of pairs in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no pairs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all pairs.
    pub fn clear(&mut self) {
        tracing::trace!(len = self.raw.len(), "clearing map");
        self.raw.clear();
    }

    /// Gets an iterator over the pairs of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: iter::Iter::new(&self.raw),
        }
    }

    /// Gets an iterator over the pairs of the map with mutable values, sorted by key.
    ///
    /// ```
    /// use wbt_collections::WBTreeMap;
    ///
    /// let mut map = WBTreeMap::from([("a", 1), ("b", 2)]);
    /// for (_, value) in map.iter_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [10, 20]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.raw.items_mut().into_iter(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: iter::Iter::new(&self.raw),
        }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: iter::Iter::new(&self.raw),
        }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.raw.items_mut().into_iter(),
        }
    }

    /// The pair with the smallest key (the earliest inserted among equal keys).
    #[must_use]
    pub fn first(&self) -> Option<NodeRef<'_, (K, V)>> {
        NodeRef::wrap(&self.raw, self.raw.first())
    }

    /// The pair with the largest key (the latest inserted among equal keys).
    #[must_use]
    pub fn last(&self) -> Option<NodeRef<'_, (K, V)>> {
        NodeRef::wrap(&self.raw, self.raw.last())
    }

    /// Removes and returns the first pair.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.first().map(|handle| self.raw.remove(handle))
    }

    /// Removes and returns the last pair.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.last().map(|handle| self.raw.remove(handle))
    }

    /// The pair at sorted position `index`, or `None` if `index >= len()`.
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<NodeRef<'_, (K, V)>> {
        NodeRef::wrap(&self.raw, self.raw.get_at(index))
    }

    /// Removes and returns the pair at sorted position `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<(K, V)> {
        self.raw.get_at(index).map(|handle| self.raw.remove(handle))
    }

    /// Iterates over the pairs whose sorted positions fall in `range`, clamped to `0..len()`.
    pub fn range_by_rank<R>(&self, range: R) -> Iter<'_, K, V>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = sorted::clamp_range(&range, self.raw.len());
        Iter {
            inner: iter::Iter::between(&self.raw, start, end),
        }
    }

    /// Removes the pairs whose sorted positions fall in `range` (clamped), returning how
    /// many were removed.
    pub fn remove_range_by_rank<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        sorted::remove_range(&mut self.raw, range)
    }

    /// The first pair for which `pred` holds.
    ///
    /// `pred` must be false for a prefix of the map and true for the rest.
    ///
    /// ```
    /// use wbt_collections::WBTreeMap;
    ///
    /// let map = WBTreeMap::from([(1, "one"), (5, "five"), (9, "nine")]);
    /// let node = map.first_where(|&k, _| k > 3).unwrap();
    /// assert_eq!(*node.value(), "five");
    /// ```
    pub fn first_where<P>(&self, mut pred: P) -> Option<NodeRef<'_, (K, V)>>
    where
        P: FnMut(&K, &V) -> bool,
    {
        NodeRef::wrap(&self.raw, self.raw.first_where(|(k, v)| pred(k, v)))
    }

    /// The last pair for which `pred` holds; `pred` must be true for a prefix and false
    /// for the rest.
    pub fn last_where<P>(&self, mut pred: P) -> Option<NodeRef<'_, (K, V)>>
    where
        P: FnMut(&K, &V) -> bool,
    {
        NodeRef::wrap(&self.raw, self.raw.last_where(|(k, v)| pred(k, v)))
    }

    /// Removes and returns [`first_where`](Self::first_where)'s pair.
    pub fn remove_first_where<P>(&mut self, mut pred: P) -> Option<(K, V)>
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.raw.first_where(|(k, v)| pred(k, v)).map(|handle| self.raw.remove(handle))
    }

    /// Removes and returns [`last_where`](Self::last_where)'s pair.
    pub fn remove_last_where<P>(&mut self, mut pred: P) -> Option<(K, V)>
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.raw.last_where(|(k, v)| pred(k, v)).map(|handle| self.raw.remove(handle))
    }

    /// Sorted position of [`first_where`](Self::first_where)'s pair.
    pub fn first_index_where<P>(&self, mut pred: P) -> Option<usize>
    where
        P: FnMut(&K, &V) -> bool,
    {
        let index = self.raw.first_index_where(|(k, v)| pred(k, v));
        (index < self.raw.len()).then_some(index)
    }

    /// Sorted position of [`last_where`](Self::last_where)'s pair.
    pub fn last_index_where<P>(&self, mut pred: P) -> Option<usize>
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.raw.last_index_where(|(k, v)| pred(k, v))
    }

    /// Counts the pairs from the first where `start` holds through the last where `end`
    /// holds. O(log n).
    pub fn count_where<S, E>(&self, mut start: S, mut end: E) -> usize
    where
        S: FnMut(&K, &V) -> bool,
        E: FnMut(&K, &V) -> bool,
    {
        self.raw.count_between(|(k, v)| start(k, v), |(k, v)| end(k, v))
    }

    /// Lazily iterates upwards from the first pair where `start` holds, stopping before the
    /// first pair where `end` fails.
    pub fn items_where<S, E>(&self, mut start: S, mut end: E) -> impl FusedIterator<Item = (&K, &V)>
    where
        S: FnMut(&K, &V) -> bool,
        E: FnMut(&K, &V) -> bool,
    {
        ItemsWhere::new(&self.raw, move |(k, v): &(K, V)| start(k, v), move |(k, v): &(K, V)| end(k, v))
            .map(|(k, v)| (k, v))
    }

    /// Like [`items_where`](Self::items_where), walking downwards from the last pair where
    /// `end` holds while `start` holds.
    pub fn items_where_rev<S, E>(&self, mut start: S, mut end: E) -> impl FusedIterator<Item = (&K, &V)>
    where
        S: FnMut(&K, &V) -> bool,
        E: FnMut(&K, &V) -> bool,
    {
        ItemsWhereRev::new(&self.raw, move |(k, v): &(K, V)| start(k, v), move |(k, v): &(K, V)| end(k, v))
            .map(|(k, v)| (k, v))
    }

    /// Removes the pairs [`items_where`](Self::items_where) would yield, returning how many.
    pub fn remove_where<S, E>(&mut self, mut start: S, mut end: E) -> usize
    where
        S: FnMut(&K, &V) -> bool,
        E: FnMut(&K, &V) -> bool,
    {
        sorted::remove_where(&mut self.raw, |(k, v)| start(k, v), |(k, v)| end(k, v))
    }

    /// The root node of the underlying tree.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, (K, V)>> {
        NodeRef::wrap(&self.raw, self.raw.root())
    }

    /// Looks up a node by id. Returns `None` once the node has been removed.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, (K, V)>> {
        NodeRef::wrap(&self.raw, id.resolve(&self.raw))
    }

    /// Removes the node named by `id` and returns its pair.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNode`] if the node is no longer in this map.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(K, V)> {
        let handle = id.resolve(&self.raw).ok_or(Error::InvalidNode)?;
        Ok(self.raw.remove(handle))
    }
}

impl<K, V, C: Comparator<K>, const MULTI: bool> SortedMap<K, V, C, MULTI> {
    fn probe<'a>(&'a self, key: &'a K) -> impl Fn(&(K, V)) -> Ordering + 'a {
        move |(other, _)| self.cmp.compare(key, other)
    }

    /// Replaces the contents of the map with `pairs`, sorted by key.
    ///
    /// The sort is stable, so a multimap keeps pairs with equal keys in the order given.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if this is a distinct map and two keys compare equal. The
    /// map is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    pub fn initialize<I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = sorted::sort_items(pairs.into_iter().collect(), !MULTI, |a, b| self.cmp.compare(&a.0, &b.0))?;
        sorted::build(&mut self.raw, pairs);
        Ok(())
    }

    /// Replaces the contents of the map with `pairs`, which must already be in key order
    /// (and free of equal keys for a distinct map). O(n).
    pub fn initialize_sorted<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        debug_assert!(
            pairs.windows(2).all(|pair| match self.cmp.compare(&pair[0].0, &pair[1].0) {
                Ordering::Less => true,
                Ordering::Equal => MULTI,
                Ordering::Greater => false,
            }),
            "`SortedMap::initialize_sorted()` - keys are out of order"
        );
        sorted::build(&mut self.raw, pairs);
    }

    /// Inserts a pair.
    ///
    /// A distinct map that already holds `key` is left unchanged and returns `false`; use
    /// [`insert_or_assign`](SortedMap::insert_or_assign) or [`entry`](SortedMap::entry) to
    /// update. A multimap always inserts, after any pairs with an equal key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let cmp = &self.cmp;
        sorted::insert(&mut self.raw, !MULTI, (key, value), |a, b| cmp.compare(&a.0, &b.0)).1
    }

    /// Inserts every pair of `pairs`, returning how many were actually added.
    pub fn insert_items<I>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().map(|(key, value)| self.insert(key, value)).filter(|&inserted| inserted).count()
    }

    /// Returns `true` if the map holds a pair with key `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.find_first(self.probe(key)).is_some()
    }

    /// The first (earliest inserted) pair with key `key`.
    pub fn first_of(&self, key: &K) -> Option<NodeRef<'_, (K, V)>> {
        NodeRef::wrap(&self.raw, self.raw.find_first(self.probe(key)))
    }

    /// The last (latest inserted) pair with key `key`.
    pub fn last_of(&self, key: &K) -> Option<NodeRef<'_, (K, V)>> {
        NodeRef::wrap(&self.raw, self.raw.find_last(self.probe(key)))
    }

    /// Sorted position of [`first_of`](Self::first_of)'s pair.
    pub fn first_index_of(&self, key: &K) -> Option<usize> {
        self.raw.find_first(self.probe(key)).map(|handle| self.raw.index_of(handle))
    }

    /// Sorted position of [`last_of`](Self::last_of)'s pair.
    pub fn last_index_of(&self, key: &K) -> Option<usize> {
        self.raw.find_last(self.probe(key)).map(|handle| self.raw.index_of(handle))
    }

    /// Number of pairs with key `key`. O(log n), independent of the count.
    pub fn count_of(&self, key: &K) -> usize {
        self.raw.count_matching(self.probe(key))
    }

    /// Removes and returns [`first_of`](Self::first_of)'s pair.
    pub fn remove_first_of(&mut self, key: &K) -> Option<(K, V)> {
        let found = self.raw.find_first(self.probe(key));
        found.map(|handle| self.raw.remove(handle))
    }

    /// Removes and returns [`last_of`](Self::last_of)'s pair.
    pub fn remove_last_of(&mut self, key: &K) -> Option<(K, V)> {
        let found = self.raw.find_last(self.probe(key));
        found.map(|handle| self.raw.remove(handle))
    }

    /// Removes a pair with key `key` (the latest inserted, for a multimap) and returns its
    /// value.
    ///
    /// ```
    /// use wbt_collections::WBTreeMap;
    ///
    /// let mut map = WBTreeMap::from([(1, "a")]);
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_last_of(key).map(|(_, value)| value)
    }
}

impl<K, V, C: Comparator<K>> SortedMap<K, V, C, false> {
    /// The node holding `key`, if present.
    pub fn get(&self, key: &K) -> Option<NodeRef<'_, (K, V)>> {
        self.first_of(key)
    }

    /// Returns a reference to the value for `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_value(&self, key: &K) -> Option<&V> {
        self.raw.find_first(self.probe(key)).map(|handle| &self.raw.item(handle).1)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let found = self.raw.find_first(self.probe(key));
        found.map(|handle| &mut self.raw.item_mut(handle).1)
    }

    /// Returns the value for `key`, or an error when it is missing.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the map holds no such key.
    ///
    /// ```
    /// use wbt_collections::{Error, WBTreeMap};
    ///
    /// let map = WBTreeMap::from([("a", 1)]);
    /// assert_eq!(map.value(&"a"), Ok(&1));
    /// assert_eq!(map.value(&"z"), Err(Error::KeyNotFound));
    /// ```
    pub fn value(&self, key: &K) -> Result<&V> {
        self.get_value(key).ok_or(Error::KeyNotFound)
    }

    /// Sorted position of `key`.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.first_index_of(key)
    }

    /// Sets the value for `key`, inserting the pair if the key is new. An existing pair
    /// keeps its key and has its value replaced in place, without restructuring the tree.
    ///
    /// Returns the previous value, if any.
    ///
    /// ```
    /// use wbt_collections::WBTreeMap;
    ///
    /// let mut map = WBTreeMap::new();
    /// assert_eq!(map.insert_or_assign("a", 1), None);
    /// assert_eq!(map.insert_or_assign("a", 9), Some(1));
    /// assert_eq!(map[&"a"], 9);
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut entry) => Some(entry.insert(value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Gets the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::WBTreeMap;
    ///
    /// let mut count: WBTreeMap<&str, usize> = WBTreeMap::new();
    ///
    /// for x in ["a", "b", "a", "c", "a", "b"] {
    ///     count.entry(x).and_modify(|curr| *curr += 1).or_insert(1);
    /// }
    ///
    /// assert_eq!(count[&"a"], 3);
    /// assert_eq!(count[&"b"], 2);
    /// assert_eq!(count[&"c"], 1);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let cmp = &self.cmp;
        let slot = self.raw.locate(|(other, _), _| match cmp.compare(&key, other) {
            Ordering::Less => Descend::Left,
            Ordering::Equal => Descend::Stop,
            Ordering::Greater => Descend::Right,
        });

        match slot {
            Slot::Occupied(handle) => Entry::Occupied(OccupiedEntry {
                tree: &mut self.raw,
                handle,
            }),
            Slot::Vacant(at) => Entry::Vacant(VacantEntry {
                tree: &mut self.raw,
                key,
                at,
            }),
        }
    }
}

impl<K, V, C: Comparator<K>> SortedMap<K, V, C, true> {
    /// Lazily iterates over the values stored under `key`, in insertion order.
    ///
    /// ```
    /// use wbt_collections::WBTreeMultiMap;
    ///
    /// let mut map = WBTreeMultiMap::new();
    /// map.insert("x", 1);
    /// map.insert("y", 2);
    /// map.insert("x", 3);
    /// assert_eq!(map.values_of(&"x").copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn values_of<'a>(&'a self, key: &'a K) -> impl FusedIterator<Item = &'a V> + 'a {
        let cmp = &self.cmp;
        ItemsWhere::new(
            &self.raw,
            move |(other, _): &(K, V)| cmp.compare(key, other) != Ordering::Greater,
            move |(other, _): &(K, V)| cmp.compare(key, other).is_eq(),
        )
        .map(|(_, value)| value)
    }

    /// Removes every pair with key `key` and returns how many there were.
    pub fn remove_all(&mut self, key: &K) -> usize {
        let cmp = &self.cmp;
        sorted::remove_run(&mut self.raw, |(other, _): &(K, V)| cmp.compare(key, other))
    }
}

/// Returns a reference to the value for `key`.
///
/// # Panics
///
/// Panics if the key is not present in the map.
impl<K, V, C: Comparator<K>> Index<&K> for SortedMap<K, V, C, false> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get_value(key).expect("`SortedMap::index()` - key not found")
    }
}

impl<K: Clone, V: Clone, C: Clone, const MULTI: bool> Clone for SortedMap<K, V, C, MULTI> {
    fn clone(&self) -> Self {
        SortedMap {
            raw: self.raw.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, const MULTI: bool> fmt::Debug for SortedMap<K, V, C, MULTI> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default, const MULTI: bool> Default for SortedMap<K, V, C, MULTI> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: PartialEq, V: PartialEq, C, const MULTI: bool> PartialEq for SortedMap<K, V, C, MULTI> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C, const MULTI: bool> Eq for SortedMap<K, V, C, MULTI> {}

impl<K, V, C: Comparator<K> + Default, const MULTI: bool> FromIterator<(K, V)> for SortedMap<K, V, C, MULTI> {
    /// Collects the pairs in O(n log n). A distinct map keeps the first pair of each key,
    /// the same as repeated [`insert`](SortedMap::insert).
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        let mut pairs: Vec<(K, V)> = iter.into_iter().collect();
        pairs.sort_by(|a, b| map.cmp.compare(&a.0, &b.0));
        if !MULTI {
            pairs.dedup_by(|later, earlier| map.cmp.compare(&earlier.0, &later.0).is_eq());
        }
        sorted::build(&mut map.raw, pairs);
        map
    }
}

impl<K, V, C: Comparator<K>, const MULTI: bool> Extend<(K, V)> for SortedMap<K, V, C, MULTI> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.insert_items(iter);
    }
}

impl<K: Ord, V, const N: usize, const MULTI: bool> From<[(K, V); N]> for SortedMap<K, V, NaturalOrder, MULTI> {
    /// Converts a `[(K, V); N]` into a map.
    ///
    /// ```
    /// use wbt_collections::WBTreeMap;
    ///
    /// let map1 = WBTreeMap::from([(1, 2), (3, 4)]);
    /// let map2: WBTreeMap<_, _> = [(1, 2), (3, 4)].into();
    /// assert_eq!(map1, map2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, V, C, const MULTI: bool> IntoIterator for SortedMap<K, V, C, MULTI> {
    type Item = (K, V);
    type IntoIter = IntoIter<(K, V)>;

    /// Gets an owning iterator over the pairs of the map, sorted by key.
    fn into_iter(self) -> IntoIter<(K, V)> {
        IntoIter::new(self.raw)
    }
}

impl<'a, K, V, C, const MULTI: bool> IntoIterator for &'a SortedMap<K, V, C, MULTI> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C, const MULTI: bool> IntoIterator for &'a mut SortedMap<K, V, C, MULTI> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

/// An iterator over the pairs of a map, created by [`SortedMap::iter`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: iter::Iter<'a, (K, V)>,
}

/// A mutable iterator over the pairs of a map, created by [`SortedMap::iter_mut`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    inner: vec::IntoIter<&'a mut (K, V)>,
}

/// An iterator over the keys of a map, created by [`SortedMap::keys`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: iter::Iter<'a, (K, V)>,
}

/// An iterator over the values of a map, created by [`SortedMap::values`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: iter::Iter<'a, (K, V)>,
}

/// A mutable iterator over the values of a map, created by [`SortedMap::values_mut`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: vec::IntoIter<&'a mut (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.inner.next_back().map(|(k, v)| (&*k, v))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a mut V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use pretty_assertions::assert_eq;

    #[test]
    fn distinct_map_scenario() {
        let mut map: WBTreeMap<String, i32> = WBTreeMap::new();
        assert!(map.insert("a".to_string(), 1));
        assert!(map.insert("b".to_string(), 2));
        assert_eq!(map.insert_or_assign("a".to_string(), 9), Some(1));

        assert_eq!(map.get(&"a".to_string()).map(|node| *node.value()), Some(9));
        assert_eq!(map.len(), 2);
        assert_eq!(map.remove(&"z".to_string()), None);
        assert_eq!(map.value(&"z".to_string()), Err(Error::KeyNotFound));
        map.raw.assert_invariants();
    }

    #[test]
    fn insert_does_not_overwrite() {
        let mut map = WBTreeMap::new();
        assert!(map.insert(1, "first"));
        assert!(!map.insert(1, "second"));
        assert_eq!(map[&1], "first");
    }

    #[test]
    fn multimap_keeps_insertion_order_per_key() {
        let mut map = WBTreeMultiMap::new();
        for (key, value) in [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (2, 'e')] {
            map.insert(key, value);
        }
        let pairs: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'e')]);
        assert_eq!(map.count_of(&2), 3);
        assert_eq!(map.remove_first_of(&2), Some((2, 'a')));
        assert_eq!(map.remove_last_of(&2), Some((2, 'e')));
        assert_eq!(map.values_of(&2).copied().collect::<Vec<_>>(), vec!['c']);
        assert_eq!(map.remove_all(&1), 2);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn entry_reuses_the_located_slot() {
        let mut map: WBTreeMap<u32, u32> = (0..64).map(|k| (k * 2, 0)).collect();
        for key in 0..128 {
            *map.entry(key).or_default() += 1;
        }
        assert_eq!(map.len(), 128);
        assert!(map.values().all(|&v| v == 1));
        map.raw.assert_invariants();

        if let Entry::Occupied(entry) = map.entry(10) {
            assert_eq!(entry.remove_entry(), (10, 1));
        }
        assert!(!map.contains_key(&10));
    }

    #[test]
    fn predicates_see_keys_and_values() {
        let map = WBTreeMultiMap::from([(1, 10), (2, 20), (2, 21), (3, 30)]);
        assert_eq!(map.first_index_where(|&k, _| k >= 2), Some(1));
        assert_eq!(map.last_index_where(|&k, _| k <= 2), Some(2));
        assert_eq!(map.count_where(|&k, _| k >= 2, |&k, _| k <= 2), 2);
        let down: Vec<_> = map.items_where_rev(|&k, _| k >= 2, |_, _| true).map(|(_, v)| *v).collect();
        assert_eq!(down, vec![30, 21, 20]);
    }

    #[test]
    fn values_mut_and_keys_follow_key_order() {
        let mut map = WBTreeMap::from([(3, 0), (1, 0), (2, 0)]);
        for (rank, value) in map.values_mut().enumerate() {
            *value = rank;
        }
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(map.iter().rev().next(), Some((&3, &2)));
    }
}
