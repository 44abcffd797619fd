use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::ops::RangeBounds;

use crate::compare::{Comparator, NaturalOrder};
use crate::error::{Error, Result};
use crate::iter::{IntoIter, Iter, ItemsWhere, ItemsWhereRev};
use crate::node::{NodeId, NodeRef};
use crate::raw::RawWBTree;
use crate::sorted;

mod capacity;
mod order_statistic;

/// An ordered set of distinct items.
///
/// See [`SortedSet`] for the full API.
pub type WBTreeSet<T, C = NaturalOrder> = SortedSet<T, C, false>;

/// An ordered multiset. Equal items are kept in insertion order.
///
/// See [`SortedSet`] for the full API.
pub type WBTreeMultiSet<T, C = NaturalOrder> = SortedSet<T, C, true>;

/// An ordered collection backed by a weight-balanced binary tree with subtree sizes.
///
/// `SortedSet` is used through its two aliases: [`WBTreeSet`] keeps one item per key and
/// ignores later inserts of an equal item, [`WBTreeMultiSet`] keeps every item and
/// orders equal items by arrival. Ordering comes from the comparator `C`, which defaults
/// to the items' [`Ord`] implementation.
///
/// Besides lookups by item, every operation that a sorted array supports by position is
/// available in O(log n): the item at a rank, the rank of an item, and boundary searches
/// with monotonic predicates.
///
/// It is a logic error for an item to be modified in such a way that its ordering
/// relative to any other item changes while it is in the set. The behavior resulting
/// from such a logic error is not specified, but will be encapsulated to the set that
/// observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use wbt_collections::WBTreeMultiSet;
///
/// let mut set = WBTreeMultiSet::new();
/// for x in [7, 3, 9, 3, 5] {
///     set.insert(x);
/// }
/// assert!(set.iter().eq(&[3, 3, 5, 7, 9]));
///
/// assert_eq!(set.remove_all(&3), 2);
/// assert!(set.iter().eq(&[5, 7, 9]));
/// ```
///
/// A custom order:
///
/// ```
/// use wbt_collections::WBTreeSet;
///
/// let mut set = WBTreeSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// set.insert_items([1, 3, 2]);
/// assert!(set.iter().eq(&[3, 2, 1]));
/// ```
pub struct SortedSet<T, C, const MULTI: bool> {
    raw: RawWBTree<T>,
    cmp: C,
}

impl<T: Ord, const MULTI: bool> SortedSet<T, NaturalOrder, MULTI> {
    /// Makes a new, empty set ordered by `T`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::WBTreeSet;
    ///
    /// let mut set = WBTreeSet::new();
    /// set.insert("x");
    /// assert_eq!(set.len(), 1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C, const MULTI: bool> SortedSet<T, C, MULTI> {
    /// Makes a new, empty set ordered by `cmp`.
    #[must_use]
    pub const fn with_comparator(cmp: C) -> Self {
        SortedSet {
            raw: RawWBTree::new(),
            cmp,
        }
    }

    /// The comparator that orders this set.
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of items in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the set, removing all items.
    pub fn clear(&mut self) {
        tracing::trace!(len = self.raw.len(), "clearing set");
        self.raw.clear();
    }

    /// Gets an iterator that visits the items in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([3, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw)
    }

    /// The smallest item, if any.
    #[must_use]
    pub fn first(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, self.raw.first())
    }

    /// The largest item, if any.
    #[must_use]
    pub fn last(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, self.raw.last())
    }

    /// Removes and returns the smallest item.
    pub fn pop_first(&mut self) -> Option<T> {
        self.raw.first().map(|handle| self.raw.remove(handle))
    }

    /// Removes and returns the largest item.
    pub fn pop_last(&mut self) -> Option<T> {
        self.raw.last().map(|handle| self.raw.remove(handle))
    }

    /// Returns the item at sorted position `index`, or `None` if `index >= len()`.
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
    /// let set = WBTreeSet::from([30, 10, 20]);
    /// assert_eq!(set.get_at(1).map(|node| *node.item()), Some(20));
    /// assert!(set.get_at(3).is_none());
    /// ```
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, self.raw.get_at(index))
    }

    /// Removes and returns the item at sorted position `index`, or `None` if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.raw.get_at(index).map(|handle| self.raw.remove(handle))
    }

    /// Iterates over the items whose sorted positions fall in `range`.
    ///
    /// The range is clamped to `0..len()`, so an oversized range never panics.
    ///
    /// ```
    /// use wbt_collections::WBTreeSet;
    ///
    /// let set: WBTreeSet<_> = (0..10).collect();
    /// assert!(set.range_by_rank(7..).eq(&[7, 8, 9]));
    /// assert!(set.range_by_rank(8..20).eq(&[8, 9]));
    /// ```
    pub fn range_by_rank<R>(&self, range: R) -> Iter<'_, T>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = sorted::clamp_range(&range, self.raw.len());
        Iter::between(&self.raw, start, end)
    }

    /// Removes the items whose sorted positions fall in `range` (clamped), returning how
    /// many were removed.
    pub fn remove_range_by_rank<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        sorted::remove_range(&mut self.raw, range)
    }

    /// The first item for which `pred` holds.
    ///
    /// `pred` must be monotonic over the set's order: false for a (possibly empty) prefix
    /// and true for the rest. The search is a single O(log n) descent; with a
    /// non-monotonic predicate it returns some item where `pred` holds, not necessarily
    /// the first.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::WBTreeMultiSet;
    ///
    /// let set = WBTreeMultiSet::from([1, 3, 5, 5, 8]);
    /// let node = set.first_where(|&x| x >= 5).unwrap();
    /// assert_eq!((*node.item(), node.index()), (5, 2));
    /// assert!(set.first_where(|&x| x > 8).is_none());
    /// ```
    pub fn first_where<P>(&self, pred: P) -> Option<NodeRef<'_, T>>
    where
        P: FnMut(&T) -> bool,
    {
        NodeRef::wrap(&self.raw, self.raw.first_where(pred))
    }

    /// The last item for which `pred` holds; `pred` must be true for a prefix and false
    /// for the rest.
    pub fn last_where<P>(&self, pred: P) -> Option<NodeRef<'_, T>>
    where
        P: FnMut(&T) -> bool,
    {
        NodeRef::wrap(&self.raw, self.raw.last_where(pred))
    }

    /// Removes and returns [`first_where`](Self::first_where)'s item.
    pub fn remove_first_where<P>(&mut self, pred: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.raw.first_where(pred).map(|handle| self.raw.remove(handle))
    }

    /// Removes and returns [`last_where`](Self::last_where)'s item.
    pub fn remove_last_where<P>(&mut self, pred: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.raw.last_where(pred).map(|handle| self.raw.remove(handle))
    }

    /// Sorted position of [`first_where`](Self::first_where)'s item.
    pub fn first_index_where<P>(&self, pred: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let index = self.raw.first_index_where(pred);
        (index < self.raw.len()).then_some(index)
    }

    /// Sorted position of [`last_where`](Self::last_where)'s item.
    ///
    /// ```
    /// use wbt_collections::WBTreeMultiSet;
    ///
    /// let set = WBTreeMultiSet::from([1, 3, 5, 5, 8]);
    /// assert_eq!(set.last_index_where(|&x| x <= 5), Some(3));
    /// assert_eq!(set.last_index_where(|&x| x < 0), None);
    /// ```
    pub fn last_index_where<P>(&self, pred: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.raw.last_index_where(pred)
    }

    /// Counts the items from the first where `start` holds through the last where `end`
    /// holds, without visiting them.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn count_where<S, E>(&self, start: S, end: E) -> usize
    where
        S: FnMut(&T) -> bool,
        E: FnMut(&T) -> bool,
    {
        self.raw.count_between(start, end)
    }

    /// Lazily iterates upwards from the first item where `start` holds, stopping before the
    /// first item where `end` fails.
    ///
    /// ```
    /// use wbt_collections::WBTreeSet;
    ///
    /// let set: WBTreeSet<_> = (0..100).collect();
    /// let teens: Vec<_> = set.items_where(|&x| x >= 13, |&x| x < 20).copied().collect();
    /// assert_eq!(teens, [13, 14, 15, 16, 17, 18, 19]);
    /// ```
    pub fn items_where<S, E>(&self, start: S, end: E) -> ItemsWhere<'_, T, E>
    where
        S: FnMut(&T) -> bool,
        E: FnMut(&T) -> bool,
    {
        ItemsWhere::new(&self.raw, start, end)
    }

    /// Like [`items_where`](Self::items_where), walking downwards from the last item where
    /// `end` holds while `start` holds.
    pub fn items_where_rev<S, E>(&self, start: S, end: E) -> ItemsWhereRev<'_, T, S>
    where
        S: FnMut(&T) -> bool,
        E: FnMut(&T) -> bool,
    {
        ItemsWhereRev::new(&self.raw, start, end)
    }

    /// Removes the items [`items_where`](Self::items_where) would yield, returning how many.
    pub fn remove_where<S, E>(&mut self, start: S, end: E) -> usize
    where
        S: FnMut(&T) -> bool,
        E: FnMut(&T) -> bool,
    {
        sorted::remove_where(&mut self.raw, start, end)
    }

    /// The root node of the underlying tree.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, self.raw.root())
    }

    /// Looks up a node by id. Returns `None` once the node has been removed.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, id.resolve(&self.raw))
    }

    /// Removes the node named by `id` and returns its item.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNode`] if the node is no longer in this set.
    pub fn remove_node(&mut self, id: NodeId) -> Result<T> {
        let handle = id.resolve(&self.raw).ok_or(Error::InvalidNode)?;
        Ok(self.raw.remove(handle))
    }
}

impl<T, C: Comparator<T>, const MULTI: bool> SortedSet<T, C, MULTI> {
    fn probe<'a>(&'a self, value: &'a T) -> impl Fn(&T) -> Ordering + 'a {
        move |item| self.cmp.compare(value, item)
    }

    /// Replaces the contents of the set with `items`, sorted by the comparator.
    ///
    /// The sort is stable, so a multiset keeps equal items in the order given.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if this is a distinct set and two items compare equal. The
    /// set is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::{Error, WBTreeSet};
    ///
    /// let mut set = WBTreeSet::new();
    /// set.initialize([3, 1, 2]).unwrap();
    /// assert!(set.iter().eq(&[1, 2, 3]));
    ///
    /// assert_eq!(set.initialize([5, 5]), Err(Error::DuplicateKey { index: 1 }));
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn initialize<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let items = sorted::sort_items(items.into_iter().collect(), !MULTI, |a, b| self.cmp.compare(a, b))?;
        sorted::build(&mut self.raw, items);
        Ok(())
    }

    /// Replaces the contents of the set with `items`, which must already be in order (and
    /// free of equal items for a distinct set). O(n).
    pub fn initialize_sorted<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        debug_assert!(
            items.windows(2).all(|pair| match self.cmp.compare(&pair[0], &pair[1]) {
                Ordering::Less => true,
                Ordering::Equal => MULTI,
                Ordering::Greater => false,
            }),
            "`SortedSet::initialize_sorted()` - items are out of order"
        );
        sorted::build(&mut self.raw, items);
    }

    /// Adds an item to the set.
    ///
    /// Returns whether the item was newly inserted. A distinct set that already holds an
    /// equal item is left unchanged and returns `false`; a multiset always inserts, after
    /// any equal items.
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
    /// let mut set = WBTreeSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let cmp = &self.cmp;
        sorted::insert(&mut self.raw, !MULTI, value, |a, b| cmp.compare(a, b)).1
    }

    /// Inserts `value` unless a distinct set already holds an equal item, and returns the
    /// node holding the inserted or pre-existing item.
    pub fn get_or_insert(&mut self, value: T) -> NodeRef<'_, T> {
        let cmp = &self.cmp;
        let (handle, _) = sorted::insert(&mut self.raw, !MULTI, value, |a, b| cmp.compare(a, b));
        NodeRef::new(&self.raw, handle)
    }

    /// Inserts every item of `items`, returning how many were actually added.
    pub fn insert_items<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().map(|item| self.insert(item)).filter(|&inserted| inserted).count()
    }

    /// Returns `true` if the set holds an item equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains(&self, value: &T) -> bool {
        self.raw.find_first(self.probe(value)).is_some()
    }

    /// The first (earliest inserted, for a multiset) item equal to `value`.
    pub fn first_of(&self, value: &T) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, self.raw.find_first(self.probe(value)))
    }

    /// The last (latest inserted, for a multiset) item equal to `value`.
    pub fn last_of(&self, value: &T) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, self.raw.find_last(self.probe(value)))
    }

    /// Sorted position of [`first_of`](Self::first_of)'s item.
    pub fn first_index_of(&self, value: &T) -> Option<usize> {
        self.raw.find_first(self.probe(value)).map(|handle| self.raw.index_of(handle))
    }

    /// Sorted position of [`last_of`](Self::last_of)'s item.
    pub fn last_index_of(&self, value: &T) -> Option<usize> {
        self.raw.find_last(self.probe(value)).map(|handle| self.raw.index_of(handle))
    }

    /// Number of items equal to `value`: always 0 or 1 for a distinct set.
    ///
    /// # Complexity
    ///
    /// O(log n), independent of the count.
    pub fn count_of(&self, value: &T) -> usize {
        self.raw.count_matching(self.probe(value))
    }

    /// Removes one item equal to `value` (the latest inserted, for a multiset). Returns
    /// whether anything was removed.
    pub fn remove(&mut self, value: &T) -> bool {
        let found = self.raw.find_last(self.probe(value));
        found.map(|handle| self.raw.remove(handle)).is_some()
    }
}

impl<T, C: Comparator<T>> SortedSet<T, C, false> {
    /// Returns a reference to the item in the set, if any, that is equal to `value`.
    ///
    /// ```
    /// use wbt_collections::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    pub fn get(&self, value: &T) -> Option<&T> {
        self.raw.find_first(self.probe(value)).map(|handle| self.raw.item(handle))
    }
}

impl<T, C: Comparator<T>> SortedSet<T, C, true> {
    /// Removes every item equal to `value` and returns how many there were.
    ///
    /// # Complexity
    ///
    /// O(k log n) for k removed items.
    pub fn remove_all(&mut self, value: &T) -> usize {
        let cmp = &self.cmp;
        sorted::remove_run(&mut self.raw, |item| cmp.compare(value, item))
    }
}

impl<T: Clone, C: Clone, const MULTI: bool> Clone for SortedSet<T, C, MULTI> {
    fn clone(&self) -> Self {
        SortedSet {
            raw: self.raw.clone(),
            cmp: self.cmp.clone(),
        }
    }
}

impl<T: fmt::Debug, C, const MULTI: bool> fmt::Debug for SortedSet<T, C, MULTI> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default, const MULTI: bool> Default for SortedSet<T, C, MULTI> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: PartialEq, C, const MULTI: bool> PartialEq for SortedSet<T, C, MULTI> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C, const MULTI: bool> Eq for SortedSet<T, C, MULTI> {}

impl<T, C: Comparator<T> + Default, const MULTI: bool> FromIterator<T> for SortedSet<T, C, MULTI> {
    /// Collects the items in O(n log n). A distinct set keeps the first of equal items.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        let mut items: Vec<T> = iter.into_iter().collect();
        items.sort_by(|a, b| set.cmp.compare(a, b));
        if !MULTI {
            items.dedup_by(|later, earlier| set.cmp.compare(earlier, later).is_eq());
        }
        sorted::build(&mut set.raw, items);
        set
    }
}

impl<T, C: Comparator<T>, const MULTI: bool> Extend<T> for SortedSet<T, C, MULTI> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_items(iter);
    }
}

impl<T: Ord, const N: usize, const MULTI: bool> From<[T; N]> for SortedSet<T, NaturalOrder, MULTI> {
    /// Converts a `[T; N]` into a set.
    ///
    /// ```
    /// use wbt_collections::WBTreeSet;
    ///
    /// let set1 = WBTreeSet::from([1, 2, 3, 4]);
    /// let set2: WBTreeSet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T, C, const MULTI: bool> IntoIterator for SortedSet<T, C, MULTI> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the set's contents in ascending order.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.raw)
    }
}

impl<'a, T, C, const MULTI: bool> IntoIterator for &'a SortedSet<T, C, MULTI> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
