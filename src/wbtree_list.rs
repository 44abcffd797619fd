//! A sequence with O(log n) positional insert and remove.

use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut, RangeBounds};

use crate::error::{Error, Result};
use crate::iter::{IntoIter, Iter};
use crate::node::{NodeId, NodeRef};
use crate::raw::{Descend, Handle, RawWBTree, Slot};
use crate::sorted;

/// A list addressed by position, backed by a weight-balanced tree.
///
/// Items keep the order they were inserted in; there is no comparator. Unlike `Vec`,
/// inserting or removing anywhere costs O(log n), as does indexing.
///
/// Out-of-range positions are errors here, not misses: the fallible methods return
/// [`Error::IndexOutOfRange`] and the `[]` operators panic. [`get`](Self::get) and
/// [`get_at`](Self::get_at) are the non-failing lookups.
///
/// # Examples
///
/// ```
/// use wbt_collections::WBTreeList;
///
/// let mut list = WBTreeList::from([10, 20, 30]);
/// list.insert(1, 99).unwrap();
/// assert!(list.iter().eq(&[10, 99, 20, 30]));
///
/// list.remove_at(0).unwrap();
/// assert!(list.iter().eq(&[99, 20, 30]));
/// assert_eq!(list[1], 20);
/// ```
pub struct WBTreeList<T> {
    raw: RawWBTree<T>,
}

impl<T> WBTreeList<T> {
    /// Makes a new, empty list.
    #[must_use]
    pub const fn new() -> Self {
        WBTreeList {
            raw: RawWBTree::new(),
        }
    }

    /// Creates an empty list with room for at least `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        WBTreeList {
            raw: RawWBTree::with_capacity(capacity),
        }
    }

    /// Returns the number of items the list can hold without reallocating its node storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Replaces the contents with `items`, kept in the given order.
    ///
    /// # Complexity
    ///
    /// O(n): the tree is built directly, without rotations.
    pub fn initialize<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        sorted::build(&mut self.raw, items.into_iter().collect());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn clear(&mut self) {
        tracing::trace!(len = self.raw.len(), "clearing list");
        self.raw.clear();
    }

    fn check_index(&self, index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.raw.len(),
            })
        }
    }

    fn handle_at(&self, index: usize) -> Result<Handle> {
        self.raw.get_at(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.raw.len(),
        })
    }

    /// Returns a reference to the item at `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.raw.get_at(index).map(|handle| self.raw.item(handle))
    }

    /// Returns a mutable reference to the item at `index`, or `None` if out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.raw.get_at(index).map(|handle| self.raw.item_mut(handle))
    }

    /// The node at `index`, or `None` if out of range.
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, self.raw.get_at(index))
    }

    /// Replaces the item at `index` and returns the old one.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len()`.
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        let handle = self.handle_at(index)?;
        Ok(core::mem::replace(self.raw.item_mut(handle), item))
    }

    /// Inserts `item` so that it ends up at position `index`, shifting later items back.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len()`. The list is unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wbt_collections::{Error, WBTreeList};
    ///
    /// let mut list = WBTreeList::from(['a', 'c']);
    /// list.insert(1, 'b').unwrap();
    /// list.insert(3, 'd').unwrap();
    /// assert!(list.iter().eq(&['a', 'b', 'c', 'd']));
    /// assert_eq!(list.insert(9, 'z'), Err(Error::IndexOutOfRange { index: 9, len: 4 }));
    /// ```
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        self.check_index(index, self.raw.len() + 1)?;
        self.insert_unchecked(index, item);
        Ok(())
    }

    fn insert_unchecked(&mut self, index: usize, item: T) -> Handle {
        let mut target = index;
        let slot = self.raw.locate(|_, left_size| {
            if target <= left_size {
                Descend::Left
            } else {
                target -= left_size + 1;
                Descend::Right
            }
        });

        match slot {
            Slot::Vacant(at) => self.raw.attach(at, item),
            // Positional routing never stops on a node.
            Slot::Occupied(handle) => handle,
        }
    }

    /// Prepends an item.
    pub fn push_front(&mut self, item: T) {
        self.insert_unchecked(0, item);
    }

    /// Appends an item.
    pub fn push_back(&mut self, item: T) {
        self.insert_unchecked(self.raw.len(), item);
    }

    /// Inserts `items` in order starting at `index`, returning how many were inserted.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index > len()`. The list is unchanged.
    pub fn insert_items<I>(&mut self, index: usize, items: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_index(index, self.raw.len() + 1)?;
        let mut count = 0;
        for item in items {
            self.insert_unchecked(index + count, item);
            count += 1;
        }
        Ok(count)
    }

    /// Inserts `items` in order at the front, returning how many were inserted.
    pub fn prepend_items<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut count = 0;
        for item in items {
            self.insert_unchecked(count, item);
            count += 1;
        }
        count
    }

    /// Removes and returns the item at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let handle = self.handle_at(index)?;
        Ok(self.raw.remove(handle))
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.raw.first().map(|handle| self.raw.remove(handle))
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.raw.last().map(|handle| self.raw.remove(handle))
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| self.raw.item(handle))
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|handle| self.raw.item(handle))
    }

    /// Iterates over the items at the positions in `range`, clamped to `0..len()`.
    pub fn range<R>(&self, range: R) -> Iter<'_, T>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = sorted::clamp_range(&range, self.raw.len());
        Iter::between(&self.raw, start, end)
    }

    /// Removes the items at the positions in `range` (clamped), returning how many.
    ///
    /// ```
    /// use wbt_collections::WBTreeList;
    ///
    /// let mut list: WBTreeList<_> = (0..10).collect();
    /// assert_eq!(list.remove_range(2..5), 3);
    /// assert_eq!(list.remove_range(5..), 2);
    /// assert!(list.iter().eq(&[0, 1, 5, 6, 7]));
    /// ```
    pub fn remove_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        sorted::remove_range(&mut self.raw, range)
    }

    /// Gets an iterator over the items in list order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw)
    }

    /// Gets a mutable iterator over the items in list order.
    pub fn iter_mut(&mut self) -> alloc::vec::IntoIter<&mut T> {
        self.raw.items_mut().into_iter()
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
}

impl<T> Index<usize> for WBTreeList<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(item) => item,
            None => panic!("`WBTreeList::index()` - index {index} is out of range for length {}", self.len()),
        }
    }
}

impl<T> IndexMut<usize> for WBTreeList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(item) => item,
            None => panic!("`WBTreeList::index_mut()` - index {index} is out of range for length {len}"),
        }
    }
}

impl<T: Clone> Clone for WBTreeList<T> {
    fn clone(&self) -> Self {
        WBTreeList {
            raw: self.raw.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for WBTreeList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for WBTreeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for WBTreeList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for WBTreeList<T> {}

impl<T> FromIterator<T> for WBTreeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.initialize(iter);
        list
    }
}

impl<T> Extend<T> for WBTreeList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for WBTreeList<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for WBTreeList<T> {
    fn from(items: Vec<T>) -> Self {
        let mut list = Self::new();
        sorted::build(&mut list.raw, items);
        list
    }
}

impl<T> IntoIterator for WBTreeList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.raw)
    }
}

impl<'a, T> IntoIterator for &'a WBTreeList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
