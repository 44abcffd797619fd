//! A linked list whose nodes also know their position.

use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, Result};
use crate::iter::{IntoIter, Iter};
use crate::node::{NodeId, NodeRef};
use crate::raw::{Handle, RawWBTree, Slot};
use crate::sorted;

/// A doubly linked list built on a weight-balanced tree.
///
/// Nodes are addressed by [`NodeId`], which stays valid until that node is removed, so
/// the usual linked-list edits (insert next to a node, unlink a node) work as expected.
/// Because the list is a tree underneath, a node's position ([`index_of`](Self::index_of))
/// and the node at a position ([`get_at`](Self::get_at)) are O(log n) as well.
///
/// An id whose node has been removed is rejected with [`Error::InvalidNode`]; it never
/// aliases a node inserted later.
///
/// # Examples
///
/// ```
/// use wbt_collections::WBTreeLinkedList;
///
/// let mut list = WBTreeLinkedList::new();
/// let b = list.push_back('b');
/// list.push_front('a');
/// let d = list.push_back('d');
/// let c = list.add_before(d, 'c').unwrap();
///
/// assert!(list.iter().eq(&['a', 'b', 'c', 'd']));
/// assert_eq!(list.index_of(c), Ok(2));
///
/// assert_eq!(list.remove(b), Ok('b'));
/// assert!(list.remove(b).is_err());
/// assert_eq!(list.index_of(c), Ok(1));
/// ```
pub struct WBTreeLinkedList<T> {
    raw: RawWBTree<T>,
}

impl<T> WBTreeLinkedList<T> {
    #[must_use]
    pub const fn new() -> Self {
        WBTreeLinkedList {
            raw: RawWBTree::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        WBTreeLinkedList {
            raw: RawWBTree::with_capacity(capacity),
        }
    }

    /// Replaces the contents with `items` in the given order. Ids of earlier nodes expire.
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
        tracing::trace!(len = self.raw.len(), "clearing linked list");
        self.raw.clear();
    }

    fn resolve(&self, id: NodeId) -> Result<Handle> {
        id.resolve(&self.raw).ok_or(Error::InvalidNode)
    }

    fn attach(&mut self, slot: Slot, item: T) -> NodeId {
        let handle = match slot {
            Slot::Vacant(at) => self.raw.attach(at, item),
            Slot::Occupied(handle) => handle,
        };
        self.id_of(handle)
    }

    fn id_of(&self, handle: Handle) -> NodeId {
        NodeRef::new(&self.raw, handle).id()
    }

    /// The first node.
    #[must_use]
    pub fn front(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, self.raw.first())
    }

    /// The last node.
    #[must_use]
    pub fn back(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, self.raw.last())
    }

    /// Inserts `item` at the front and returns its id.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn push_front(&mut self, item: T) -> NodeId {
        let slot = match self.raw.first() {
            Some(first) => self.raw.slot_before(first),
            None => Slot::Vacant(None),
        };
        self.attach(slot, item)
    }

    /// Inserts `item` at the back and returns its id.
    pub fn push_back(&mut self, item: T) -> NodeId {
        let slot = match self.raw.last() {
            Some(last) => self.raw.slot_after(last),
            None => Slot::Vacant(None),
        };
        self.attach(slot, item)
    }

    /// Inserts `item` immediately before the node `id` and returns the new node's id.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNode`] if `id` does not name a live node of this list.
    pub fn add_before(&mut self, id: NodeId, item: T) -> Result<NodeId> {
        let handle = self.resolve(id)?;
        let slot = self.raw.slot_before(handle);
        Ok(self.attach(slot, item))
    }

    /// Inserts `item` immediately after the node `id` and returns the new node's id.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNode`] if `id` does not name a live node of this list.
    pub fn add_after(&mut self, id: NodeId, item: T) -> Result<NodeId> {
        let handle = self.resolve(id)?;
        let slot = self.raw.slot_after(handle);
        Ok(self.attach(slot, item))
    }

    /// Unlinks the node `id` and returns its item.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNode`] if `id` does not name a live node of this list.
    pub fn remove(&mut self, id: NodeId) -> Result<T> {
        let handle = self.resolve(id)?;
        Ok(self.raw.remove(handle))
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.raw.first().map(|handle| self.raw.remove(handle))
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.raw.last().map(|handle| self.raw.remove(handle))
    }

    /// Looks up a node by id. Returns `None` once the node has been removed.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, id.resolve(&self.raw))
    }

    /// The item of the node `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        id.resolve(&self.raw).map(|handle| self.raw.item(handle))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        id.resolve(&self.raw).map(|handle| self.raw.item_mut(handle))
    }

    /// The node at position `index`.
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(&self.raw, self.raw.get_at(index))
    }

    /// The position of the node `id`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidNode`] if `id` does not name a live node of this list.
    pub fn index_of(&self, id: NodeId) -> Result<usize> {
        let handle = self.resolve(id)?;
        Ok(self.raw.index_of(handle))
    }

    /// Gets an iterator over the items from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw)
    }
}

impl<T: Clone> Clone for WBTreeLinkedList<T> {
    /// Clones the list. Node ids of `self` also resolve in the clone, to the copied node.
    fn clone(&self) -> Self {
        WBTreeLinkedList {
            raw: self.raw.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for WBTreeLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for WBTreeLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for WBTreeLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for WBTreeLinkedList<T> {}

impl<T> FromIterator<T> for WBTreeLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.initialize(iter);
        list
    }
}

impl<T> Extend<T> for WBTreeLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for WBTreeLinkedList<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for WBTreeLinkedList<T> {
    fn from(items: Vec<T>) -> Self {
        let mut list = Self::new();
        sorted::build(&mut list.raw, items);
        list
    }
}

impl<T> IntoIterator for WBTreeLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.raw)
    }
}

impl<'a, T> IntoIterator for &'a WBTreeLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn items<T: Clone>(list: &WBTreeLinkedList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn edits_next_to_nodes() {
        let mut list = WBTreeLinkedList::new();
        let three = list.push_back(3);
        let one = list.push_front(1);
        list.add_after(one, 2).unwrap();
        list.add_after(three, 5).unwrap();
        let last = list.back().unwrap().id();
        list.add_before(last, 4).unwrap();
        assert_eq!(items(&list), vec![1, 2, 3, 4, 5]);
        assert_eq!(list.index_of(three), Ok(2));
        assert_eq!(list.get_at(4).map(|node| *node.item()), Some(5));
        list.raw.assert_invariants();
    }

    #[test]
    fn removed_ids_are_rejected() {
        let mut list: WBTreeLinkedList<_> = ['x', 'y'].into();
        let x = list.front().unwrap().id();
        assert_eq!(list.remove(x), Ok('x'));

        // The slot is reused by the next node, but the old id stays dead.
        let z = list.push_back('z');
        assert_eq!(list.get(x), None);
        assert_eq!(list.remove(x), Err(Error::InvalidNode));
        assert_eq!(list.add_before(x, 'w'), Err(Error::InvalidNode));
        assert_eq!(list.add_after(x, 'w'), Err(Error::InvalidNode));
        assert_eq!(list.index_of(x), Err(Error::InvalidNode));
        assert_eq!(list.get(z), Some(&'z'));
    }

    #[test]
    fn ids_survive_rebalancing() {
        let mut list = WBTreeLinkedList::new();
        let ids: Vec<NodeId> = (0..200).map(|i| list.push_back(i)).collect();
        for id in ids.iter().step_by(3) {
            list.remove(*id).unwrap();
        }
        for (i, id) in ids.iter().enumerate().filter(|(i, _)| i % 3 != 0) {
            assert_eq!(list.get(*id), Some(&i));
        }
        if let Some(value) = list.get_mut(ids[1]) {
            *value = 1000;
        }
        assert_eq!(list.front().map(|node| *node.item()), Some(1000));
        list.raw.assert_invariants();
    }

    #[test]
    fn pops_and_clear() {
        let mut list = WBTreeLinkedList::from(vec![1, 2, 3]);
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_front(), Some(1));
        list.clear();
        assert!(list.is_empty());
        assert!(list.front().is_none() && list.back().is_none());
        assert_eq!(list.pop_front(), None);
    }
}
