//! Iterators shared by the tree-backed collections.

use alloc::vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Handle, RawWBTree};

/// An in-order iterator over the items of a tree-backed collection.
///
/// Created by the `iter` method of every collection in this crate. Each step is
/// amortized O(1) and worst-case O(log n).
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
/// assert_eq!(iter.len(), 1);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    tree: &'a RawWBTree<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a RawWBTree<T>) -> Self {
        Self {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }

    /// Iterates the positions `start..end`, already clamped by the caller.
    pub(crate) fn between(tree: &'a RawWBTree<T>, start: usize, end: usize) -> Self {
        if start >= end {
            return Self {
                tree,
                front: None,
                back: None,
                remaining: 0,
            };
        }

        Self {
            tree,
            front: tree.get_at(start),
            back: tree.get_at(end - 1),
            remaining: end - start,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.next(handle);
        Some(self.tree.item(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.prev(handle);
        Some(self.tree.item(handle))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning in-order iterator, created by `into_iter` on the collections.
pub struct IntoIter<T> {
    inner: vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(mut tree: RawWBTree<T>) -> Self {
        Self {
            inner: tree.drain_to_vec().into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}

/// Ascending iterator over a predicate-bounded run of items.
///
/// Starts at the first item satisfying the start predicate and stops before the first
/// item that fails the end predicate. Created by the `items_where` methods.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ItemsWhere<'a, T, E> {
    tree: &'a RawWBTree<T>,
    current: Option<Handle>,
    end: E,
}

impl<'a, T, E> ItemsWhere<'a, T, E>
where
    E: FnMut(&T) -> bool,
{
    pub(crate) fn new<S>(tree: &'a RawWBTree<T>, start: S, end: E) -> Self
    where
        S: FnMut(&T) -> bool,
    {
        Self {
            tree,
            current: tree.first_where(start),
            end,
        }
    }
}

impl<'a, T, E> Iterator for ItemsWhere<'a, T, E>
where
    E: FnMut(&T) -> bool,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let handle = self.current?;
        let item = self.tree.item(handle);
        if (self.end)(item) {
            self.current = self.tree.next(handle);
            Some(item)
        } else {
            self.current = None;
            None
        }
    }
}

impl<T, E> FusedIterator for ItemsWhere<'_, T, E> where E: FnMut(&T) -> bool {}

/// Descending iterator over a predicate-bounded run of items.
///
/// Starts at the last item satisfying the end predicate and walks backwards while the
/// start predicate holds. Created by the `items_where_rev` methods.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ItemsWhereRev<'a, T, S> {
    tree: &'a RawWBTree<T>,
    current: Option<Handle>,
    start: S,
}

impl<'a, T, S> ItemsWhereRev<'a, T, S>
where
    S: FnMut(&T) -> bool,
{
    pub(crate) fn new<E>(tree: &'a RawWBTree<T>, start: S, end: E) -> Self
    where
        E: FnMut(&T) -> bool,
    {
        Self {
            tree,
            current: tree.last_where(end),
            start,
        }
    }
}

impl<'a, T, S> Iterator for ItemsWhereRev<'a, T, S>
where
    S: FnMut(&T) -> bool,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let handle = self.current?;
        let item = self.tree.item(handle);
        if (self.start)(item) {
            self.current = self.tree.prev(handle);
            Some(item)
        } else {
            self.current = None;
            None
        }
    }
}

impl<T, S> FusedIterator for ItemsWhereRev<'_, T, S> where S: FnMut(&T) -> bool {}
