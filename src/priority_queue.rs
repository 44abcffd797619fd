//! A double-ended priority queue on a small height-balanced tree.
//!
//! This tree is separate from the weight-balanced kernel used by the other collections:
//! nodes are owned through `Box`, have no parent links or subtree sizes, and are
//! rebalanced AVL-style on the way back up from a recursive insert or pop.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::compare::{ByKey, Comparator, NaturalOrder};
use crate::error::{Error, Result};

type Link<T> = Option<Box<AvlNode<T>>>;

#[derive(Clone)]
struct AvlNode<T> {
    item: T,
    height: u8,
    left: Link<T>,
    right: Link<T>,
}

impl<T> AvlNode<T> {
    fn leaf(item: T) -> Box<Self> {
        Box::new(AvlNode {
            item,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(self.left.as_deref()).max(height(self.right.as_deref()));
    }
}

fn height<T>(link: Option<&AvlNode<T>>) -> u8 {
    link.map_or(0, |node| node.height)
}

fn rotate_right<T>(mut node: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_left<T>(mut node: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Restores `|height(left) - height(right)| <= 1` at `node`, assuming it holds below.
fn balance<T>(mut node: Box<AvlNode<T>>) -> Box<AvlNode<T>> {
    node.update_height();
    let left = height(node.left.as_deref());
    let right = height(node.right.as_deref());

    if left > right + 1 {
        if let Some(child) = node.left.take() {
            let child_leans_right = height(child.right.as_deref()) > height(child.left.as_deref());
            node.left = Some(if child_leans_right { rotate_left(child) } else { child });
        }
        rotate_right(node)
    } else if right > left + 1 {
        if let Some(child) = node.right.take() {
            let child_leans_left = height(child.left.as_deref()) > height(child.right.as_deref());
            node.right = Some(if child_leans_left { rotate_right(child) } else { child });
        }
        rotate_left(node)
    } else {
        node
    }
}

/// Inserts below `link`. Equal items go right, after the ones already present.
fn insert<T, C: Comparator<T>>(link: Link<T>, item: T, comparator: &C) -> Box<AvlNode<T>> {
    let Some(mut node) = link else {
        return AvlNode::leaf(item);
    };
    if comparator.compare(&item, &node.item).is_lt() {
        node.left = Some(insert(node.left.take(), item, comparator));
    } else {
        node.right = Some(insert(node.right.take(), item, comparator));
    }
    balance(node)
}

fn pop_first<T>(mut node: Box<AvlNode<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => {
            let AvlNode { item, right, .. } = *node;
            (right, item)
        }
        Some(left) => {
            let (rest, item) = pop_first(left);
            node.left = rest;
            (Some(balance(node)), item)
        }
    }
}

fn pop_last<T>(mut node: Box<AvlNode<T>>) -> (Link<T>, T) {
    match node.right.take() {
        None => {
            let AvlNode { item, left, .. } = *node;
            (left, item)
        }
        Some(right) => {
            let (rest, item) = pop_last(right);
            node.right = rest;
            (Some(balance(node)), item)
        }
    }
}

/// Builds a perfectly balanced tree from the next `len` items, in order.
fn build<T>(items: &mut alloc::vec::IntoIter<T>, len: usize) -> Link<T> {
    if len == 0 {
        return None;
    }
    let left_len = len / 2;
    let left = build(items, left_len);
    let item = items.next()?;
    let right = build(items, len - left_len - 1);

    let mut node = AvlNode::leaf(item);
    node.left = left;
    node.right = right;
    node.update_height();
    Some(node)
}

/// A priority queue that can pop from either end.
///
/// Items are ordered by a [`Comparator`]; the smallest item is [`first`](Self::first) and
/// the largest is [`last`](Self::last). Items that compare equal leave the queue in the
/// order they entered it, from either end.
///
/// Every operation except [`initialize`](Self::initialize) and iteration is O(log n).
///
/// # Examples
///
/// ```
/// use wbt_collections::TreePriorityQueue;
///
/// let mut tasks = TreePriorityQueue::with_key(|task: &(u8, &str)| task.0);
/// tasks.push((2, "write"));
/// tasks.push((1, "plan"));
/// tasks.push((2, "test"));
///
/// assert_eq!(tasks.pop_first(), Ok((1, "plan")));
/// assert_eq!(tasks.pop_first(), Ok((2, "write")));
/// assert_eq!(tasks.pop_first(), Ok((2, "test")));
/// assert!(tasks.pop_first().is_err());
/// ```
#[derive(Clone)]
pub struct TreePriorityQueue<T, C = NaturalOrder> {
    root: Link<T>,
    len: usize,
    comparator: C,
}

impl<T: Ord> TreePriorityQueue<T> {
    /// Makes a new, empty queue ordered by `T`'s `Ord`.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, F, K> TreePriorityQueue<T, ByKey<F, K>>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    /// Makes a new, empty queue ordered by `key(item)`.
    #[must_use]
    pub const fn with_key(key: F) -> Self {
        Self::with_comparator(ByKey::new(key, NaturalOrder))
    }
}

impl<T, C> TreePriorityQueue<T, C> {
    /// Makes a new, empty queue ordered by `comparator`.
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        TreePriorityQueue {
            root: None,
            len: 0,
            comparator,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        tracing::trace!(len = self.len, "clearing priority queue");
        self.root = None;
        self.len = 0;
    }

    /// Returns the smallest item.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if the queue is empty.
    pub fn first(&self) -> Result<&T> {
        let mut node = self.root.as_deref().ok_or(Error::Empty)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.item)
    }

    /// Returns the largest item.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if the queue is empty.
    pub fn last(&self) -> Result<&T> {
        let mut node = self.root.as_deref().ok_or(Error::Empty)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.item)
    }

    /// Removes and returns the smallest item; the earliest pushed among equals.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if the queue is empty.
    pub fn pop_first(&mut self) -> Result<T> {
        let root = self.root.take().ok_or(Error::Empty)?;
        let (root, item) = pop_first(root);
        self.root = root;
        self.len -= 1;
        Ok(item)
    }

    /// Removes and returns the largest item; the latest pushed among equals.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if the queue is empty.
    pub fn pop_last(&mut self) -> Result<T> {
        let root = self.root.take().ok_or(Error::Empty)?;
        let (root, item) = pop_last(root);
        self.root = root;
        self.len -= 1;
        Ok(item)
    }

    /// Gets an iterator over the items from smallest to largest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len, false)
    }

    /// Gets an iterator over the items from largest to smallest.
    pub fn iter_descending(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len, true)
    }

    /// Consumes the queue, returning its items from smallest to largest.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len);
        while let Ok(item) = self.pop_first() {
            items.push(item);
        }
        items
    }

    #[cfg(test)]
    fn assert_invariants(&self) -> u8 {
        fn check<T>(link: Option<&AvlNode<T>>) -> (u8, usize) {
            let Some(node) = link else {
                return (0, 0);
            };
            let (left, left_len) = check(node.left.as_deref());
            let (right, right_len) = check(node.right.as_deref());
            assert!(left.abs_diff(right) <= 1, "unbalanced node");
            assert_eq!(node.height, 1 + left.max(right));
            (node.height, left_len + right_len + 1)
        }
        let (height, len) = check(self.root.as_deref());
        assert_eq!(len, self.len);
        height
    }
}

impl<T, C: Comparator<T>> TreePriorityQueue<T, C> {
    /// Replaces the contents with `items`.
    ///
    /// The items are stable-sorted and the tree is built directly from the sorted run, so
    /// equal items keep their relative order.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    pub fn initialize<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut items: Vec<T> = items.into_iter().collect();
        items.sort_by(|a, b| self.comparator.compare(a, b));
        let len = items.len();
        self.root = build(&mut items.into_iter(), len);
        self.len = len;
        tracing::debug!(len, "bulk-initialized priority queue");
    }

    /// Adds an item. It leaves the queue after any equal items already in it.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn push(&mut self, item: T) {
        self.root = Some(insert(self.root.take(), item, &self.comparator));
        self.len += 1;
    }

    /// Pushes every item of `items` in turn.
    pub fn push_items<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.push(item);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for TreePriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for TreePriorityQueue<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T>> Extend<T> for TreePriorityQueue<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_items(iter);
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for TreePriorityQueue<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::default();
        queue.initialize(iter);
        queue
    }
}

impl<'a, T, C> IntoIterator for &'a TreePriorityQueue<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// An in-order iterator over a [`TreePriorityQueue`], created by
/// [`iter`](TreePriorityQueue::iter) or [`iter_descending`](TreePriorityQueue::iter_descending).
pub struct Iter<'a, T> {
    stack: SmallVec<[&'a AvlNode<T>; 32]>,
    remaining: usize,
    descending: bool,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a AvlNode<T>>, len: usize, descending: bool) -> Self {
        let mut iter = Iter {
            stack: SmallVec::new(),
            remaining: len,
            descending,
        };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut link: Option<&'a AvlNode<T>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = if self.descending { node.right.as_deref() } else { node.left.as_deref() };
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.remaining -= 1;
        let next = if self.descending { node.left.as_deref() } else { node.right.as_deref() };
        self.descend(next);
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            remaining: self.remaining,
            descending: self.descending,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::compare::Reversed;
    use alloc::vec;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn equal_priorities_leave_in_arrival_order() {
        let mut queue = TreePriorityQueue::with_key(|item: &(i32, usize)| item.0);
        for (serial, priority) in [3, 1, 3, 2, 1, 3].into_iter().enumerate() {
            queue.push((priority, serial));
        }
        assert_eq!(queue.pop_first(), Ok((1, 1)));
        assert_eq!(queue.pop_first(), Ok((1, 4)));
        assert_eq!(queue.pop_last(), Ok((3, 5)));
        assert_eq!(queue.pop_first(), Ok((2, 3)));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![(3, 0), (3, 2)]);
        queue.assert_invariants();
    }

    #[test]
    fn empty_queue_reports_errors() {
        let mut queue: TreePriorityQueue<u8> = TreePriorityQueue::new();
        assert_eq!(queue.first(), Err(Error::Empty));
        assert_eq!(queue.last(), Err(Error::Empty));
        assert_eq!(queue.pop_first(), Err(Error::Empty));
        assert_eq!(queue.pop_last(), Err(Error::Empty));
        assert_eq!(queue.iter().next(), None);
    }

    #[test]
    fn initialize_is_a_stable_sort() {
        let mut queue = TreePriorityQueue::with_key(|item: &(u8, char)| item.0);
        queue.push((0, 'z'));
        queue.initialize([(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')]);
        assert_eq!(queue.len(), 4);
        assert_eq!((queue.first(), queue.last()), (Ok(&(1, 'b')), Ok(&(2, 'c'))));
        queue.assert_invariants();
        assert_eq!(queue.into_sorted_vec(), vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn reversed_comparator_and_descending_iteration() {
        let mut queue = TreePriorityQueue::with_comparator(Reversed(NaturalOrder));
        queue.extend([5, 1, 4]);
        assert_eq!(queue.first(), Ok(&5));
        assert_eq!(queue.iter_descending().copied().collect::<Vec<_>>(), vec![1, 4, 5]);
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn height_stays_logarithmic() {
        let mut queue = TreePriorityQueue::new();
        queue.push_items(0..4096);
        // AVL height is below 1.45 * log2(n + 2).
        assert!(queue.assert_invariants() <= 17);
        for _ in 0..2048 {
            queue.pop_first().unwrap();
        }
        assert!(queue.assert_invariants() <= 16);
    }

    proptest! {
        #[test]
        fn pops_match_a_stable_sort(
            items in prop::collection::vec((0u8..8, any::<u16>()), 0..200),
            from_back in prop::collection::vec(any::<bool>(), 0..200),
        ) {
            let mut queue = TreePriorityQueue::with_key(|item: &(u8, u16)| item.0);
            queue.push_items(items.iter().copied());
            let mut model = items.clone();
            model.sort_by_key(|item| item.0);
            let mut model: alloc::collections::VecDeque<_> = model.into();

            for back in from_back {
                let expected = if back { model.pop_back() } else { model.pop_front() };
                let actual = if back { queue.pop_last() } else { queue.pop_first() };
                prop_assert_eq!(actual.ok(), expected);
            }
            prop_assert_eq!(queue.iter().copied().collect::<Vec<_>>(), Vec::from(model));
            queue.assert_invariants();
        }
    }
}
