//! Borrowed views of individual tree nodes.

use core::fmt;

use crate::raw::{Handle, RawWBTree, Visit};

/// A stable identifier for a node of a tree-backed collection.
///
/// A `NodeId` stays valid until its node is removed. After that it is stale: every
/// collection rejects it (`None` or [`Error::InvalidNode`](crate::Error::InvalidNode)),
/// even once the storage it pointed at has been reused for a new node. Ids are also
/// rejected by every other collection, except a clone made while the node was live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    handle: Handle,
    generation: u64,
}

impl NodeId {
    pub(crate) fn resolve<T>(self, tree: &RawWBTree<T>) -> Option<Handle> {
        tree.resolve(self.handle, self.generation)
    }
}

/// A shared reference to one node of a tree-backed collection.
///
/// Besides the item, a `NodeRef` exposes the node's position: its in-order neighbours,
/// its rank, and the shape of the subtree it roots. Every method borrows the collection
/// immutably, so a `NodeRef` cannot outlive a structural edit; keep a [`NodeId`] for that.
///
/// # Examples
///
/// ```
/// use wbt_collections::WBTreeMultiSet;
///
/// let set = WBTreeMultiSet::from([1, 3, 5, 5, 8]);
/// let node = set.first_where(|&x| x >= 5).unwrap();
/// assert_eq!(*node.item(), 5);
/// assert_eq!(node.index(), 2);
/// assert_eq!(node.next().map(|n| *n.item()), Some(5));
/// assert_eq!(node.previous().map(|n| *n.item()), Some(3));
/// ```
pub struct NodeRef<'a, T> {
    tree: &'a RawWBTree<T>,
    handle: Handle,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) const fn new(tree: &'a RawWBTree<T>, handle: Handle) -> Self {
        Self {
            tree,
            handle,
        }
    }

    pub(crate) fn wrap(tree: &'a RawWBTree<T>, handle: Option<Handle>) -> Option<Self> {
        handle.map(|handle| Self::new(tree, handle))
    }

    pub(crate) const fn handle(&self) -> Handle {
        self.handle
    }

    /// The item stored in this node.
    #[must_use]
    pub fn item(&self) -> &'a T {
        self.tree.item(self.handle)
    }

    /// An identifier that outlives this borrow and can be handed back to the collection.
    #[must_use]
    pub fn id(&self) -> NodeId {
        NodeId {
            handle: self.handle,
            // A node reachable through a borrow of its tree is always live.
            generation: self.tree.generation(self.handle).unwrap_or_default(),
        }
    }

    /// The zero-based in-order position of this node. O(log n).
    #[must_use]
    pub fn index(&self) -> usize {
        self.tree.index_of(self.handle)
    }

    /// Number of nodes in the subtree rooted here, this node included.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        self.tree.node(self.handle).size()
    }

    /// The in-order successor.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        Self::wrap(self.tree, self.tree.next(self.handle))
    }

    /// The in-order predecessor.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        Self::wrap(self.tree, self.tree.prev(self.handle))
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        Self::wrap(self.tree, self.tree.node(self.handle).parent())
    }

    #[must_use]
    pub fn left(&self) -> Option<Self> {
        Self::wrap(self.tree, self.tree.node(self.handle).left())
    }

    #[must_use]
    pub fn right(&self) -> Option<Self> {
        Self::wrap(self.tree, self.tree.node(self.handle).right())
    }

    /// The leftmost node of the subtree rooted here.
    #[must_use]
    pub fn first_in_subtree(&self) -> Self {
        Self::new(self.tree, self.tree.first_in(self.handle))
    }

    /// The rightmost node of the subtree rooted here.
    #[must_use]
    pub fn last_in_subtree(&self) -> Self {
        Self::new(self.tree, self.tree.last_in(self.handle))
    }

    /// Depth-first walk of the subtree rooted here.
    ///
    /// `pre` sees each node before its children, `in_order` between them and `post` after
    /// both. Pass `|_| {}` for the orders you do not need.
    ///
    /// ```
    /// use wbt_collections::WBTreeList;
    ///
    /// let list = WBTreeList::from([1, 2, 3]);
    /// let mut pre = Vec::new();
    /// let mut post = Vec::new();
    /// list.root().unwrap().walk(|n| pre.push(*n.item()), |_| {}, |n| post.push(*n.item()));
    /// assert_eq!(pre, [2, 1, 3]);
    /// assert_eq!(post, [1, 3, 2]);
    /// ```
    pub fn walk<Pre, In, Post>(&self, mut pre: Pre, mut in_order: In, mut post: Post)
    where
        Pre: FnMut(NodeRef<'a, T>),
        In: FnMut(NodeRef<'a, T>),
        Post: FnMut(NodeRef<'a, T>),
    {
        let tree = self.tree;
        tree.walk(self.handle, &mut |handle, visit| {
            let node = NodeRef::new(tree, handle);
            match visit {
                Visit::Pre => pre(node),
                Visit::In => in_order(node),
                Visit::Post => post(node),
            }
        });
    }
}

impl<'a, K, V> NodeRef<'a, (K, V)> {
    /// The key of a map entry.
    #[must_use]
    pub fn key(&self) -> &'a K {
        &self.item().0
    }

    /// The value of a map entry.
    #[must_use]
    pub fn value(&self) -> &'a V {
        &self.item().1
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef").field("item", self.item()).field("subtree_len", &self.subtree_len()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;
    use static_assertions::{assert_eq_size, assert_impl_all};

    assert_impl_all!(NodeId: Copy, Eq, core::hash::Hash, fmt::Debug);
    assert_impl_all!(NodeRef<'static, u8>: Copy, Eq);
    assert_eq_size!(Option<NodeId>, NodeId);

    fn tree_of(items: Vec<i32>) -> RawWBTree<i32> {
        let mut tree = RawWBTree::new();
        tree.build(items);
        tree
    }

    #[test]
    fn navigation_follows_in_order() {
        let tree = tree_of((0..7).collect());
        let root = NodeRef::wrap(&tree, tree.root()).unwrap();
        assert_eq!(*root.item(), 3);
        assert_eq!(root.subtree_len(), 7);
        assert_eq!(*root.first_in_subtree().item(), 0);
        assert_eq!(*root.last_in_subtree().item(), 6);

        let left = root.left().unwrap();
        assert_eq!(*left.item(), 1);
        assert_eq!(left.parent(), Some(root));
        assert_eq!(*left.right().unwrap().item(), 2);
        assert_eq!(left.next().map(|n| n.index()), Some(2));
        assert!(root.parent().is_none());
        assert!(root.first_in_subtree().previous().is_none());
    }

    #[test]
    fn ids_survive_unrelated_edits_and_expire_on_removal() {
        let mut tree = tree_of(vec![10, 20, 30]);
        let id = NodeRef::wrap(&tree, tree.get_at(1)).unwrap().id();
        let first = tree.get_at(0).unwrap();
        tree.remove(first);
        let handle = id.resolve(&tree).unwrap();
        assert_eq!(*tree.item(handle), 20);

        tree.remove(handle);
        assert_eq!(id.resolve(&tree), None);
    }

    #[test]
    fn walk_visits_subtree_in_three_orders() {
        let tree = tree_of(vec![1, 2, 3, 4, 5]);
        let root = NodeRef::wrap(&tree, tree.root()).unwrap();
        let (mut pre, mut inorder, mut post) = (Vec::new(), Vec::new(), Vec::new());
        root.walk(|n| pre.push(*n.item()), |n| inorder.push(*n.item()), |n| post.push(*n.item()));
        assert_eq!(inorder, vec![1, 2, 3, 4, 5]);
        assert_eq!(pre[0], 3);
        assert_eq!(post[4], 3);
    }

    #[test]
    fn map_nodes_expose_key_and_value() {
        let mut tree = RawWBTree::new();
        tree.build(vec![("a", 1), ("b", 2)]);
        let node = NodeRef::wrap(&tree, tree.last()).unwrap();
        assert_eq!((*node.key(), *node.value()), ("b", 2));
    }
}
