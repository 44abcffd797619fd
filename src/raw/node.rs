use super::handle::Handle;

/// Which child slot of a parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// A binary tree node augmented with the size of the subtree it roots.
///
/// Links are arena handles. `left` and `right` are owning in the sense that the tree
/// frees a node's children only through the node; `parent` is a plain back-reference
/// used for navigation and is never followed to keep anything alive.
#[derive(Clone)]
pub(crate) struct Node<T> {
    item: T,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    // 1 + size(left) + size(right), kept exact after every structural edit.
    size: usize,
}

impl<T> Node<T> {
    /// Creates a detached leaf.
    pub(crate) const fn new(item: T) -> Self {
        Self {
            item,
            parent: None,
            left: None,
            right: None,
            size: 1,
        }
    }

    #[inline]
    pub(crate) const fn item(&self) -> &T {
        &self.item
    }

    #[inline]
    pub(crate) const fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    pub(crate) fn into_item(self) -> T {
        self.item
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    pub(crate) const fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    pub(crate) const fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) const fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Which side of this node `child` hangs from, if it is a child at all.
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_detached_leaf() {
        let node = Node::new('x');
        assert_eq!(*node.item(), 'x');
        assert_eq!(node.size(), 1);
        assert!(node.parent().is_none() && node.left().is_none() && node.right().is_none());
    }

    #[test]
    fn side_of_reports_the_child_slot() {
        let mut node = Node::new(0);
        let left = Handle::from_index(1);
        let right = Handle::from_index(2);
        node.set_child(Side::Left, Some(left));
        node.set_child(Side::Right, Some(right));

        assert_eq!(node.side_of(left), Some(Side::Left));
        assert_eq!(node.side_of(right), Some(Side::Right));
        assert_eq!(node.side_of(Handle::from_index(3)), None);
        assert_eq!(node.child(Side::Right), Some(right));
    }
}
