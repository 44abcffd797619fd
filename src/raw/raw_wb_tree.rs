use alloc::vec::Vec;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// Routing decision made at each node while descending to an insertion point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Descend {
    Left,
    Right,
    /// The current node already satisfies the request; do not insert.
    Stop,
}

/// Result of [`RawWBTree::locate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Slot {
    /// Routing stopped on an existing node.
    Occupied(Handle),
    /// An empty child slot. `None` means the tree is empty and the new node becomes the root.
    Vacant(Option<(Handle, Side)>),
}

/// Visit order reported by [`RawWBTree::walk`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Visit {
    Pre,
    In,
    Post,
}

/// Handles collected ahead of a bulk removal.
pub(crate) type HandleBatch = SmallVec<[Handle; 16]>;

/// The weight-balanced kernel shared by every tree-backed collection in this crate.
///
/// The kernel knows nothing about ordering. Callers decide where an item goes through
/// [`locate`](Self::locate) (comparator or index routing) or the positional slots
/// [`slot_before`](Self::slot_before)/[`slot_after`](Self::slot_after), then hand the
/// slot to [`attach`](Self::attach), which links the leaf and rebalances up to the root.
///
/// Balance rule: with `lc = size(left) + 1` and `rc = size(right) + 1`, a node with
/// `lc > 2 * rc` is rotated right and one with `rc > 2 * lc` is rotated left. The rule is
/// applied at every ancestor of the edited position, after insertions and removals alike.
pub(crate) struct RawWBTree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
}

impl<T> RawWBTree<T> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of items in the tree: the root's subtree size.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    #[inline]
    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn item(&self, handle: Handle) -> &T {
        self.nodes.get(handle).item()
    }

    /// Replaces nothing structurally; callers must not change the item's ordering key.
    #[inline]
    pub(crate) fn item_mut(&mut self, handle: Handle) -> &mut T {
        self.nodes.get_mut(handle).item_mut()
    }

    /// Mutable references to every item, in order.
    pub(crate) fn items_mut(&mut self) -> Vec<&mut T> {
        let order = self.handles_in(0, self.len());
        let mut slots: Vec<Option<&mut Node<T>>> = self.nodes.slots_mut().collect();
        order.iter().filter_map(|handle| slots[handle.to_index()].take().map(Node::item_mut)).collect()
    }

    /// Generation stamp of a live node, used to mint and validate public node ids.
    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> Option<u64> {
        self.nodes.generation(handle)
    }

    /// Returns `handle` if it still names the node allocated under `generation`.
    pub(crate) fn resolve(&self, handle: Handle, generation: u64) -> Option<Handle> {
        (self.nodes.generation(handle) == Some(generation)).then_some(handle)
    }

    #[inline]
    pub(crate) fn size_of(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |handle| self.nodes.get(handle).size())
    }

    #[inline]
    fn left_size(&self, handle: Handle) -> usize {
        self.size_of(self.nodes.get(handle).left())
    }

    // ─── Navigation ──────────────────────────────────────────────────────────

    /// Leftmost node of the subtree rooted at `handle`.
    pub(crate) fn first_in(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        handle
    }

    /// Rightmost node of the subtree rooted at `handle`.
    pub(crate) fn last_in(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        handle
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.first_in(root))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.last_in(root))
    }

    /// In-order successor.
    pub(crate) fn next(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right() {
            return Some(self.first_in(right));
        }

        // Climb until we arrive from a left child.
        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent() {
            if self.nodes.get(parent).left() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// In-order predecessor.
    pub(crate) fn prev(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.nodes.get(handle).left() {
            return Some(self.last_in(left));
        }

        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent() {
            if self.nodes.get(parent).right() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// The node at in-order position `index`, or `None` when out of range.
    pub(crate) fn get_at(&self, mut index: usize) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size_of(node.left());
            match index.cmp(&left_size) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    index -= left_size + 1;
                    current = node.right();
                }
            }
        }
        None
    }

    /// In-order position of `handle`.
    pub(crate) fn index_of(&self, handle: Handle) -> usize {
        let mut index = self.left_size(handle);
        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent() {
            if self.nodes.get(parent).right() == Some(current) {
                index += self.left_size(parent) + 1;
            }
            current = parent;
        }
        index
    }

    // ─── Boundary search ─────────────────────────────────────────────────────
    //
    // The predicate variants assume `pred` is monotonic over the in-order sequence:
    // false..false true..true for the `first` forms, true..true false..false for the
    // `last` forms. A non-monotonic predicate yields some node, not a crash.

    /// Leftmost node for which `pred` holds.
    pub(crate) fn first_where<P>(&self, mut pred: P) -> Option<Handle>
    where
        P: FnMut(&T) -> bool,
    {
        let mut found = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if pred(node.item()) {
                found = Some(handle);
                current = node.left();
            } else {
                current = node.right();
            }
        }
        found
    }

    /// Rightmost node for which `pred` holds.
    pub(crate) fn last_where<P>(&self, mut pred: P) -> Option<Handle>
    where
        P: FnMut(&T) -> bool,
    {
        let mut found = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if pred(node.item()) {
                found = Some(handle);
                current = node.right();
            } else {
                current = node.left();
            }
        }
        found
    }

    /// Index of the leftmost node for which `pred` holds, or `len()` if there is none.
    pub(crate) fn first_index_where<P>(&self, mut pred: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let mut found = self.len();
        let mut offset = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size_of(node.left());
            if pred(node.item()) {
                found = offset + left_size;
                current = node.left();
            } else {
                offset += left_size + 1;
                current = node.right();
            }
        }
        found
    }

    /// Index of the rightmost node for which `pred` holds.
    pub(crate) fn last_index_where<P>(&self, mut pred: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let mut found = None;
        let mut offset = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size_of(node.left());
            if pred(node.item()) {
                found = Some(offset + left_size);
                offset += left_size + 1;
                current = node.right();
            } else {
                current = node.left();
            }
        }
        found
    }

    /// Leftmost node whose item compares equal under `probe`.
    ///
    /// `probe(item)` returns the ordering of the sought key relative to `item`.
    pub(crate) fn find_first<P>(&self, mut probe: P) -> Option<Handle>
    where
        P: FnMut(&T) -> Ordering,
    {
        let mut found = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match probe(node.item()) {
                Ordering::Equal => {
                    found = Some(handle);
                    current = node.left();
                }
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
            }
        }
        found
    }

    /// Rightmost node whose item compares equal under `probe`.
    pub(crate) fn find_last<P>(&self, mut probe: P) -> Option<Handle>
    where
        P: FnMut(&T) -> Ordering,
    {
        let mut found = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match probe(node.item()) {
                Ordering::Equal => {
                    found = Some(handle);
                    current = node.right();
                }
                Ordering::Greater => current = node.right(),
                Ordering::Less => current = node.left(),
            }
        }
        found
    }

    /// Number of items in the contiguous run where `probe` reports equality.
    pub(crate) fn count_matching<P>(&self, mut probe: P) -> usize
    where
        P: FnMut(&T) -> Ordering,
    {
        // Rank difference of the run's boundaries; no scan over the run itself.
        let start = self.first_index_where(|item| probe(item) != Ordering::Greater);
        let end = self.first_index_where(|item| probe(item) == Ordering::Less);
        end.saturating_sub(start)
    }

    /// Number of nodes from the first where `start` holds through the last where `end` holds.
    pub(crate) fn count_between<S, E>(&self, start: S, end: E) -> usize
    where
        S: FnMut(&T) -> bool,
        E: FnMut(&T) -> bool,
    {
        let first = self.first_index_where(start);
        self.last_index_where(end).map_or(0, |last| (last + 1).saturating_sub(first))
    }

    /// Handles from the first node where `start` holds, stepping forward while `end` holds.
    pub(crate) fn handles_between<S, E>(&self, start: S, mut end: E) -> HandleBatch
    where
        S: FnMut(&T) -> bool,
        E: FnMut(&T) -> bool,
    {
        let mut handles = HandleBatch::new();
        let mut current = self.first_where(start);
        while let Some(handle) = current {
            if !end(self.item(handle)) {
                break;
            }
            handles.push(handle);
            current = self.next(handle);
        }
        handles
    }

    /// Handles of the nodes at positions `start..end`, clamped to the tree.
    pub(crate) fn handles_in(&self, start: usize, end: usize) -> HandleBatch {
        let end = end.min(self.len());
        let mut handles = HandleBatch::new();
        if start >= end {
            return handles;
        }

        let mut current = self.get_at(start);
        for _ in start..end {
            let Some(handle) = current else { break };
            handles.push(handle);
            current = self.next(handle);
        }
        handles
    }

    // ─── Insertion ───────────────────────────────────────────────────────────

    /// Descends from the root letting `route` pick a direction at every node.
    ///
    /// `route` receives the node's item and the size of its left subtree, so it can
    /// route by comparison or by position.
    pub(crate) fn locate<R>(&self, mut route: R) -> Slot
    where
        R: FnMut(&T, usize) -> Descend,
    {
        let Some(mut current) = self.root else {
            return Slot::Vacant(None);
        };

        loop {
            let node = self.nodes.get(current);
            let side = match route(node.item(), self.size_of(node.left())) {
                Descend::Stop => return Slot::Occupied(current),
                Descend::Left => Side::Left,
                Descend::Right => Side::Right,
            };
            match node.child(side) {
                Some(child) => current = child,
                None => return Slot::Vacant(Some((current, side))),
            }
        }
    }

    /// The slot immediately before `handle` in order: its left child slot, or the right
    /// slot of the rightmost node of its left subtree.
    pub(crate) fn slot_before(&self, handle: Handle) -> Slot {
        match self.nodes.get(handle).left() {
            None => Slot::Vacant(Some((handle, Side::Left))),
            Some(left) => Slot::Vacant(Some((self.last_in(left), Side::Right))),
        }
    }

    /// The slot immediately after `handle` in order.
    pub(crate) fn slot_after(&self, handle: Handle) -> Slot {
        match self.nodes.get(handle).right() {
            None => Slot::Vacant(Some((handle, Side::Right))),
            Some(right) => Slot::Vacant(Some((self.first_in(right), Side::Left))),
        }
    }

    /// Links a new leaf holding `item` into the vacant slot `at` and rebalances every
    /// ancestor up to the root.
    pub(crate) fn attach(&mut self, at: Option<(Handle, Side)>, item: T) -> Handle {
        let handle = self.nodes.alloc(Node::new(item));
        match at {
            None => {
                debug_assert!(self.root.is_none(), "`RawWBTree::attach()` - root slot is taken");
                self.root = Some(handle);
            }
            Some((parent, side)) => {
                debug_assert!(self.nodes.get(parent).child(side).is_none(), "`RawWBTree::attach()` - slot is taken");
                self.link(parent, side, Some(handle));
                self.rebalance_from(Some(parent));
            }
        }
        handle
    }

    // ─── Removal ─────────────────────────────────────────────────────────────

    /// Unlinks `handle` from the tree and returns its item.
    ///
    /// A node with two children is replaced by its in-order successor, which is spliced
    /// out of its old position first. The walk back to the root starts at the deepest
    /// node whose subtree lost an element.
    pub(crate) fn remove(&mut self, handle: Handle) -> T {
        let node = self.nodes.get(handle);
        let parent = node.parent();

        let dirty = match (node.left(), node.right()) {
            (Some(left), Some(right)) => {
                let successor = self.first_in(right);
                let mut dirty = successor;
                if successor != right {
                    if let Some(successor_parent) = self.nodes.get(successor).parent() {
                        dirty = successor_parent;
                    }
                    let successor_right = self.nodes.get(successor).right();
                    self.replace_in_parent(successor, successor_right);
                    self.link(successor, Side::Right, Some(right));
                }
                self.link(successor, Side::Left, Some(left));
                self.replace_in_parent(handle, Some(successor));
                Some(dirty)
            }
            (child, None) | (None, child) => {
                self.replace_in_parent(handle, child);
                parent
            }
        };

        self.rebalance_from(dirty);
        self.nodes.take(handle).into_item()
    }

    /// Removes a batch of handles, last first, and returns how many were removed.
    pub(crate) fn remove_batch(&mut self, handles: &[Handle]) -> usize {
        for &handle in handles.iter().rev() {
            drop(self.remove(handle));
        }
        handles.len()
    }

    /// Empties the tree and returns its items in order. O(n).
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut handles = Vec::with_capacity(self.len());
        let mut current = self.first();
        while let Some(handle) = current {
            handles.push(handle);
            current = self.next(handle);
        }

        let items = handles.into_iter().map(|handle| self.nodes.take(handle).into_item()).collect();
        self.clear();
        items
    }

    // ─── Bulk construction ───────────────────────────────────────────────────

    /// Replaces the contents with `items`, kept in the given order, as a minimum-height
    /// tree. O(n), no rotations.
    pub(crate) fn build(&mut self, items: Vec<T>) {
        self.clear();
        let count = items.len();
        let mut items = items.into_iter();
        self.root = self.build_subtree(count, &mut items);
        if let Some(root) = self.root {
            self.nodes.get_mut(root).set_parent(None);
        }
    }

    fn build_subtree<I>(&mut self, count: usize, items: &mut I) -> Option<Handle>
    where
        I: Iterator<Item = T>,
    {
        if count == 0 {
            return None;
        }

        // Midpoint split, identical to `(l + r) / 2` over the remaining slice.
        let left_count = count / 2;
        let left = self.build_subtree(left_count, items);
        let handle = self.nodes.alloc(Node::new(items.next()?));
        self.link(handle, Side::Left, left);
        let right = self.build_subtree(count - left_count - 1, items);
        self.link(handle, Side::Right, right);
        self.update_size(handle);
        Some(handle)
    }

    // ─── Traversal ───────────────────────────────────────────────────────────

    /// Depth-first walk of the subtree at `handle`, reporting each node before, between
    /// and after its children.
    pub(crate) fn walk<F>(&self, handle: Handle, visit: &mut F)
    where
        F: FnMut(Handle, Visit),
    {
        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());

        visit(handle, Visit::Pre);
        if let Some(left) = left {
            self.walk(left, visit);
        }
        visit(handle, Visit::In);
        if let Some(right) = right {
            self.walk(right, visit);
        }
        visit(handle, Visit::Post);
    }

    // ─── Structural primitives ───────────────────────────────────────────────

    fn link(&mut self, parent: Handle, side: Side, child: Option<Handle>) {
        self.nodes.get_mut(parent).set_child(side, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(Some(parent));
        }
    }

    /// Puts `replacement` where `handle` hangs from its parent (or at the root).
    fn replace_in_parent(&mut self, handle: Handle, replacement: Option<Handle>) {
        match self.nodes.get(handle).parent() {
            None => {
                self.root = replacement;
                if let Some(replacement) = replacement {
                    self.nodes.get_mut(replacement).set_parent(None);
                }
            }
            Some(parent) => {
                let side = self.nodes.get(parent).side_of(handle).unwrap_or(Side::Right);
                self.link(parent, side, replacement);
            }
        }
    }

    fn update_size(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = 1 + self.size_of(node.left()) + self.size_of(node.right());
        self.nodes.get_mut(handle).set_size(size);
    }

    /// Balances each node from `start` up to the root, refreshing sizes on the way.
    fn rebalance_from(&mut self, start: Option<Handle>) {
        let mut current = start;
        while let Some(handle) = current {
            let top = self.balance(handle);
            current = self.nodes.get(top).parent();
        }
    }

    /// Applies the single-rotation rule at `handle` and returns the node now rooting
    /// that position.
    fn balance(&mut self, handle: Handle) -> Handle {
        let node = self.nodes.get(handle);
        let lc = self.size_of(node.left()) + 1;
        let rc = self.size_of(node.right()) + 1;

        let top = if lc > 2 * rc {
            self.rotate(handle, Side::Left)
        } else if rc > 2 * lc {
            self.rotate(handle, Side::Right)
        } else {
            handle
        };
        self.update_size(top);
        top
    }

    /// Promotes the child of `handle` on the `heavy` side into `handle`'s position.
    /// Refreshes the demoted node's size; the caller refreshes the promoted one.
    fn rotate(&mut self, handle: Handle, heavy: Side) -> Handle {
        let Some(pivot) = self.nodes.get(handle).child(heavy) else {
            return handle;
        };
        let light = match heavy {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        };

        self.replace_in_parent(handle, Some(pivot));
        let inner = self.nodes.get(pivot).child(light);
        self.link(handle, heavy, inner);
        self.link(pivot, light, Some(handle));
        self.update_size(handle);
        pivot
    }
}

impl<T: Clone> Clone for RawWBTree<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
        }
    }
}

#[cfg(test)]
impl<T> RawWBTree<T> {
    /// Checks parent links, exact sizes and the height bound; returns the height.
    pub(crate) fn assert_invariants(&self) -> usize {
        let height = match self.root {
            None => 0,
            Some(root) => {
                assert!(self.nodes.get(root).parent().is_none(), "root has a parent");
                self.check_subtree(root)
            }
        };

        let len = self.len();
        assert_eq!(len, self.nodes.len(), "arena holds unreachable nodes");
        let log = (usize::BITS - len.leading_zeros()) as usize;
        assert!(height <= 2 * log + 1, "height {height} too large for {len} nodes");
        height
    }

    fn check_subtree(&self, handle: Handle) -> usize {
        let node = self.nodes.get(handle);
        let mut height = 0;
        for child in [node.left(), node.right()].into_iter().flatten() {
            assert_eq!(self.nodes.get(child).parent(), Some(handle), "child does not point back at its parent");
            height = height.max(self.check_subtree(child));
        }
        assert_eq!(node.size(), 1 + self.size_of(node.left()) + self.size_of(node.right()), "stale size");
        height + 1
    }
}
