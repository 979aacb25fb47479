//! Node - the storage unit of the B-tree.
//!
//! A [`Node`] holds an ordered run of keys and, when internal, one more
//! child than it has keys. Each node exclusively owns its children, so
//! dropping a node tears down its whole subtree.
//!
//! The structural edits used by insertion and deletion live here as small
//! primitives with explicit occupancy pre/postconditions. Deciding *when*
//! to apply them is the tree's job.

use crate::common::Order;

/// A B-tree node.
///
/// # Layout
/// ```text
///            keys:   [ k0 ][ k1 ][ k2 ]
///        children: [c0] [c1] [c2] [c3]
///
///   every key in c0 <= k0 <= every key in c1 <= k1 ...
/// ```
///
/// `children` is empty iff the node is a leaf; otherwise it holds exactly
/// `keys.len() + 1` entries (except transiently inside a primitive).
pub(crate) struct Node<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<Box<Node<K>>>,
}

impl<K> Node<K> {
    /// Create an empty leaf with room for one key of transient overflow.
    pub(crate) fn leaf(order: Order) -> Self {
        Self {
            keys: Vec::with_capacity(order.max_keys() + 1),
            children: Vec::new(),
        }
    }

    /// Create an empty internal node (no children yet).
    pub(crate) fn internal(order: Order) -> Self {
        Self {
            keys: Vec::with_capacity(order.max_keys() + 1),
            children: Vec::with_capacity(order.get() + 1),
        }
    }

    /// Create a leaf holding a single key.
    pub(crate) fn singleton(order: Order, key: K) -> Self {
        let mut node = Self::leaf(order);
        node.keys.push(key);
        node
    }

    /// Number of keys stored.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Holds `M - 1` keys; one more would overflow.
    #[inline]
    pub(crate) fn is_full(&self, order: Order) -> bool {
        self.keys.len() >= order.max_keys()
    }

    /// Holds more than `M - 1` keys and must be split.
    #[inline]
    pub(crate) fn is_overflowing(&self, order: Order) -> bool {
        self.keys.len() > order.max_keys()
    }

    /// Number of edges from this node down to its leaves.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self;
        while let Some(child) = node.children.first() {
            node = child;
            height += 1;
        }
        height
    }

    /// Smallest key in this subtree.
    pub(crate) fn first_key(&self) -> Option<&K> {
        let mut node = self;
        while let Some(child) = node.children.first() {
            node = child;
        }
        node.keys.first()
    }

    /// Largest key in this subtree.
    pub(crate) fn last_key(&self) -> Option<&K> {
        let mut node = self;
        while let Some(child) = node.children.last() {
            node = child;
        }
        node.keys.last()
    }

    // ========================================================================
    // Key/child extraction
    // ========================================================================

    /// Remove and return the first key.
    ///
    /// # Panics
    /// Panics if the node has no keys.
    pub(crate) fn take_first_key(&mut self) -> K {
        self.keys.remove(0)
    }

    /// Remove and return the last key.
    ///
    /// # Panics
    /// Panics if the node has no keys.
    pub(crate) fn take_last_key(&mut self) -> K {
        let last = self.keys.len() - 1;
        self.keys.remove(last)
    }

    fn take_first_child(&mut self) -> Box<Node<K>> {
        self.children.remove(0)
    }

    fn take_last_child(&mut self) -> Box<Node<K>> {
        let last = self.children.len() - 1;
        self.children.remove(last)
    }

    // ========================================================================
    // Structural primitives
    // ========================================================================

    /// Split `children[idx]` around its median key.
    ///
    /// The median moves up into `keys[idx]` and the upper half becomes a new
    /// sibling at `children[idx + 1]`.
    ///
    /// Pre: `self` has room for one more key; the child holds at least
    /// 3 keys (`M - 1` when pre-splitting, `M` on overflow).
    /// Post: both halves hold at least `ceil(M/2) - 1` keys.
    pub(crate) fn split_child(&mut self, idx: usize, order: Order) {
        let child = &mut self.children[idx];
        debug_assert!(child.len() >= 2, "split of a node with fewer than 2 keys");

        let mid = child.keys.len() / 2;
        let mut sibling = if child.is_leaf() {
            Node::leaf(order)
        } else {
            Node::internal(order)
        };
        sibling.keys.extend(child.keys.drain(mid + 1..));
        if !child.is_leaf() {
            sibling.children.extend(child.children.drain(mid + 1..));
        }
        let median = child.take_last_key();

        self.keys.insert(idx, median);
        self.children.insert(idx + 1, Box::new(sibling));
    }

    /// Rotate one key from `children[idx - 1]` through the parent into
    /// `children[idx]`.
    ///
    /// Pre: `idx > 0` and the left sibling has a key to spare.
    /// Post: the child gains one key (and, if internal, one child).
    pub(crate) fn borrow_from_left(&mut self, idx: usize) {
        debug_assert!(idx > 0 && idx < self.children.len());

        let (before, after) = self.children.split_at_mut(idx);
        let left = &mut before[idx - 1];
        let child = &mut after[0];

        let moved = left.take_last_key();
        let separator = std::mem::replace(&mut self.keys[idx - 1], moved);
        child.keys.insert(0, separator);
        if !left.is_leaf() {
            child.children.insert(0, left.take_last_child());
        }
    }

    /// Rotate one key from `children[idx + 1]` through the parent into
    /// `children[idx]`.
    ///
    /// Pre: `idx < self.len()` and the right sibling has a key to spare.
    /// Post: the child gains one key (and, if internal, one child).
    pub(crate) fn borrow_from_right(&mut self, idx: usize) {
        debug_assert!(idx < self.keys.len());

        let (before, after) = self.children.split_at_mut(idx + 1);
        let child = &mut before[idx];
        let right = &mut after[0];

        let moved = right.take_first_key();
        let separator = std::mem::replace(&mut self.keys[idx], moved);
        child.keys.push(separator);
        if !right.is_leaf() {
            child.children.push(right.take_first_child());
        }
    }

    /// Merge `children[idx + 1]` and the separator `keys[idx]` into
    /// `children[idx]`, dropping the emptied right sibling.
    ///
    /// Pre: `idx < self.len()` and the combined key count fits in `M - 1`.
    /// Post: `self` loses one key and one child.
    pub(crate) fn merge_children(&mut self, idx: usize) {
        debug_assert!(idx < self.keys.len());

        let separator = self.keys.remove(idx);
        let Node { keys, children } = *self.children.remove(idx + 1);

        let child = &mut self.children[idx];
        child.keys.push(separator);
        child.keys.extend(keys);
        child.children.extend(children);
    }
}

impl<K: Ord> Node<K> {
    /// Index of the first key `>= key`.
    ///
    /// This is both the slot holding `key` (if present) and the child
    /// whose subtree would contain it.
    #[inline]
    pub(crate) fn lower_bound(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k < key)
    }

    /// Index of the first key `> key`; equal keys are passed over so that
    /// duplicates land to their right.
    #[inline]
    pub(crate) fn upper_bound(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k <= key)
    }

    /// Whether `keys[idx]` exists and equals `key`.
    #[inline]
    pub(crate) fn holds_at(&self, idx: usize, key: &K) -> bool {
        self.keys.get(idx).is_some_and(|k| k == key)
    }
}
