//! BTree - the ordered container.
//!
//! The [`BTree`] provides:
//! - Point lookup by descent from the root
//! - Insertion with preemptive (or on-overflow) node splitting
//! - Deletion with borrow/merge rebalancing (see `remove.rs`)
//! - Pruned range queries and in-order traversal

use std::fmt;

use tracing::{debug, trace};

use crate::common::{Discipline, Error, Order, Result};
use crate::index::btree::iter::Iter;
use crate::index::btree::node::Node;
use crate::index::btree::stats::TreeStats;

/// An in-memory B-tree of order `M` storing an ordered multiset of keys.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │ BTree { order: M, len: n, stats }                    │
/// │   root: Option<Box<Node>>                            │
/// │              │                                       │
/// │        ┌─────▼─────┐                                 │
/// │        │ [k0 | k1] │   at most M-1 keys, M children  │
/// │        └┬────┬────┬┘                                 │
/// │    ┌────▼┐ ┌─▼──┐ ┌▼───┐                             │
/// │    │ <k0 │ │k0..│ │ >k1│  all leaves at equal depth  │
/// │    └─────┘ └────┘ └────┘                             │
/// └──────────────────────────────────────────────────────┘
/// ```
///
/// Duplicates are accepted as distinct entries and placed to the right of
/// equal keys.
///
/// # Thread Safety
/// `BTree` performs no internal locking. Mutating calls take `&mut self`, so
/// the borrow checker already enforces a single writer. To share a tree
/// across threads, wrap it in a reader/writer lock, e.g.
/// [`SharedBTree`](crate::SharedBTree).
///
/// # Usage
/// ```
/// use mway_btree::BTree;
///
/// let mut tree = BTree::new(4).unwrap();
/// for k in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(k);
/// }
/// assert!(tree.search(&12));
/// assert_eq!(tree.to_string_with(","), "5,6,7,10,12,17,20,30");
/// assert_eq!(tree.range_search(&6, &17), vec![6, 7, 10, 12, 17]);
///
/// assert!(tree.remove(&6));
/// assert_eq!(tree.size(), 7);
/// ```
pub struct BTree<K> {
    /// Top node, or `None` while the tree holds no keys.
    pub(crate) root: Option<Box<Node<K>>>,

    /// Maximum fan-out (immutable after construction).
    pub(crate) order: Order,

    /// Number of keys stored, maintained incrementally.
    pub(crate) len: usize,

    /// Structural edit counters.
    pub(crate) stats: TreeStats,
}

impl<K> BTree<K> {
    /// Create an empty tree of the given order.
    pub fn with_order(order: Order) -> Self {
        Self {
            root: None,
            order,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    /// Create an empty tree of order `m`.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `m < 3`
    /// - `Error::OrderTooLarge` if `m > MAX_ORDER`
    pub fn new(m: usize) -> Result<Self> {
        Ok(Self::with_order(Order::new(m)?))
    }

    /// The order this tree was built with.
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Number of keys stored (duplicates counted individually).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Alias of [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of edges from the root to any leaf.
    ///
    /// Both the empty tree and a single-node tree have height 0.
    pub fn height(&self) -> usize {
        self.root.as_deref().map_or(0, Node::height)
    }

    /// Snapshot of the structural edit counters.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Iterate over all keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Drop every node and reset the tree to empty.
    pub fn clear(&mut self) {
        // Dropping the root recursively drops every node it owns.
        self.root = None;
        self.len = 0;
        self.stats.reset();
        debug!(order = self.order.get(), "tree cleared");
    }

    /// Render every key in order, joined by `sep`.
    ///
    /// No separator is emitted before the first or after the last key.
    pub fn to_string_with(&self, sep: &str) -> String
    where
        K: fmt::Display,
    {
        let mut out = String::new();
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            out.push_str(&key.to_string());
        }
        out
    }
}

impl<K: Ord> BTree<K> {
    /// Build a tree of order `m` by inserting `elements` in the given order.
    ///
    /// The input need not be sorted; every element goes through
    /// [`insert`](Self::insert).
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `m < 3`
    /// - `Error::OrderTooLarge` if `m > MAX_ORDER`
    pub fn build_from_ordered_vector(elements: Vec<K>, m: usize) -> Result<Self> {
        let mut tree = Self::new(m)?;
        tree.extend(elements);
        Ok(tree)
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// Whether `key` is stored in the tree.
    pub fn search(&self, key: &K) -> bool {
        let Some(mut node) = self.root.as_deref() else {
            return false;
        };
        loop {
            let idx = node.lower_bound(key);
            if node.holds_at(idx, key) {
                return true;
            }
            match node.children.get(idx) {
                Some(child) => node = child,
                None => return false,
            }
        }
    }

    /// Alias of [`search`](Self::search).
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.search(key)
    }

    /// Smallest key.
    ///
    /// # Errors
    /// - `Error::EmptyTree` if the tree holds no keys
    pub fn min_key(&self) -> Result<&K> {
        self.root
            .as_deref()
            .and_then(|root| root.first_key())
            .ok_or(Error::EmptyTree)
    }

    /// Largest key.
    ///
    /// # Errors
    /// - `Error::EmptyTree` if the tree holds no keys
    pub fn max_key(&self) -> Result<&K> {
        self.root
            .as_deref()
            .and_then(|root| root.last_key())
            .ok_or(Error::EmptyTree)
    }

    /// All keys in `[begin, end]`, ascending.
    ///
    /// Subtrees lying entirely below `begin` are skipped and the walk stops
    /// at the first key above `end`. `begin > end` yields an empty vector.
    pub fn range_search(&self, begin: &K, end: &K) -> Vec<K>
    where
        K: Clone,
    {
        let mut result = Vec::new();
        if let Some(root) = self.root.as_deref() {
            Self::collect_range(root, begin, end, &mut result);
        }
        result
    }

    fn collect_range(node: &Node<K>, begin: &K, end: &K, out: &mut Vec<K>)
    where
        K: Clone,
    {
        // Children left of `start` only hold keys below `begin`.
        let start = node.lower_bound(begin);
        for i in start..=node.len() {
            if let Some(child) = node.children.get(i) {
                Self::collect_range(child, begin, end, out);
            }
            match node.keys.get(i) {
                Some(key) if key <= end => out.push(key.clone()),
                _ => break,
            }
        }
    }

    // ========================================================================
    // Public API: Insert
    // ========================================================================

    /// Insert `key`. Duplicates are stored as distinct entries.
    pub fn insert(&mut self, key: K) {
        let root = match self.root.take() {
            None => Box::new(Node::singleton(self.order, key)),
            Some(mut root) => {
                if self.order.discipline() == Discipline::TopDown && root.is_full(self.order) {
                    root = self.grow(root);
                }
                self.insert_into(&mut root, key);
                if root.is_overflowing(self.order) {
                    root = self.grow(root);
                }
                root
            }
        };
        self.root = Some(root);
        self.len += 1;
        trace!(len = self.len, "insert");
    }

    /// Insert into the subtree rooted at `node`.
    ///
    /// Top-down: `node` is never full on entry, and a full child is split
    /// before descending into it. Bottom-up: a child left holding `M` keys
    /// is split once the recursive call returns.
    fn insert_into(&mut self, node: &mut Node<K>, key: K) {
        let mut idx = node.upper_bound(&key);
        if node.is_leaf() {
            node.keys.insert(idx, key);
            return;
        }

        if self.order.discipline() == Discipline::TopDown && node.children[idx].is_full(self.order)
        {
            self.split(node, idx);
            if node.keys[idx] < key {
                idx += 1;
            }
        }

        self.insert_into(&mut node.children[idx], key);

        if node.children[idx].is_overflowing(self.order) {
            self.split(node, idx);
        }
    }

    /// Split `node.children[idx]`, promoting its median into `node`.
    fn split(&mut self, node: &mut Node<K>, idx: usize) {
        node.split_child(idx, self.order);
        self.stats.splits += 1;
        debug!(index = idx, len = node.len(), "split child");
    }

    /// Put a new root above `root` and split the old root under it.
    fn grow(&mut self, root: Box<Node<K>>) -> Box<Node<K>> {
        let mut new_root = Node::internal(self.order);
        new_root.children.push(root);
        self.split(&mut new_root, 0);
        self.stats.root_grows += 1;
        debug!(height = new_root.height(), "root grew");
        Box::new(new_root)
    }
}

impl<K> Default for BTree<K> {
    fn default() -> Self {
        Self::with_order(Order::default())
    }
}

impl<K: Ord> Extend<K> for BTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a BTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K: fmt::Display> fmt::Display for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl<K: fmt::Debug> fmt::Debug for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
