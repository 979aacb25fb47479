//! Shared, externally locked handle to a B-tree.
//!
//! [`BTree`] itself is single-owner and lock-free. When several threads need
//! the same tree, [`SharedBTree`] puts it behind one reader/writer lock:
//! lookups share the lock, every mutation holds it exclusively for the whole
//! call, so no reader ever observes a half-rebalanced node.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::common::{Order, Result};
use crate::index::btree::BTree;

/// A cloneable handle to a B-tree guarded by a `RwLock`.
///
/// # Thread Safety
/// - Reads (`search`, `range_search`, `read`): shared lock
/// - Writes (`insert`, `remove`, `clear`, `write`): exclusive lock
///
/// # Usage
/// ```
/// use mway_btree::SharedBTree;
/// use std::thread;
///
/// let tree = SharedBTree::new(4).unwrap();
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let tree = tree.clone();
///         thread::spawn(move || {
///             for k in 0..100 {
///                 tree.insert(t * 100 + k);
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(tree.len(), 400);
/// ```
pub struct SharedBTree<K> {
    inner: Arc<RwLock<BTree<K>>>,
}

impl<K> SharedBTree<K> {
    /// Create an empty shared tree of order `m`.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `m < 3`
    /// - `Error::OrderTooLarge` if `m > MAX_ORDER`
    pub fn new(m: usize) -> Result<Self> {
        Ok(Self::from_tree(BTree::new(m)?))
    }

    /// Create an empty shared tree of the given order.
    pub fn with_order(order: Order) -> Self {
        Self::from_tree(BTree::with_order(order))
    }

    /// Wrap an existing tree.
    pub fn from_tree(tree: BTree<K>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Acquire the shared lock for a sequence of reads.
    pub fn read(&self) -> RwLockReadGuard<'_, BTree<K>> {
        self.inner.read()
    }

    /// Acquire the exclusive lock for a sequence of writes.
    pub fn write(&self) -> RwLockWriteGuard<'_, BTree<K>> {
        self.inner.write()
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Drop every key under the exclusive lock.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Unwrap the tree if this is the last handle, otherwise hand the
    /// handle back.
    pub fn try_unwrap(self) -> std::result::Result<BTree<K>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<K: Ord> SharedBTree<K> {
    /// Insert `key` under the exclusive lock.
    pub fn insert(&self, key: K) {
        self.inner.write().insert(key);
    }

    /// Remove one occurrence of `key`; `false` if it was absent.
    pub fn remove(&self, key: &K) -> bool {
        self.inner.write().remove(key)
    }

    /// Whether `key` is stored, under the shared lock.
    pub fn search(&self, key: &K) -> bool {
        self.inner.read().search(key)
    }

    /// Keys in `[begin, end]` in ascending order, under the shared lock.
    pub fn range_search(&self, begin: &K, end: &K) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.read().range_search(begin, end)
    }
}

impl<K> Clone for SharedBTree<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> Default for SharedBTree<K> {
    fn default() -> Self {
        Self::from_tree(BTree::default())
    }
}
