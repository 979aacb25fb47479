//! Structural statistics for a B-tree.

use std::fmt;

/// Counters of the structural edits a tree has performed.
///
/// The tree is single-owner, so these are plain counters updated under
/// `&mut self`. [`BTree::stats`](crate::BTree::stats) hands out a copy.
///
/// # Example
/// ```
/// use mway_btree::BTree;
///
/// let mut tree = BTree::new(4).unwrap();
/// for k in 0..4 {
///     tree.insert(k);
/// }
/// let stats = tree.stats();
/// assert_eq!(stats.root_grows, 1);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Child splits, including those that grew the root.
    pub splits: u64,

    /// Splits of the root that added a level.
    pub root_grows: u64,

    /// Rotations of a key in from the left sibling.
    pub borrows_left: u64,

    /// Rotations of a key in from the right sibling.
    pub borrows_right: u64,

    /// Sibling merges.
    pub merges: u64,

    /// Emptied roots replaced by their only child (or by nothing).
    pub root_collapses: u64,
}

impl TreeStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rotations in either direction.
    pub fn borrows(&self) -> u64 {
        self.borrows_left + self.borrows_right
    }

    /// Total number of rebalancing edits performed during removals.
    pub fn rebalances(&self) -> u64 {
        self.borrows() + self.merges
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, root_grows: {}, borrows: {}, merges: {}, root_collapses: {} }}",
            self.splits,
            self.root_grows,
            self.borrows(),
            self.merges,
            self.root_collapses
        )
    }
}
