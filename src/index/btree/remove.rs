//! Deletion and rebalancing.
//!
//! # Top-down (even `M`)
//! Before descending into a child, make sure it holds at least `ceil(M/2)`
//! keys so that removing one key below can never leave it short:
//! ```text
//!   fill(child):
//!     left sibling has a spare key   -> borrow_from_left
//!     right sibling has a spare key  -> borrow_from_right
//!     otherwise                      -> merge with right (or left if last)
//! ```
//! A key hit in an internal node is replaced by its predecessor if the left
//! child can spare one, else by its successor if the right child can,
//! else both children are merged around it and the removal continues in the
//! merged node.
//!
//! # Bottom-up (odd `M`)
//! Merging two minimal nodes around their separator would overflow an
//! odd-order node, so the same borrow/merge choices are applied to a child
//! only after it has dropped below `ceil(M/2) - 1` keys. Internal hits are
//! replaced by the predecessor.

use tracing::{debug, trace};

use crate::common::Discipline;
use crate::index::btree::node::Node;
use crate::index::btree::tree::BTree;

impl<K: Ord> BTree<K> {
    // ========================================================================
    // Public API: Remove
    // ========================================================================

    /// Remove one occurrence of `key`.
    ///
    /// Returns `false` (and leaves the size unchanged) if the key is absent.
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Remove one occurrence of `key` and return the stored key.
    pub fn take(&mut self, key: &K) -> Option<K> {
        let mut root = self.root.take()?;
        let removed = self.remove_from(&mut root, key);

        self.root = if !root.keys.is_empty() {
            Some(root)
        } else {
            self.stats.root_collapses += 1;
            debug!("root collapsed");
            // An emptied internal root has exactly one child left.
            root.children.pop()
        };

        if removed.is_some() {
            self.len -= 1;
        }
        trace!(len = self.len, found = removed.is_some(), "remove");
        removed
    }

    /// Remove `key` from the subtree rooted at `node`.
    ///
    /// Top-down: `node` is the root or holds at least `ceil(M/2)` keys.
    /// Bottom-up: the caller repairs `node` afterwards if it fell short.
    fn remove_from(&mut self, node: &mut Node<K>, key: &K) -> Option<K> {
        let idx = node.lower_bound(key);
        let found = node.holds_at(idx, key);

        if node.is_leaf() {
            return found.then(|| node.keys.remove(idx));
        }

        match self.order.discipline() {
            Discipline::TopDown => {
                if found {
                    return self.remove_internal(node, idx, key);
                }
                let idx = if node.children[idx].len() < self.order.min_degree() {
                    self.fill(node, idx)
                } else {
                    idx
                };
                self.remove_from(&mut node.children[idx], key)
            }
            Discipline::BottomUp => {
                let removed = if found {
                    let predecessor = self.pop_max(&mut node.children[idx]);
                    Some(std::mem::replace(&mut node.keys[idx], predecessor))
                } else {
                    self.remove_from(&mut node.children[idx], key)
                };
                if removed.is_some() {
                    self.repair(node, idx);
                }
                removed
            }
        }
    }

    /// Remove `node.keys[idx]` from an internal node (top-down).
    fn remove_internal(&mut self, node: &mut Node<K>, idx: usize, key: &K) -> Option<K> {
        let min_degree = self.order.min_degree();

        if node.children[idx].len() >= min_degree {
            let predecessor = self.pop_max(&mut node.children[idx]);
            Some(std::mem::replace(&mut node.keys[idx], predecessor))
        } else if node.children[idx + 1].len() >= min_degree {
            let successor = self.pop_min(&mut node.children[idx + 1]);
            Some(std::mem::replace(&mut node.keys[idx], successor))
        } else {
            self.merge(node, idx);
            self.remove_from(&mut node.children[idx], key)
        }
    }

    /// Remove and return the largest key in the subtree rooted at `node`.
    ///
    /// Top-down: `node` must hold at least `ceil(M/2)` keys.
    fn pop_max(&mut self, node: &mut Node<K>) -> K {
        if node.is_leaf() {
            return node.take_last_key();
        }

        let last = node.len();
        match self.order.discipline() {
            Discipline::TopDown => {
                let idx = if node.children[last].len() < self.order.min_degree() {
                    self.fill(node, last)
                } else {
                    last
                };
                self.pop_max(&mut node.children[idx])
            }
            Discipline::BottomUp => {
                let key = self.pop_max(&mut node.children[last]);
                self.repair(node, last);
                key
            }
        }
    }

    /// Remove and return the smallest key in the subtree rooted at `node`.
    ///
    /// Only used top-down; `node` must hold at least `ceil(M/2)` keys.
    fn pop_min(&mut self, node: &mut Node<K>) -> K {
        if node.is_leaf() {
            return node.take_first_key();
        }

        if node.children[0].len() < self.order.min_degree() {
            self.fill(node, 0);
        }
        self.pop_min(&mut node.children[0])
    }

    // ========================================================================
    // Rebalancing
    // ========================================================================

    /// Raise `node.children[idx]` to at least `ceil(M/2)` keys (top-down).
    ///
    /// Returns the index the child ends up at: `idx - 1` if it was the last
    /// child and got merged into its left sibling, `idx` otherwise.
    fn fill(&mut self, node: &mut Node<K>, idx: usize) -> usize {
        let min_degree = self.order.min_degree();
        self.rebalance(node, idx, min_degree)
    }

    /// Restore `node.children[idx]` to at least `ceil(M/2) - 1` keys
    /// (bottom-up). No-op if the child is not short.
    fn repair(&mut self, node: &mut Node<K>, idx: usize) {
        let min_keys = self.order.min_keys();
        if node.children[idx].len() < min_keys {
            self.rebalance(node, idx, min_keys + 1);
        }
    }

    /// Borrow from a sibling holding at least `spare` keys, preferring the
    /// left one, or merge with a sibling when neither can lend.
    fn rebalance(&mut self, node: &mut Node<K>, idx: usize, spare: usize) -> usize {
        if idx > 0 && node.children[idx - 1].len() >= spare {
            node.borrow_from_left(idx);
            self.stats.borrows_left += 1;
            debug!(index = idx, "borrowed from left sibling");
            idx
        } else if idx < node.len() && node.children[idx + 1].len() >= spare {
            node.borrow_from_right(idx);
            self.stats.borrows_right += 1;
            debug!(index = idx, "borrowed from right sibling");
            idx
        } else if idx < node.len() {
            self.merge(node, idx);
            idx
        } else {
            self.merge(node, idx - 1);
            idx - 1
        }
    }

    /// Merge `node.children[idx + 1]` into `node.children[idx]`.
    fn merge(&mut self, node: &mut Node<K>, idx: usize) {
        node.merge_children(idx);
        self.stats.merges += 1;
        debug!(
            index = idx,
            merged_len = node.children[idx].len(),
            "merged children"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::common::Order;
    use crate::BTree;

    fn tree_of(m: usize, keys: &[i32]) -> BTree<i32> {
        BTree::build_from_ordered_vector(keys.to_vec(), m).unwrap()
    }

    /// Deterministic shuffle so tests don't need an RNG.
    fn scrambled(n: i32) -> Vec<i32> {
        (0..n).map(|i| (i * 37) % n).collect()
    }

    #[test]
    fn test_remove_from_empty() {
        let mut tree: BTree<i32> = BTree::new(4).unwrap();
        assert!(!tree.remove(&1));
        assert_eq!(tree.size(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_absent_keeps_size() {
        let mut tree = tree_of(4, &[1, 3, 5, 7, 9]);
        assert!(!tree.remove(&4));
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.to_string_with(","), "1,3,5,7,9");
        tree.check_properties().unwrap();
    }

    #[test]
    fn test_remove_scenario_order_four() {
        let mut tree = tree_of(4, &[10, 20, 5, 6, 12, 30, 7, 17]);
        assert!(tree.remove(&6));
        assert!(!tree.search(&6));
        assert_eq!(tree.size(), 7);
        assert_eq!(tree.to_string_with(","), "5,7,10,12,17,20,30");
        tree.check_properties().unwrap();
    }

    #[test]
    fn test_remove_last_key_empties_tree() {
        let mut tree = tree_of(3, &[1]);
        assert_eq!(tree.take(&1), Some(1));
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.stats().root_collapses, 1);
    }

    #[test]
    fn test_remove_collapses_root() {
        // M = 4: root [2] over [1] and [3]; removing 1 merges all three.
        let mut tree = tree_of(4, &[1, 2, 3, 4]);
        assert!(tree.remove(&4));
        assert_eq!(tree.height(), 1);
        assert!(tree.remove(&1));
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.to_string_with(","), "2,3");
        assert!(tree.stats().merges >= 1);
        assert!(tree.stats().root_collapses >= 1);
        tree.check_properties().unwrap();
    }

    #[test]
    fn test_remove_internal_key_uses_predecessor() {
        // Root [20] with a left child that can spare a key.
        let mut tree = tree_of(4, &[10, 20, 30, 5, 15]);
        assert!(tree.remove(&20));
        assert_eq!(tree.to_string_with(","), "5,10,15,30");
        tree.check_properties().unwrap();
    }

    #[test]
    fn test_remove_internal_key_uses_successor() {
        // Root [20] over a minimal [10] and a spare-holding [30, 40].
        let mut tree = tree_of(4, &[10, 20, 30, 40]);
        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.keys, vec![20]);
        assert_eq!(root.children[0].keys, vec![10]);
        assert_eq!(root.children[1].keys, vec![30, 40]);

        let before = tree.stats();
        assert_eq!(tree.take(&20), Some(20));

        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.keys, vec![30]);
        assert_eq!(root.children[0].keys, vec![10]);
        assert_eq!(root.children[1].keys, vec![40]);
        assert_eq!(tree.stats().merges, before.merges);
        assert_eq!(tree.size(), 3);
        tree.check_properties().unwrap();
    }

    #[test]
    fn test_remove_borrows_from_sibling() {
        let mut tree = tree_of(4, &[1, 2, 3, 4, 5, 6]);
        let before = tree.stats();
        assert!(tree.remove(&1));
        assert!(tree.stats().rebalances() > before.rebalances());
        assert_eq!(tree.to_string_with(","), "2,3,4,5,6");
        tree.check_properties().unwrap();
    }

    #[test]
    fn test_remove_one_duplicate_at_a_time() {
        let mut tree = tree_of(3, &[7, 7, 7, 1, 9]);
        assert!(tree.remove(&7));
        assert_eq!(tree.to_string_with(","), "1,7,7,9");
        assert!(tree.remove(&7));
        assert!(tree.remove(&7));
        assert!(!tree.remove(&7));
        assert_eq!(tree.to_string_with(","), "1,9");
        tree.check_properties().unwrap();
    }

    #[test]
    fn test_remove_everything_every_order() {
        for m in 3..=8 {
            let keys = scrambled(200);
            let mut tree = tree_of(m, &keys);
            tree.check_properties().unwrap();

            for (removed, k) in keys.iter().rev().enumerate() {
                assert!(tree.remove(k), "order {} failed to remove {}", m, k);
                assert!(!tree.search(k));
                assert_eq!(tree.size(), keys.len() - removed - 1);
                tree.check_properties().unwrap();
            }
            assert!(tree.is_empty());
        }
    }

    #[test]
    fn test_remove_ascending_and_descending() {
        for m in [3, 4, 5, 6] {
            let mut tree = tree_of(m, &(0..64).collect::<Vec<_>>());
            for k in 0..32 {
                assert!(tree.remove(&k));
            }
            for k in (32..64).rev() {
                assert!(tree.remove(&k));
                tree.check_properties().unwrap();
            }
            assert!(tree.is_empty());
        }
    }

    #[test]
    fn test_min_max_after_removals() {
        let mut tree = tree_of(5, &(1..=20).collect::<Vec<_>>());
        tree.remove(&1);
        tree.remove(&20);
        assert_eq!(tree.min_key(), Ok(&2));
        assert_eq!(tree.max_key(), Ok(&19));
    }

    #[test]
    fn test_odd_order_merges_fit() {
        let order = Order::new(5).unwrap();
        let mut tree = BTree::with_order(order);
        tree.extend(scrambled(101));
        for k in 0..101 {
            if k % 3 != 0 {
                tree.remove(&k);
            }
        }
        tree.check_properties().unwrap();
        assert_eq!(tree.size(), 34);
        assert!(tree.stats().merges > 0);
    }
}
