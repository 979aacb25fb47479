//! Structural invariant checking.

use crate::common::{Error, Result};
use crate::index::btree::node::Node;
use crate::index::btree::tree::BTree;

/// Inclusive key bounds a subtree must respect.
struct Bounds<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

impl<K: Ord> BTree<K> {
    /// Verify every structural invariant of the tree.
    ///
    /// Checks, for every node:
    /// - keys are non-decreasing and lie within the separators above them
    /// - `count <= M - 1`, and `count >= ceil(M/2) - 1` unless it is the root
    /// - internal nodes have exactly `count + 1` children
    /// - all leaves sit at the same depth
    ///
    /// and that [`size`](Self::size) matches the number of stored keys.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first violation found
    pub fn check_properties(&self) -> Result<()> {
        let Some(root) = self.root.as_deref() else {
            if self.len != 0 {
                return Err(Error::violation(format!(
                    "empty tree reports size {}",
                    self.len
                )));
            }
            return Ok(());
        };

        if root.keys.is_empty() {
            return Err(Error::violation("root holds no keys"));
        }

        let mut leaf_depth = None;
        let bounds = Bounds {
            lower: None,
            upper: None,
        };
        let count = self.check_node(root, bounds, 0, &mut leaf_depth)?;

        if count != self.len {
            return Err(Error::violation(format!(
                "size {} but {} keys stored",
                self.len, count
            )));
        }
        Ok(())
    }

    /// Check the subtree at `node`, returning its key count.
    fn check_node(
        &self,
        node: &Node<K>,
        bounds: Bounds<'_, K>,
        depth: usize,
        leaf_depth: &mut Option<usize>,
    ) -> Result<usize> {
        let len = node.len();
        if len > self.order.max_keys() {
            return Err(Error::violation(format!(
                "node at depth {} holds {} keys (max {})",
                depth,
                len,
                self.order.max_keys()
            )));
        }
        if depth > 0 && len < self.order.min_keys() {
            return Err(Error::violation(format!(
                "node at depth {} holds {} keys (min {})",
                depth,
                len,
                self.order.min_keys()
            )));
        }
        if node.keys.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(Error::violation(format!(
                "keys out of order at depth {}",
                depth
            )));
        }
        let below = bounds.lower.zip(node.keys.first()).is_some_and(|(lo, k)| k < lo);
        let above = bounds.upper.zip(node.keys.last()).is_some_and(|(hi, k)| k > hi);
        if below || above {
            return Err(Error::violation(format!(
                "key outside parent separators at depth {}",
                depth
            )));
        }

        if node.is_leaf() {
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(Error::violation(format!(
                        "leaf at depth {} but others at depth {}",
                        depth, expected
                    )));
                }
                Some(_) => {}
            }
            return Ok(len);
        }

        if node.children.len() != len + 1 {
            return Err(Error::violation(format!(
                "internal node at depth {} has {} keys but {} children",
                depth,
                len,
                node.children.len()
            )));
        }

        let mut count = len;
        for (i, child) in node.children.iter().enumerate() {
            let child_bounds = Bounds {
                lower: if i == 0 { bounds.lower } else { node.keys.get(i - 1) },
                upper: if i == len { bounds.upper } else { node.keys.get(i) },
            };
            count += self.check_node(child, child_bounds, depth + 1, leaf_depth)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::common::Error;
    use crate::index::btree::node::Node;
    use crate::BTree;

    #[test]
    fn test_valid_trees_pass() {
        let empty: BTree<i32> = BTree::new(3).unwrap();
        empty.check_properties().unwrap();

        for m in 3..=7 {
            let tree = BTree::build_from_ordered_vector((0..300).rev().collect(), m).unwrap();
            tree.check_properties().unwrap();
        }
    }

    #[test]
    fn test_detects_size_mismatch() {
        let mut tree = BTree::build_from_ordered_vector(vec![1, 2, 3], 4).unwrap();
        tree.len = 5;
        assert!(matches!(
            tree.check_properties(),
            Err(Error::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_detects_unordered_keys() {
        let mut tree = BTree::build_from_ordered_vector(vec![1, 2, 3], 4).unwrap();
        tree.root.as_mut().unwrap().keys.swap(0, 2);
        let err = tree.check_properties().unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn test_detects_uneven_leaves() {
        let mut tree = BTree::build_from_ordered_vector(vec![1, 2, 3, 4, 5, 6], 4).unwrap();
        // Hang an extra level under the first leaf.
        let root = tree.root.as_mut().unwrap();
        let first = &mut root.children[0];
        let mut deeper = Node::leaf(tree.order);
        deeper.keys.push(0);
        let mut sibling = Node::leaf(tree.order);
        sibling.keys.push(1);
        first.children = vec![Box::new(deeper), Box::new(sibling)];
        tree.len += 2;

        let err = tree.check_properties().unwrap_err();
        assert!(err.to_string().contains("invariant violation"));
    }

    #[test]
    fn test_detects_underfull_node() {
        let mut tree = BTree::build_from_ordered_vector((0..20).collect(), 6).unwrap();
        let root = tree.root.as_mut().unwrap();
        let removed = root.children[0].keys.len();
        root.children[0].keys.clear();
        tree.len -= removed;

        let err = tree.check_properties().unwrap_err();
        assert!(err.to_string().contains("min"));
    }
}
