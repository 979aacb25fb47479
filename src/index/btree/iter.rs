//! In-order iteration over a B-tree.

use std::iter::FusedIterator;

use crate::index::btree::node::Node;

/// Borrowing iterator yielding keys in ascending order.
///
/// Created by [`BTree::iter`](crate::BTree::iter). Holds the path from the
/// root to the current position, so memory use is bounded by the height.
pub struct Iter<'a, K> {
    /// `(node, next key index)` for every node on the current path.
    stack: Vec<(&'a Node<K>, usize)>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.push_left_edge(root);
        }
        iter
    }

    fn push_left_edge(&mut self, mut node: &'a Node<K>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        loop {
            let (node, idx) = self.stack.last_mut()?;
            let node: &'a Node<K> = *node;
            if *idx < node.keys.len() {
                let key = &node.keys[*idx];
                *idx += 1;
                let next_child = *idx;
                if let Some(child) = node.children.get(next_child) {
                    self.push_left_edge(child);
                }
                self.remaining = self.remaining.saturating_sub(1);
                return Some(key);
            }
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
