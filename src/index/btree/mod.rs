//! B-tree index implementation.
//!
//! # Components
//! - [`BTree`] - The ordered container (search, insert, range, traversal)
//! - `node` - Node storage and the split/borrow/merge primitives
//! - `remove` - Deletion with fill/borrow/merge rebalancing
//! - `validate` - Structural invariant checking
//! - [`Iter`] - Borrowing in-order iterator
//! - [`TreeStats`] - Structural edit counters

mod iter;
mod node;
mod remove;
mod stats;
mod tree;
mod validate;

pub use iter::Iter;
pub use stats::TreeStats;
pub use tree::BTree;
