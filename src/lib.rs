//! mway-btree - An in-memory, order-M B-tree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          mway-btree                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           SharedBTree (index/shared.rs)  [opt-in]       │   │
//! │  │        Arc<RwLock<BTree>>: readers share, writers own   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                BTree (index/btree/)                      │   │
//! │  │   search · insert · remove · range · min/max · iter     │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  Node primitives: split | borrow | merge        │   │   │
//! │  │   │  Discipline: TopDown (even M) | BottomUp (odd M)│   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │      TreeStats + check_properties                        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Common (common/)                            │   │
//! │  │          Order + Error + config constants                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Order, Error, config)
//! - [`index`] - The B-tree and its shared handle
//!
//! # Quick Start
//! ```
//! use mway_btree::BTree;
//!
//! let mut tree = BTree::new(4).unwrap();
//! for k in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(k);
//! }
//!
//! assert_eq!(tree.size(), 8);
//! assert_eq!(tree.min_key(), Ok(&5));
//! assert_eq!(tree.range_search(&6, &17), vec![6, 7, 10, 12, 17]);
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_ORDER, MAX_ORDER, MIN_ORDER};
pub use common::{Discipline, Error, Order, Result};

pub use index::btree::{BTree, Iter, TreeStats};
pub use index::SharedBTree;
