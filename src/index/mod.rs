//! Index structures.
//!
//! - [`btree`] - In-memory order-M B-tree
//! - [`SharedBTree`] - Reader/writer-locked handle for multi-threaded use

pub mod btree;
mod shared;

pub use shared::SharedBTree;
