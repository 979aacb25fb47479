//! Common types and utilities shared across the crate.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - The tree order

pub mod config;
pub mod error;
mod order;

pub use error::{Error, Result};
pub use order::{Discipline, Order};
