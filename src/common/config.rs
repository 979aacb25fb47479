//! Configuration constants for the B-tree.

/// Smallest order for which split and merge are well-defined.
///
/// With `M = 2` a node holds a single key and a split has no keys left
/// for its two halves once the median is promoted.
pub const MIN_ORDER: usize = 3;

/// Largest accepted order.
///
/// Every node reserves room for `M` keys up front, so an unbounded order
/// would turn the first insert into an unbounded allocation.
pub const MAX_ORDER: usize = 1 << 16;

/// Order used by [`BTree::default`](crate::BTree).
///
/// An even order keeps the fully top-down discipline: a full node holds an
/// odd number of keys and splits around its exact median.
pub const DEFAULT_ORDER: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Discipline, Order};

    #[test]
    fn test_order_bounds_accepted() {
        assert!(Order::new(MIN_ORDER).is_ok());
        assert!(Order::new(MIN_ORDER - 1).is_err());
        assert!(Order::new(MAX_ORDER).is_ok());
        assert!(Order::new(MAX_ORDER + 1).is_err());
    }

    #[test]
    fn test_default_order_is_top_down() {
        let order = Order::new(DEFAULT_ORDER).unwrap();
        assert_eq!(order, Order::default());
        assert_eq!(order.discipline(), Discipline::TopDown);
    }
}
