//! Tree order type.

use std::fmt;

use crate::common::config::{DEFAULT_ORDER, MAX_ORDER, MIN_ORDER};
use crate::common::{Error, Result};

/// How structural repairs are scheduled relative to the descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// Split full nodes and fill minimal nodes before descending into them.
    ///
    /// Used for even orders, where a full node has an odd key count and two
    /// minimal siblings plus their separator fit in one node.
    TopDown,

    /// Split overflowing nodes and repair underflowing nodes as the
    /// recursion unwinds.
    ///
    /// Used for odd orders, where pre-splitting a full node would leave one
    /// half below the minimum occupancy.
    BottomUp,
}

/// The maximum fan-out `M` of a B-tree.
///
/// Every node holds at most `M - 1` keys and `M` children. Every node except
/// the root holds at least `ceil(M/2) - 1` keys.
///
/// # Example
/// ```
/// use mway_btree::Order;
///
/// let order = Order::new(5).unwrap();
/// assert_eq!(order.max_keys(), 4);
/// assert_eq!(order.min_keys(), 2);
/// assert!(Order::new(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Order(usize);

impl Order {
    /// Create a new order within [`MIN_ORDER`]`..=`[`MAX_ORDER`].
    pub fn new(order: usize) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder {
                order,
                min: MIN_ORDER,
            });
        }
        if order > MAX_ORDER {
            return Err(Error::OrderTooLarge {
                order,
                max: MAX_ORDER,
            });
        }
        Ok(Order(order))
    }

    /// The raw fan-out `M`.
    #[inline]
    pub fn get(&self) -> usize {
        self.0
    }

    /// Maximum keys per node (`M - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.0 - 1
    }

    /// Minimum children of a non-root internal node (`ceil(M/2)`).
    #[inline]
    pub fn min_degree(&self) -> usize {
        self.0.div_ceil(2)
    }

    /// Minimum keys of a non-root node (`ceil(M/2) - 1`).
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.min_degree() - 1
    }

    /// Balancing discipline implied by the parity of `M`.
    #[inline]
    pub fn discipline(&self) -> Discipline {
        if self.0 % 2 == 0 {
            Discipline::TopDown
        } else {
            Discipline::BottomUp
        }
    }
}

impl Default for Order {
    fn default() -> Self {
        Order(DEFAULT_ORDER)
    }
}

impl TryFrom<usize> for Order {
    type Error = Error;

    fn try_from(order: usize) -> Result<Self> {
        Order::new(order)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order({})", self.0)
    }
}
