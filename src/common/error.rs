//! Error types for the B-tree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by the tree.
///
/// Every error is reported before the tree is mutated, so a failed call
/// never leaves a partially rebalanced structure behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested order is too small for split/merge to be defined.
    #[error("invalid order {order}: must be at least {min}")]
    InvalidOrder {
        /// Order that was requested.
        order: usize,
        /// Smallest accepted order.
        min: usize,
    },

    /// The requested order exceeds what a node may reserve.
    #[error("invalid order {order}: must be at most {max}")]
    OrderTooLarge {
        /// Order that was requested.
        order: usize,
        /// Largest accepted order.
        max: usize,
    },

    /// `min_key` / `max_key` was called on a tree holding no keys.
    #[error("tree is empty")]
    EmptyTree,

    /// A structural invariant does not hold.
    ///
    /// Only produced by `check_properties`; seeing it indicates a bug.
    #[error("invariant violation: {reason}")]
    InvariantViolation {
        /// Which invariant failed, and where.
        reason: String,
    },
}

impl Error {
    pub(crate) fn violation(reason: impl Into<String>) -> Self {
        Error::InvariantViolation {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidOrder { order: 2, min: 3 };
        assert_eq!(format!("{}", err), "invalid order 2: must be at least 3");

        let err = Error::OrderTooLarge { order: 70_000, max: 65_536 };
        assert_eq!(format!("{}", err), "invalid order 70000: must be at most 65536");

        let err = Error::EmptyTree;
        assert_eq!(format!("{}", err), "tree is empty");

        let err = Error::violation("leaf depth 2 != 3");
        assert_eq!(format!("{}", err), "invariant violation: leaf depth 2 != 3");
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Err(Error::EmptyTree)
        }

        assert_eq!(might_fail(), Err(Error::EmptyTree));
    }
}
