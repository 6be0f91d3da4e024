use thiserror::Error;

/// An invariant violation found by [`AvlTree::validate`](crate::AvlTree::validate).
///
/// `depth` is counted from the root, which sits at depth 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node at depth {depth} is out of order with respect to an ancestor")]
    OutOfOrder { depth: usize },

    #[error("node at depth {depth} has balance factor {balance}")]
    Unbalanced { depth: usize, balance: i32 },

    #[error("node at depth {depth} stores height {stored}, expected {expected}")]
    StaleHeight {
        depth: usize,
        stored: usize,
        expected: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_depth() {
        let err = TreeError::Unbalanced { depth: 2, balance: -2 };
        assert_eq!(err.to_string(), "node at depth 2 has balance factor -2");

        let err = TreeError::StaleHeight {
            depth: 0,
            stored: 1,
            expected: 3,
        };
        assert_eq!(err.to_string(), "node at depth 0 stores height 1, expected 3");
    }
}
