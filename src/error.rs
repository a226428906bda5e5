//! Error types. Tree operations never fail: a missing value is an `Option::None`. The types here
//! cover the record ingestion boundary and the structural checks used by tests.

use std::io;

/// Errors raised while loading records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The record source could not be read.
    #[error("failed to read records: {0}")]
    Io(#[from] io::Error),

    /// A row could not be turned into a record. Ingestion skips these rows, the variant exists so
    /// callers parsing single rows get a reason.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the source, header included.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },
}

/// A structural invariant of a tree that does not hold. Seeing one of these means a bug in the
/// tree, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// An in-order traversal produced a value smaller than its predecessor.
    #[error("in-order traversal is not sorted at position {position}")]
    Unordered {
        /// Index in the in-order sequence of the out-of-place value.
        position: usize,
    },

    /// A node's subtrees differ in height by more than one.
    #[error("node at in-order position {position} has balance factor {balance}")]
    Unbalanced {
        /// Index in the in-order sequence of the offending node.
        position: usize,
        /// `height(left) - height(right)` at that node.
        balance: i32,
    },

    /// A node's stored height disagrees with its children.
    #[error("node at in-order position {position} stores height {stored}, expected {actual}")]
    StaleHeight {
        /// Index in the in-order sequence of the offending node.
        position: usize,
        /// The height recorded on the node.
        stored: i32,
        /// The height computed from its children.
        actual: i32,
    },

    /// The tracked length disagrees with the number of reachable nodes.
    #[error("tree reports {reported} values but {reachable} are reachable")]
    LengthMismatch {
        /// Value returned by `len()`.
        reported: usize,
        /// Number of nodes reached by a traversal.
        reachable: usize,
    },
}

/// Returned when a traversal order name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown traversal order `{0}` (expected in, pre, post or level)")]
pub struct ParseOrderError(pub String);
