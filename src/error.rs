//! Errors returned by [`OrderedTree`][crate::OrderedTree] operations.

use thiserror::Error;

/// The ways an [`OrderedTree`][crate::OrderedTree] operation can fail.
///
/// Misses are not errors: `insert` of a duplicate, `remove` of an absent value
/// and `contains` all report their outcome as a `bool`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The operation needs at least one element but the tree was empty.
    #[error("cannot {operation}: the tree is empty")]
    EmptyStructure {
        /// Name of the operation that was attempted.
        operation: &'static str,
    },
}

/// Shorthand for results whose error is a [`TreeError`].
pub type Result<T, E = TreeError> = std::result::Result<T, E>;
