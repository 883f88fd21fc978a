use thiserror::Error;

use crate::node::NodeId;

/// Errors produced by value-model operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("node {0} is mutably borrowed elsewhere")]
    AlreadyBorrowed(NodeId),

    #[error("node {0} is borrowed elsewhere and cannot be mutated")]
    AlreadyBorrowedMut(NodeId),

    #[error("expected an object-like value, got {0}")]
    NotAnObject(&'static str),
}

/// Result alias for value-model operations.
pub type TypeResult<T> = Result<T, TypeError>;
