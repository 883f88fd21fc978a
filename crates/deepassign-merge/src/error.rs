//! Error types for the merge engine.

use deepassign_types::{NodeId, TypeError};

/// Errors that abort a merge call.
///
/// Every variant is fatal to the whole `merge` invocation: later sources are
/// not attempted, and the target keeps whatever was written before the
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// A top-level source argument was `null`.
    #[error("source {index} is null")]
    NullSource {
        /// Position of the offending source in the argument list.
        index: usize,
    },

    /// A node was reached a second time while merging one source.
    #[error("the source object includes a circular reference at {node}")]
    CircularReference {
        /// The node that was revisited.
        node: NodeId,
    },

    /// Nesting exceeded the configured `max_depth`.
    #[error("merge depth limit of {limit} exceeded")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// A node could not be borrowed (it is held elsewhere by the caller).
    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
