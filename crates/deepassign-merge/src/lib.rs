//! Recursive deep-merge engine for deepassign.
//!
//! Folds one or more source values into a target, left to right. Nested
//! object-like values are never shared with the source: each one is rebuilt
//! as a fresh container of the same kind and populated recursively. Inputs
//! containing a revisited node are rejected with
//! [`MergeError::CircularReference`].
//!
//! # Key Types
//!
//! - [`DeepMerger`] -- Merge engine carrying a [`MergeConfig`]
//! - [`merge`] / [`merge_with`] -- Free-function entry points
//! - [`DeepAssign`] -- Extension trait: `target.deep_assign(&sources)`
//! - [`TraversalContext`] -- Identity-based visited set for one source
//! - [`MergeError`] -- Null source, circular reference, depth limit, borrow conflict

pub mod config;
pub mod context;
pub mod error;
pub mod ext;
pub mod merger;

pub use config::MergeConfig;
pub use context::TraversalContext;
pub use error::{MergeError, MergeResult};
pub use ext::DeepAssign;
pub use merger::{merge, merge_with, DeepMerger};

pub use deepassign_types::{Container, ContainerKind, Key, Node, NodeId, Object, Value};
