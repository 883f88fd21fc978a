//! Traversal state threaded through one source's recursive merge.

use std::collections::HashSet;

use deepassign_types::{Node, NodeId};

use crate::error::{MergeError, MergeResult};

/// Identity-based record of every target and source node visited while
/// merging one top-level source, plus the current nesting depth.
///
/// The record is append-only: a node is never forgotten on the way back up,
/// so a sub-object reachable twice from the same source is rejected just
/// like a true cycle.
#[derive(Debug)]
pub struct TraversalContext {
    source_index: usize,
    visited: HashSet<NodeId>,
    /// Keeps visited nodes alive so their ids cannot be reused mid-merge.
    retained: Vec<Node>,
    depth: usize,
    max_depth: Option<usize>,
}

impl TraversalContext {
    /// Fresh context for the source at `source_index`.
    pub fn new(source_index: usize, max_depth: Option<usize>) -> Self {
        Self {
            source_index,
            visited: HashSet::new(),
            retained: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Position of the source being merged.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Current nesting depth (0 at the top-level target).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of distinct nodes recorded.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// Returns `true` if nothing has been visited yet.
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Returns `true` if `node` was already visited.
    pub fn contains(&self, node: &Node) -> bool {
        self.visited.contains(&node.id())
    }

    /// Record a (target, source) frame.
    ///
    /// Both nodes are checked before either is recorded, so a top-level call
    /// whose target and source are the same node is accepted.
    pub fn visit(&mut self, target: &Node, source: &Node) -> MergeResult<()> {
        for node in [target, source] {
            if self.contains(node) {
                return Err(MergeError::CircularReference { node: node.id() });
            }
        }
        for node in [target, source] {
            if self.visited.insert(node.id()) {
                self.retained.push(node.clone());
            }
        }
        Ok(())
    }

    /// Step one level deeper, enforcing the depth limit.
    pub fn descend(&mut self) -> MergeResult<()> {
        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                return Err(MergeError::DepthLimitExceeded { limit });
            }
        }
        self.depth += 1;
        Ok(())
    }

    /// Step back up one level.
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
