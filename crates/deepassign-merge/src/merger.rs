//! The deep-merge algorithm.
//!
//! [`DeepMerger::merge`] coerces the target to an object and folds each
//! source into it in argument order. For one source the walk is depth-first:
//!
//! 1. Reject a `null` source and any node already in the
//!    [`TraversalContext`].
//! 2. Snapshot the source's keys (or elements) in enumeration order.
//! 3. For each key, an object-like value is replaced in the target by an
//!    empty container of the same kind, which is then populated by
//!    recursion; any other value is written as-is.
//!
//! Existing target containers under an overlapping key are replaced, not
//! merged into. Errors abort the whole call and leave the target partially
//! written.

use tracing::{debug, trace, warn};

use deepassign_types::{Container, Key, Node, Value};

use crate::config::MergeConfig;
use crate::context::TraversalContext;
use crate::error::{MergeError, MergeResult};

/// Merge `sources` into `target` with the default configuration.
pub fn merge(target: Value, sources: &[Value]) -> MergeResult<Node> {
    DeepMerger::default().merge(target, sources)
}

/// Merge `sources` into `target` with an explicit configuration.
pub fn merge_with(config: MergeConfig, target: Value, sources: &[Value]) -> MergeResult<Node> {
    DeepMerger::new(config).merge(target, sources)
}

/// The merge engine.
#[derive(Clone, Debug, Default)]
pub struct DeepMerger {
    config: MergeConfig,
}

impl DeepMerger {
    /// Create a merger with the given configuration.
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Fold every source into `target`, left to right, and return the
    /// (possibly boxed) target.
    ///
    /// `undefined` and non-null primitive sources are skipped. A `null`
    /// source fails with [`MergeError::NullSource`].
    pub fn merge(&self, target: Value, sources: &[Value]) -> MergeResult<Node> {
        let target = target.to_object();

        for (index, source) in sources.iter().enumerate() {
            if !source.is_object_like() && !source.is_null() {
                trace!(index, kind = source.type_name(), "skipping non-object source");
                continue;
            }

            debug!(index, target = %target.id(), kind = ?source.container_kind(), "merging source");
            let mut ctx = TraversalContext::new(index, self.config.max_depth);
            if let Err(err) = self.merge_one_source(&target, source, &mut ctx) {
                warn!(index, error = %err, "merge aborted");
                return Err(err);
            }
            debug!(index, visited = ctx.len(), "source merged");
        }

        Ok(target)
    }

    /// Merge a single source into `target`, recording nodes in `ctx`.
    ///
    /// Only a `null` source is an error here; nested `null` values are
    /// ordinary primitives and never reach this check as a source.
    pub fn merge_one_source(
        &self,
        target: &Node,
        source: &Value,
        ctx: &mut TraversalContext,
    ) -> MergeResult<()> {
        let source = match source {
            Value::Null => {
                return Err(MergeError::NullSource {
                    index: ctx.source_index(),
                })
            }
            Value::Object(node) => node,
            _ => return Ok(()),
        };

        ctx.visit(target, source)?;

        // Snapshot before writing: target and source may be the same node.
        let entries: Vec<(Key, Value)> = {
            let object = source.try_borrow()?;
            object
                .enumerate_keys()
                .into_iter()
                .map(|key| {
                    let value = object.get_value(&key).unwrap_or_default();
                    (key, value)
                })
                .collect()
        };

        for (key, value) in entries {
            match value {
                Value::Object(nested) => {
                    let empty = nested.try_borrow()?.empty_like();
                    trace!(
                        key = ?key,
                        kind = %empty.kind(),
                        depth = ctx.depth() + 1,
                        "constructed nested container"
                    );
                    let fresh = Node::new(empty);
                    target
                        .try_borrow_mut()?
                        .set_value(key, Value::Object(fresh.clone()));

                    ctx.descend()?;
                    self.merge_one_source(&fresh, &Value::Object(nested), ctx)?;
                    ctx.ascend();
                }
                Value::Undefined if self.config.skip_undefined_values => {}
                primitive => target.try_borrow_mut()?.set_value(key, primitive),
            }
        }

        Ok(())
    }
}
