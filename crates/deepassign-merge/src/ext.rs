//! Method-call surface for merging.

use deepassign_types::{Node, Value};

use crate::error::MergeResult;
use crate::merger::merge;

/// Merge sources into `self`, called as a method on the target.
///
/// Implemented for [`Node`] and [`Value`]. Equivalent to calling
/// [`merge`](crate::merge) with `self` as the target.
pub trait DeepAssign {
    /// Fold `sources` into `self` and return the resulting target node.
    fn deep_assign(&self, sources: &[Value]) -> MergeResult<Node>;
}

impl DeepAssign for Node {
    fn deep_assign(&self, sources: &[Value]) -> MergeResult<Node> {
        merge(Value::Object(self.clone()), sources)
    }
}

/// Primitive receivers are boxed first, so the merge is only visible
/// through the returned node.
impl DeepAssign for Value {
    fn deep_assign(&self, sources: &[Value]) -> MergeResult<Node> {
        merge(self.clone(), sources)
    }
}
