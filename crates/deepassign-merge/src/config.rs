use serde::{Deserialize, Serialize};

/// Configuration for a [`DeepMerger`](crate::DeepMerger).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Maximum nesting depth below the target. `None` means unbounded, so
    /// very deep sources are limited only by the call stack.
    pub max_depth: Option<usize>,
    /// When `true`, nested `undefined` values are not written to the target.
    pub skip_undefined_values: bool,
}

impl MergeConfig {
    /// Configuration bounded to `max_depth` levels of nesting.
    pub fn bounded(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Default::default()
        }
    }
}
