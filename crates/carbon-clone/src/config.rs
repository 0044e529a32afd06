//! Configuration for the deep-copy engine.

use serde::{Deserialize, Serialize};

/// Options for a [`DeepCloner`](crate::DeepCloner).
///
/// Deserializes from `{}` (all defaults) or e.g. `{"max_depth": 64}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneOptions {
    /// Maximum container nesting depth. The top-level container is depth 1.
    /// Default: `None` (unlimited)
    pub max_depth: Option<usize>,
}

impl CloneOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// No depth limit.
    pub fn unlimited() -> Self {
        Self { max_depth: None }
    }

    /// Reject inputs nested deeper than `limit` containers.
    pub fn with_max_depth(limit: usize) -> Self {
        Self {
            max_depth: Some(limit),
        }
    }

    /// Set the depth limit.
    pub fn max_depth(mut self, limit: Option<usize>) -> Self {
        self.max_depth = limit;
        self
    }

    /// Check whether a container at `depth` is allowed.
    pub fn permits_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|limit| depth <= limit)
    }
}
