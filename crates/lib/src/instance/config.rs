//! Instance configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_DEPTH;

/// How [`Instance::set`](super::Instance::set) treats a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Record the write as an override.
    #[default]
    Persistent,
    /// Change only the runtime container; nothing is recorded.
    Ephemeral,
}

/// How lists and maps of containers are compared when diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionDiff {
    /// Compare element by element when the shapes line up.
    ///
    /// Lists of equal length recurse into `key[i]`. Maps that still contain
    /// every template key recurse into `key["k"]` and record new keys as
    /// whole entries. Anything else records the whole collection.
    #[default]
    Structural,
    /// Always record collections as overridden, even when identical.
    Reference,
}

/// Write policy and limits for an [`Instance`](super::Instance).
///
/// # Example
///
/// ```
/// use templar::instance::{InstanceConfig, WriteMode};
///
/// let config = InstanceConfig {
///     write_mode: WriteMode::Ephemeral,
///     ..Default::default()
/// };
/// assert_eq!(config.max_depth, templar::constants::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Mode used by [`Instance::set`](super::Instance::set).
    pub write_mode: WriteMode,
    /// Collection comparison used when seeding from a working copy.
    pub collection_diff: CollectionDiff,
    /// Recursion bound for materialization and diffing.
    pub max_depth: usize,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            write_mode: WriteMode::Persistent,
            collection_diff: CollectionDiff::Structural,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl InstanceConfig {
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn with_collection_diff(mut self, collection_diff: CollectionDiff) -> Self {
        self.collection_diff = collection_diff;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
