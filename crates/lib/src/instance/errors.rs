//! Instance error types for the templar library.
//!
//! Replay failures are not returned from reads. Materialization records them
//! and keeps going; callers inspect them through
//! [`Instance::replay_failures`](super::Instance::replay_failures).

use thiserror::Error;

/// Errors that can occur while building or restoring an instance.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InstanceError {
    /// A stored override could not be applied to the template.
    #[error("Override '{path}' could not be replayed: {reason}")]
    OverrideReplayFailed {
        /// The override's path string
        path: String,
        /// Why the override was skipped
        reason: String,
    },

    /// An instance record refers to a different template.
    #[error("Instance record targets template '{actual}', expected '{expected}'")]
    TemplateMismatch {
        /// Identifier of the template supplied by the caller
        expected: String,
        /// Identifier stored in the record
        actual: String,
    },
}

impl InstanceError {
    /// Check if this error is a skipped override replay
    pub fn is_replay_failure(&self) -> bool {
        matches!(self, InstanceError::OverrideReplayFailed { .. })
    }

    /// Check if this error is a template mismatch
    pub fn is_template_mismatch(&self) -> bool {
        matches!(self, InstanceError::TemplateMismatch { .. })
    }

    /// Get the override path if this is a replay failure
    pub fn path(&self) -> Option<&str> {
        match self {
            InstanceError::OverrideReplayFailed { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<InstanceError> for crate::Error {
    fn from(err: InstanceError) -> Self {
        crate::Error::Instance(err)
    }
}
