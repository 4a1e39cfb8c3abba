//! Error types for container operations.
//!
//! This module defines structured error types for container storage, path
//! navigation and value conversion. Type mismatches on reads are normally
//! recovered by the caller-supplied default; the variants here surface when a
//! caller asks for a strict result or when a write cannot be honored.

use thiserror::Error;

/// Structured error types for container operations.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ContainerError {
    /// An empty key or path was passed to an operation that requires one
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A stored value does not have the requested type
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A path segment did not resolve
    #[error("Cannot navigate path '{path}': {reason}")]
    PathNavigation { path: String, reason: String },

    /// A non-container value was written at a list index or map key
    #[error("Cannot store {actual} at '{path}': list elements and map values must be containers")]
    NonContainerElement { path: String, actual: String },

    /// Encoding or decoding a value payload failed
    #[error("Codec failure for type '{type_id}': {reason}")]
    CodecFailed { type_id: String, reason: String },

    /// Nesting exceeded the configured recursion bound
    #[error("Container nesting exceeds the depth limit of {limit}")]
    DepthExceeded { limit: usize },
}

impl ContainerError {
    /// Check if this error is an invalid argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ContainerError::InvalidArgument { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            ContainerError::TypeMismatch { .. } | ContainerError::NonContainerElement { .. }
        )
    }

    /// Check if this error is a navigation failure
    pub fn is_navigation_error(&self) -> bool {
        matches!(
            self,
            ContainerError::PathNavigation { .. } | ContainerError::NonContainerElement { .. }
        )
    }

    /// Check if this error is related to encoding or decoding
    pub fn is_codec_error(&self) -> bool {
        matches!(self, ContainerError::CodecFailed { .. })
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            ContainerError::PathNavigation { path, .. }
            | ContainerError::NonContainerElement { path, .. } => Some(path),
            _ => None,
        }
    }

    pub(crate) fn navigation(path: impl ToString, reason: impl Into<String>) -> Self {
        ContainerError::PathNavigation {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ContainerError> for crate::Error {
    fn from(err: ContainerError) -> Self {
        crate::Error::Container(err)
    }
}
