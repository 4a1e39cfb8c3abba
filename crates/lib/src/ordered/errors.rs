//! Error types for ordered map operations.

use thiserror::Error;

/// Structured errors for [`OrderedMap`](super::OrderedMap) operations.
///
/// Only the explicit reordering operation can fail; insertion, lookup and
/// removal are total.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderedMapError {
    /// The key to move is not present in the map
    #[error("Ordered map key not found: {key}")]
    KeyNotFound { key: String },

    /// The target index is outside `[0, len)`
    #[error("Ordered map index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl OrderedMapError {
    /// Check if this error indicates a missing key
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrderedMapError::KeyNotFound { .. })
    }

    /// Check if this error indicates an out of range index
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, OrderedMapError::IndexOutOfRange { .. })
    }
}

impl From<OrderedMapError> for crate::Error {
    fn from(err: OrderedMapError) -> Self {
        crate::Error::OrderedMap(err)
    }
}
