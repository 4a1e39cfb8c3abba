//!
//! Templar: path-addressable hierarchical key/value data with template
//! inheritance.
//!
//! ## Core Concepts
//!
//! * **Containers (`container::Container`)**: The core mutable store. Each container maps string keys to values in insertion order; values nest as containers, lists of containers and string-keyed maps of containers.
//! * **Paths (`path::Path`)**: Dotted, bracketed addresses such as `slots["hand"].items[2].name` used to read and write values several levels deep.
//! * **Codec (`codec`)**: Type-tagged encoding of every value into a self-describing string payload, and the wire document a container saves to.
//! * **OrderedMap (`ordered::OrderedMap`)**: An insertion-ordered associative container with O(1) lookup backing containers and maps.
//! * **Templates and Instances (`instance`)**: A template owns a baseline container; an instance stores only its overrides and materializes an effective container on demand.

pub mod codec;
pub mod constants;
pub mod container;
pub mod instance;
pub mod ordered;
pub mod path;

pub use container::{Container, Value};
pub use instance::{Instance, Template};
pub use path::Path;

/// Result type used throughout the Templar library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Templar library.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured container errors from the container module
    #[error(transparent)]
    Container(container::ContainerError),

    /// Strict path parsing errors from the path module
    #[error(transparent)]
    Path(path::PathError),

    /// Structured instance errors from the instance module
    #[error(transparent)]
    Instance(instance::InstanceError),

    /// Ordered map misuse from the ordered module
    #[error(transparent)]
    OrderedMap(ordered::OrderedMapError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
            Error::Container(_) => "container",
            Error::Path(_) => "path",
            Error::Instance(_) => "instance",
            Error::OrderedMap(_) => "ordered",
        }
    }

    /// Check if this error indicates a key, index or path was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Container(err) => matches!(err, container::ContainerError::PathNavigation { .. }),
            Error::OrderedMap(err) => err.is_not_found() || err.is_out_of_range(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Container(err) => err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is an invalid argument, including malformed paths.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Container(err) => err.is_invalid_argument(),
            Error::Path(_) => true,
            _ => false,
        }
    }

    /// Check if this error is a path navigation failure.
    pub fn is_navigation_error(&self) -> bool {
        match self {
            Error::Container(err) => err.is_navigation_error(),
            _ => false,
        }
    }

    /// Check if this error is an encoding or decoding failure.
    pub fn is_codec_error(&self) -> bool {
        match self {
            Error::Container(err) => err.is_codec_error(),
            Error::Serialize(_) => true,
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
