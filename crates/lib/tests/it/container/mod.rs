//! Container integration tests
//!
//! This module tests direct key access, path navigation, change observers
//! and the wire format. Tests are organized by concern.

mod observers;
mod path_operations;
mod serialization;
