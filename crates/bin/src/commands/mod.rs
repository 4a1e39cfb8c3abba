//! Subcommand implementations.

pub mod diff;
pub mod edit;
pub mod get;
pub mod keys;
pub mod materialize;
pub mod set;
