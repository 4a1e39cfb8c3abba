//! Constants used throughout the templar library.
//!
//! This module provides central definitions for the stable type identifiers
//! written into wire documents and override entries, and for recursion limits.

/// Default bound on container nesting for deep copies, wire encoding and diffing.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Most empty elements a single write may append to one list when it
/// addresses an index past the end.
pub const MAX_LIST_GROWTH: usize = 1 << 16;

/// Reserved type identifier for an absent/null value.
pub const NULL_TYPE_ID: &str = "null";

/// Type identifier for boolean values.
pub const BOOL_TYPE_ID: &str = "bool";

/// Type identifier for 64-bit signed integers.
pub const INT_TYPE_ID: &str = "int";

/// Type identifier for 64-bit floats.
pub const FLOAT_TYPE_ID: &str = "float";

/// Type identifier for UTF-8 text.
pub const STRING_TYPE_ID: &str = "string";

/// Type identifier for two-component vectors.
pub const VEC2_TYPE_ID: &str = "vec2";

/// Type identifier for three-component vectors.
pub const VEC3_TYPE_ID: &str = "vec3";

/// Type identifier for RGBA colors.
pub const COLOR_TYPE_ID: &str = "color";

/// Type identifier for opaque external asset references.
pub const ASSET_TYPE_ID: &str = "asset";

/// Type identifier for nested containers.
pub const CONTAINER_TYPE_ID: &str = "container";

/// Type identifier for ordered sequences of containers.
pub const LIST_TYPE_ID: &str = "list<container>";

/// Type identifier for ordered string-keyed maps of containers.
pub const MAP_TYPE_ID: &str = "map<string,container>";
