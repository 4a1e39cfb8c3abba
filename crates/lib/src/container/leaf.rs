//! Leaf value types and the contract host leaf types implement.
//!
//! The core never interprets a leaf beyond three capabilities: a stable type
//! identifier, a self-contained encoding, and value equality. [`LeafType`]
//! captures exactly that. The built-in geometric types and [`AssetRef`]
//! implement it, and hosts can implement it for their own types to store them
//! through [`Value::from_leaf`](super::Value::from_leaf).

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::constants::{ASSET_TYPE_ID, COLOR_TYPE_ID, VEC2_TYPE_ID, VEC3_TYPE_ID};

/// Contract for leaf values stored in containers.
///
/// # Example
///
/// ```
/// use templar::container::{Container, LeafType, Value};
///
/// #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
/// struct Range {
///     min: i32,
///     max: i32,
/// }
///
/// impl LeafType for Range {
///     fn type_id() -> &'static str {
///         "range:v0"
///     }
/// }
///
/// let mut c = Container::new();
/// c.set("damage", Value::from_leaf(&Range { min: 2, max: 5 })?)?;
/// assert_eq!(c.get_leaf::<Range>("damage"), Some(Range { min: 2, max: 5 }));
/// assert_eq!(c.value_type("damage"), Some("range:v0"));
/// # Ok::<(), templar::Error>(())
/// ```
pub trait LeafType: Clone + PartialEq + Serialize + DeserializeOwned {
    /// Returns the stable identifier written next to encoded values.
    ///
    /// The format is typically `"name"` or `"name:version"`.
    fn type_id() -> &'static str;

    /// Check if this type can decode values stored under `type_id`.
    ///
    /// Override to keep reading values written by older versions.
    fn supports_type_id(type_id: &str) -> bool {
        type_id == Self::type_id()
    }
}

/// A two-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl LeafType for Vec2 {
    fn type_id() -> &'static str {
        VEC2_TYPE_ID
    }
}

/// A three-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl LeafType for Vec3 {
    fn type_id() -> &'static str {
        VEC3_TYPE_ID
    }
}

/// An RGBA color with linear components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl LeafType for Color {
    fn type_id() -> &'static str {
        COLOR_TYPE_ID
    }
}

/// An opaque reference to an externally managed asset.
///
/// The core stores and round-trips the identifier but never resolves it;
/// loading the asset is the host's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AssetRef {
    pub id: String,
}

impl AssetRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Returns true for the unset reference.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset:{}", self.id)
    }
}

impl LeafType for AssetRef {
    fn type_id() -> &'static str {
        ASSET_TYPE_ID
    }
}
