//! Value types stored in containers.
//!
//! [`Value`] is a closed union over every kind of data a container can hold.
//! Each operation (copy, encode, compare, navigate) handles the variants with
//! an explicit `match`, so every value kind is covered at compile time.

use std::fmt;

use super::{Container, ContainerError, leaf::LeafType};
use super::leaf::{AssetRef, Color, Vec2, Vec3};
use crate::{codec, constants::*, ordered::OrderedMap};

/// Values that can be stored in a [`Container`].
///
/// # Value Kinds
///
/// ## Leaf Values
/// - [`Value::Null`], [`Value::Bool`], [`Value::Int`], [`Value::Float`], [`Value::Text`]
/// - [`Value::Vec2`], [`Value::Vec3`], [`Value::Color`] - opaque geometric value types
/// - [`Value::Asset`] - opaque external asset reference
/// - [`Value::Other`] - a host leaf type (or a collection of scalars) kept as
///   its type identifier plus encoded payload
///
/// ## Branch Values
/// - [`Value::Container`] - a nested container
/// - [`Value::List`] - an ordered sequence of containers
/// - [`Value::Map`] - an ordered string-keyed map of containers
///
/// # Direct Comparisons
///
/// ```
/// # use templar::container::Value;
/// assert!(Value::from("hello") == "hello");
/// assert!(Value::Int(42) == 42);
/// assert!(!(Value::Int(42) == "42"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null/absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),
    /// Two-component vector
    Vec2(Vec2),
    /// Three-component vector
    Vec3(Vec3),
    /// RGBA color
    Color(Color),
    /// External asset reference
    Asset(AssetRef),
    /// Nested container
    Container(Container),
    /// Ordered sequence of containers
    List(Vec<Container>),
    /// Ordered map of containers
    Map(OrderedMap<String, Container>),
    /// Value of a type the core does not interpret
    Other { type_id: String, payload: String },
}

impl Value {
    /// Returns the stable type identifier of this value.
    pub fn type_id(&self) -> &str {
        match self {
            Value::Null => NULL_TYPE_ID,
            Value::Bool(_) => BOOL_TYPE_ID,
            Value::Int(_) => INT_TYPE_ID,
            Value::Float(_) => FLOAT_TYPE_ID,
            Value::Text(_) => STRING_TYPE_ID,
            Value::Vec2(_) => VEC2_TYPE_ID,
            Value::Vec3(_) => VEC3_TYPE_ID,
            Value::Color(_) => COLOR_TYPE_ID,
            Value::Asset(_) => ASSET_TYPE_ID,
            Value::Container(_) => CONTAINER_TYPE_ID,
            Value::List(_) => LIST_TYPE_ID,
            Value::Map(_) => MAP_TYPE_ID,
            Value::Other { type_id, .. } => type_id,
        }
    }

    /// The zero value for a type identifier, used when a payload cannot be decoded.
    pub fn default_for(type_id: &str) -> Value {
        match type_id {
            NULL_TYPE_ID => Value::Null,
            BOOL_TYPE_ID => Value::Bool(false),
            INT_TYPE_ID => Value::Int(0),
            FLOAT_TYPE_ID => Value::Float(0.0),
            STRING_TYPE_ID => Value::Text(String::new()),
            VEC2_TYPE_ID => Value::Vec2(Vec2::default()),
            VEC3_TYPE_ID => Value::Vec3(Vec3::default()),
            COLOR_TYPE_ID => Value::Color(Color::default()),
            ASSET_TYPE_ID => Value::Asset(AssetRef::default()),
            CONTAINER_TYPE_ID => Value::Container(Container::new()),
            LIST_TYPE_ID => Value::List(Vec::new()),
            MAP_TYPE_ID => Value::Map(OrderedMap::new()),
            other => Value::Other {
                type_id: other.to_string(),
                payload: String::new(),
            },
        }
    }

    /// Wraps a host leaf value.
    ///
    /// Leaf types whose identifier matches a built-in kind decode into that
    /// kind; everything else is kept as [`Value::Other`].
    pub fn from_leaf<T: LeafType>(leaf: &T) -> Result<Value, ContainerError> {
        let payload = serde_json::to_string(leaf).map_err(|e| ContainerError::CodecFailed {
            type_id: T::type_id().to_string(),
            reason: e.to_string(),
        })?;
        codec::decode(&payload, T::type_id())
    }

    /// Extracts a host leaf value if the stored type is one `T` can read.
    pub fn to_leaf<T: LeafType>(&self) -> Option<T> {
        if !T::supports_type_id(self.type_id()) {
            return None;
        }
        let payload = match self {
            Value::Other { payload, .. } => payload.clone(),
            other => codec::encode(other).ok()?,
        };
        serde_json::from_str(&payload).ok()
    }

    /// Returns true for values that cannot contain containers
    pub fn is_leaf(&self) -> bool {
        !self.is_branch()
    }

    /// Returns true for containers, lists and maps
    pub fn is_branch(&self) -> bool {
        matches!(self, Value::Container(_) | Value::List(_) | Value::Map(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a container reference
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Value::Container(c) => Some(c),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable container reference
    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Value::Container(c) => Some(c),
            _ => None,
        }
    }

    /// Attempts to convert to a list reference
    pub fn as_list(&self) -> Option<&Vec<Container>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable list reference
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Container>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Attempts to convert to a map reference
    pub fn as_map(&self) -> Option<&OrderedMap<String, Container>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable map reference
    pub fn as_map_mut(&mut self) -> Option<&mut OrderedMap<String, Container>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    fn mismatch(&self, expected: &str) -> ContainerError {
        ContainerError::TypeMismatch {
            expected: expected.to_string(),
            actual: self.type_id().to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Vec2(v) => write!(f, "({}, {})", v.x, v.y),
            Value::Vec3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Value::Color(c) => write!(f, "rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a),
            Value::Asset(asset) => write!(f, "{asset}"),
            Value::Container(c) => write!(f, "{c}"),
            Value::List(list) => {
                write!(f, "[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {item}")?;
                }
                write!(f, "}}")
            }
            Value::Other { type_id, payload } => write!(f, "<{type_id}>{payload}"),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Vec2> for Value {
    fn from(value: Vec2) -> Self {
        Value::Vec2(value)
    }
}

impl From<Vec3> for Value {
    fn from(value: Vec3) -> Self {
        Value::Vec3(value)
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Value::Color(value)
    }
}

impl From<AssetRef> for Value {
    fn from(value: AssetRef) -> Self {
        Value::Asset(value)
    }
}

impl From<Container> for Value {
    fn from(value: Container) -> Self {
        Value::Container(value)
    }
}

impl From<Vec<Container>> for Value {
    fn from(value: Vec<Container>) -> Self {
        Value::List(value)
    }
}

impl From<OrderedMap<String, Container>> for Value {
    fn from(value: OrderedMap<String, Container>) -> Self {
        Value::Map(value)
    }
}

// TryFrom implementations for typed reads
impl TryFrom<&Value> for bool {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_bool().ok_or_else(|| value.mismatch(BOOL_TYPE_ID))
    }
}

impl TryFrom<&Value> for i64 {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_int().ok_or_else(|| value.mismatch(INT_TYPE_ID))
    }
}

impl TryFrom<&Value> for i32 {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let n = value.as_int().ok_or_else(|| value.mismatch(INT_TYPE_ID))?;
        i32::try_from(n).map_err(|_| ContainerError::TypeMismatch {
            expected: "int (i32 range)".to_string(),
            actual: format!("int {n}"),
        })
    }
}

impl TryFrom<&Value> for u32 {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let n = value.as_int().ok_or_else(|| value.mismatch(INT_TYPE_ID))?;
        u32::try_from(n).map_err(|_| ContainerError::TypeMismatch {
            expected: "int (u32 range)".to_string(),
            actual: format!("int {n}"),
        })
    }
}

impl TryFrom<&Value> for f64 {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_float().ok_or_else(|| value.mismatch(FLOAT_TYPE_ID))
    }
}

impl TryFrom<&Value> for f32 {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_float()
            .map(|n| n as f32)
            .ok_or_else(|| value.mismatch(FLOAT_TYPE_ID))
    }
}

impl TryFrom<&Value> for String {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| value.mismatch(STRING_TYPE_ID))
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = ContainerError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value.as_text().ok_or_else(|| value.mismatch(STRING_TYPE_ID))
    }
}

impl TryFrom<&Value> for Vec2 {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Vec2(v) => Ok(*v),
            other => Err(other.mismatch(VEC2_TYPE_ID)),
        }
    }
}

impl TryFrom<&Value> for Vec3 {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Vec3(v) => Ok(*v),
            other => Err(other.mismatch(VEC3_TYPE_ID)),
        }
    }
}

impl TryFrom<&Value> for Color {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Color(c) => Ok(*c),
            other => Err(other.mismatch(COLOR_TYPE_ID)),
        }
    }
}

impl TryFrom<&Value> for AssetRef {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Asset(asset) => Ok(asset.clone()),
            other => Err(other.mismatch(ASSET_TYPE_ID)),
        }
    }
}

impl TryFrom<&Value> for Container {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_container()
            .cloned()
            .ok_or_else(|| value.mismatch(CONTAINER_TYPE_ID))
    }
}

impl TryFrom<&Value> for Vec<Container> {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_list()
            .cloned()
            .ok_or_else(|| value.mismatch(LIST_TYPE_ID))
    }
}

impl TryFrom<&Value> for OrderedMap<String, Container> {
    type Error = ContainerError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_map()
            .cloned()
            .ok_or_else(|| value.mismatch(MAP_TYPE_ID))
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        self.as_int() == Some(*other as i64)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self.as_float() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}
