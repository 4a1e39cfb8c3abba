//! Hierarchical key/value containers.
//!
//! A [`Container`] maps string keys to [`Value`]s in insertion order. Values
//! can themselves be containers, lists of containers, or string-keyed maps of
//! containers, so a single root container describes a whole tree of
//! configuration or game-object data.
//!
//! Containers own their children. Copies (`clone` or [`Container::deep_copy`])
//! never share structure with the original, and they never carry the
//! original's observers.
//!
//! # Usage
//!
//! ```
//! use templar::container::Container;
//!
//! let mut root = Container::new();
//! root.set("name", "orc")?;
//! root.path_set("stats.hp", 30)?;
//! root.path_set("loot[1].item", "axe")?;
//!
//! assert_eq!(root.get_or("name", ""), "orc");
//! assert_eq!(root.path_get("stats.hp", 0), 30);
//! assert_eq!(root.path_get("loot[1].item", String::new()), "axe");
//! // loot[0] was created empty to make room for loot[1]
//! assert!(root.path_contains("loot[0]"));
//! # Ok::<(), templar::Error>(())
//! ```

use std::fmt;

use tracing::{debug, error, warn};

use crate::{
    codec,
    constants::DEFAULT_MAX_DEPTH,
    ordered::{self, OrderedMap, OrderedMapError},
};

pub mod errors;
pub mod leaf;
pub mod observer;
mod paths;
pub mod value;

pub use errors::ContainerError;
pub use leaf::{AssetRef, Color, LeafType, Vec2, Vec3};
pub use observer::{Observers, SubscriptionId, ValueChange};
pub use value::Value;

/// An ordered string-keyed collection of [`Value`]s.
pub struct Container {
    entries: OrderedMap<String, Value>,
    observers: Observers,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            entries: OrderedMap::new(),
            observers: Observers::new(),
        }
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the container has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is present at the top level.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw access to a top-level value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Typed read that falls back to `default`.
    ///
    /// A missing key returns `default` silently. A value of the wrong type
    /// also returns `default`, after logging a warning.
    pub fn get_or<'a, T>(&'a self, key: &str, default: T) -> T
    where
        T: TryFrom<&'a Value, Error = ContainerError>,
    {
        match self.entries.get(key) {
            None => default,
            Some(value) => T::try_from(value).unwrap_or_else(|err| {
                warn!(key, error = %err, "Type mismatch reading container value; using default");
                default
            }),
        }
    }

    /// Typed read that reports absence and mismatches as `None`.
    pub fn try_get<'a, T>(&'a self, key: &str) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = ContainerError>,
    {
        T::try_from(self.entries.get(key)?).ok()
    }

    /// Reads a host leaf value stored with [`Value::from_leaf`].
    pub fn get_leaf<T: LeafType>(&self, key: &str) -> Option<T> {
        self.entries.get(key)?.to_leaf()
    }

    /// Mutable access to a nested container.
    ///
    /// Changes made through the returned reference notify the nested
    /// container's observers, not this container's.
    pub fn get_container_mut(&mut self, key: &str) -> Option<&mut Container> {
        self.entries.get_mut(key)?.as_container_mut()
    }

    /// Stores `value` under `key`, returning the previous value.
    ///
    /// Replacing an existing key keeps its position. Observers are notified
    /// after the write.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, ContainerError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ContainerError::InvalidArgument {
                reason: "container keys must not be empty".to_string(),
            });
        }
        let old = self.entries.set(key.clone(), value.into());
        self.observers.notify(&ValueChange {
            key: &key,
            old: old.as_ref(),
            new: self.entries.get(&key),
        });
        Ok(old)
    }

    /// Removes a top-level key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let old = self.entries.remove(key)?;
        self.observers.notify(&ValueChange {
            key,
            old: Some(&old),
            new: None,
        });
        Some(old)
    }

    /// Removes every key, notifying observers once per key.
    pub fn clear(&mut self) {
        for key in self.keys() {
            self.remove(&key);
        }
    }

    /// Snapshot of the top-level keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Iterates top-level entries in insertion order.
    pub fn iter(&self) -> ordered::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Type identifier of the value under `key`.
    pub fn value_type(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(Value::type_id)
    }

    /// Moves `key` to position `index` in iteration order.
    pub fn move_key(&mut self, key: &str, index: usize) -> Result<(), OrderedMapError> {
        self.entries.move_entry(key, index)
    }

    /// Returns the container under `key`, creating it if needed.
    ///
    /// A value of another type under `key` is replaced.
    pub fn get_or_create_container(&mut self, key: &str) -> Result<&mut Container, ContainerError> {
        if !matches!(self.entries.get(key), Some(Value::Container(_))) {
            self.replace_for_create(key, Value::Container(Container::new()))?;
        }
        match self.entries.get_mut(key) {
            Some(Value::Container(container)) => Ok(container),
            _ => Err(ContainerError::navigation(key, "container vanished during creation")),
        }
    }

    /// Returns the list under `key`, creating an empty one if needed.
    ///
    /// A value of another type under `key` is replaced.
    pub fn get_or_create_list(&mut self, key: &str) -> Result<&mut Vec<Container>, ContainerError> {
        if !matches!(self.entries.get(key), Some(Value::List(_))) {
            self.replace_for_create(key, Value::List(Vec::new()))?;
        }
        match self.entries.get_mut(key) {
            Some(Value::List(list)) => Ok(list),
            _ => Err(ContainerError::navigation(key, "list vanished during creation")),
        }
    }

    /// Returns the map under `key`, creating an empty one if needed.
    ///
    /// A value of another type under `key` is replaced.
    pub fn get_or_create_map(
        &mut self,
        key: &str,
    ) -> Result<&mut OrderedMap<String, Container>, ContainerError> {
        if !matches!(self.entries.get(key), Some(Value::Map(_))) {
            self.replace_for_create(key, Value::Map(OrderedMap::new()))?;
        }
        match self.entries.get_mut(key) {
            Some(Value::Map(map)) => Ok(map),
            _ => Err(ContainerError::navigation(key, "map vanished during creation")),
        }
    }

    fn replace_for_create(&mut self, key: &str, fresh: Value) -> Result<(), ContainerError> {
        if let Some(existing) = self.entries.get(key) {
            debug!(
                key,
                existing = existing.type_id(),
                replacement = fresh.type_id(),
                "Replacing value to create a branch"
            );
        }
        self.set(key, fresh).map(|_| ())
    }

    /// Full structural copy, bounded by [`DEFAULT_MAX_DEPTH`].
    pub fn deep_copy(&self) -> Container {
        self.deep_copy_with_limit(DEFAULT_MAX_DEPTH)
    }

    /// Full structural copy that stops descending below `max_depth` levels.
    ///
    /// Containers nested deeper than the limit are copied as empty
    /// containers and an error is logged.
    pub fn deep_copy_with_limit(&self, max_depth: usize) -> Container {
        let mut guard = DepthGuard::new(max_depth);
        let copy = self.copy_within(&mut guard);
        if guard.exceeded() {
            error!(limit = max_depth, "Deep copy truncated at the depth limit");
        }
        copy
    }

    fn copy_within(&self, guard: &mut DepthGuard) -> Container {
        let mut copy = Container::new();
        for (key, value) in self.entries.iter() {
            copy.entries.set(key.clone(), copy_value(value, guard));
        }
        copy
    }

    /// Encodes this container as a wire document.
    pub fn to_wire_format(&self) -> codec::WireDocument {
        codec::encode_document(self, DEFAULT_MAX_DEPTH)
    }

    /// Rebuilds a container from a wire document.
    ///
    /// Fields that fail to decode fall back to their type's default value.
    pub fn from_wire_format(document: &codec::WireDocument) -> Container {
        codec::decode_document(document, DEFAULT_MAX_DEPTH)
    }

    /// Encodes this container as a wire document JSON string.
    pub fn to_wire_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.to_wire_format())?)
    }

    /// Parses a wire document JSON string.
    ///
    /// Empty or malformed input yields an empty container.
    pub fn from_wire_str(input: &str) -> Container {
        if input.trim().is_empty() {
            return Container::new();
        }
        match serde_json::from_str::<codec::WireDocument>(input) {
            Ok(document) => Container::from_wire_format(&document),
            Err(err) => {
                warn!(error = %err, "Malformed wire document; using an empty container");
                Container::new()
            }
        }
    }

    /// Registry of this container's change observers.
    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    /// Subscribes to top-level changes of this container.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ValueChange<'_>) + 'static,
    {
        self.observers.subscribe(callback)
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

fn copy_value(value: &Value, guard: &mut DepthGuard) -> Value {
    match value {
        Value::Container(child) => Value::Container(copy_child(child, guard)),
        Value::List(list) => Value::List(list.iter().map(|child| copy_child(child, guard)).collect()),
        Value::Map(map) => Value::Map(
            map.iter()
                .map(|(key, child)| (key.clone(), copy_child(child, guard)))
                .collect(),
        ),
        leaf => leaf.clone(),
    }
}

fn copy_child(child: &Container, guard: &mut DepthGuard) -> Container {
    if !guard.enter() {
        return Container::new();
    }
    let copy = child.copy_within(guard);
    guard.leave();
    copy
}

/// Recursion bound threaded through one top-level traversal.
#[derive(Debug)]
pub(crate) struct DepthGuard {
    limit: usize,
    depth: usize,
    exceeded: bool,
}

impl DepthGuard {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            depth: 0,
            exceeded: false,
        }
    }

    /// Descends one level. Returns false, and remembers it, if the limit is reached.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= self.limit {
            self.exceeded = true;
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn exceeded(&self) -> bool {
        self.exceeded
    }

    pub(crate) fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

/// Unbounded structural copy. Observers are not copied.
impl Clone for Container {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            observers: Observers::new(),
        }
    }
}

/// Containers compare by content; key order is ignored.
impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.entries.get(key) == Some(value))
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = (&'a String, &'a Value);
    type IntoIter = ordered::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
