//! Path-based navigation over nested containers.
//!
//! A property segment looks a key up in the current container. When it is
//! followed by an accessor, the property must name a list (for `[i]`) or a
//! map (for `["k"]`) and the accessor selects one of its containers.
//!
//! Reads never mutate. Writes create whatever is missing along the way:
//! intermediate containers for properties, lists grown with empty containers
//! up to the requested index, and map entries for unknown keys. A write that
//! would append more than [`MAX_LIST_GROWTH`] elements to a list fails before
//! anything is created.

use std::borrow::Cow;

use tracing::{debug, warn};

use super::{Container, ContainerError, Value};
use crate::{
    constants::MAX_LIST_GROWTH,
    path::{AsPath, Path, Segment},
};

/// Where a read ended up.
enum Resolved<'a> {
    Value(&'a Value),
    /// A list element, a map entry, or the root for the empty path.
    Element(&'a Container),
}

impl<'a> Resolved<'a> {
    fn into_cow(self) -> Cow<'a, Value> {
        match self {
            Resolved::Value(value) => Cow::Borrowed(value),
            Resolved::Element(container) => Cow::Owned(Value::Container(container.clone())),
        }
    }
}

impl Container {
    /// Resolves `path` to the value it names.
    ///
    /// List elements and map entries are returned as owned
    /// [`Value::Container`] copies; everything else is borrowed.
    pub fn path_lookup(&self, path: impl AsPath) -> crate::Result<Cow<'_, Value>> {
        let path = path.as_path()?;
        Ok(self.resolve(&path)?.into_cow())
    }

    /// Typed read at `path` that falls back to `default`.
    ///
    /// Unparseable paths and type mismatches log a warning; a path that does
    /// not resolve returns `default` quietly.
    pub fn path_get<T>(&self, path: impl AsPath, default: T) -> T
    where
        T: for<'v> TryFrom<&'v Value, Error = ContainerError>,
    {
        let path = match path.as_path() {
            Ok(path) => path,
            Err(err) => {
                warn!(error = %err, "Invalid path; using default");
                return default;
            }
        };
        let value = match self.resolve(&path) {
            Ok(resolved) => resolved.into_cow(),
            Err(err) => {
                debug!(path = %path, error = %err, "Path did not resolve; using default");
                return default;
            }
        };
        T::try_from(&*value).unwrap_or_else(|err| {
            warn!(path = %path, error = %err, "Type mismatch at path; using default");
            default
        })
    }

    /// Typed read at `path` that reports every failure as `None`.
    pub fn path_try_get<T>(&self, path: impl AsPath) -> Option<T>
    where
        T: for<'v> TryFrom<&'v Value, Error = ContainerError>,
    {
        let path = path.as_path().ok()?;
        let value = self.resolve(&path).ok()?.into_cow();
        T::try_from(&*value).ok()
    }

    /// Returns true if `path` parses and resolves.
    pub fn path_contains(&self, path: impl AsPath) -> bool {
        path.as_path()
            .is_ok_and(|path| self.resolve(&path).is_ok())
    }

    /// Writes `value` at `path`, creating missing branches.
    ///
    /// Returns the value previously stored at `path`. Values written at a
    /// list index or map key must be containers.
    pub fn path_set(
        &mut self,
        path: impl AsPath,
        value: impl Into<Value>,
    ) -> crate::Result<Option<Value>> {
        let path = path.as_path()?;
        Ok(self.assign(&path, value.into())?)
    }

    /// Removes the value at `path`, returning it.
    ///
    /// Missing branches are not an error; the result is simply `None`.
    /// Removing a list element shifts the elements after it.
    pub fn path_remove(&mut self, path: impl AsPath) -> crate::Result<Option<Value>> {
        let path = path.as_path()?;
        Ok(self.detach(&path)?)
    }

    fn resolve<'a>(&'a self, path: &Path) -> Result<Resolved<'a>, ContainerError> {
        check_shape(path)?;
        let segments = path.segments();
        let mut current = self;
        let mut i = 0;

        while i < segments.len() {
            let Segment::Property(name) = &segments[i] else {
                return Err(misplaced_accessor(path));
            };
            let value = current.get(name).ok_or_else(|| {
                ContainerError::navigation(path, format!("key '{name}' not found"))
            })?;

            let step = match segments.get(i + 1) {
                Some(Segment::ListIndex(index)) => {
                    i += 2;
                    Resolved::Element(list_element(path, name, value, *index)?)
                }
                Some(Segment::MapKey(key)) => {
                    i += 2;
                    Resolved::Element(map_entry(path, name, value, key)?)
                }
                _ => {
                    i += 1;
                    Resolved::Value(value)
                }
            };
            if i >= segments.len() {
                return Ok(step);
            }

            current = match step {
                Resolved::Element(container) | Resolved::Value(Value::Container(container)) => {
                    container
                }
                Resolved::Value(other) => {
                    return Err(ContainerError::navigation(
                        path,
                        format!("'{name}' holds {} rather than a container", other.type_id()),
                    ));
                }
            };
        }

        Ok(Resolved::Element(current))
    }

    fn assign(&mut self, path: &Path, value: Value) -> Result<Option<Value>, ContainerError> {
        check_shape(path)?;
        let segments = path.segments();
        if segments.is_empty() {
            return Err(ContainerError::InvalidArgument {
                reason: "cannot assign to the empty path".to_string(),
            });
        }
        // Reject before anything along the way gets created
        if segments.last().is_some_and(Segment::is_accessor) && !matches!(value, Value::Container(_)) {
            return Err(non_container(path, &value));
        }
        self.check_growth(path)?;

        let mut current = self;
        let mut i = 0;
        loop {
            let Segment::Property(name) = &segments[i] else {
                return Err(misplaced_accessor(path));
            };
            let terminal_accessor = i + 2 == segments.len();

            match segments.get(i + 1) {
                None => return current.set(name.as_str(), value),
                Some(Segment::Property(_)) => {
                    current = current.get_or_create_container(name)?;
                    i += 1;
                }
                Some(Segment::ListIndex(index)) => {
                    let index = *index;
                    let list = current.get_or_create_list(name)?;
                    let grew = list.len() <= index;
                    if grew {
                        list.resize_with(index + 1, Container::new);
                    }
                    if terminal_accessor {
                        let old = std::mem::replace(&mut list[index], into_element(path, value)?);
                        return Ok((!grew).then_some(Value::Container(old)));
                    }
                    current = &mut list[index];
                    i += 2;
                }
                Some(Segment::MapKey(key)) => {
                    let map = current.get_or_create_map(name)?;
                    if terminal_accessor {
                        let old = map.set(key.clone(), into_element(path, value)?);
                        return Ok(old.map(Value::Container));
                    }
                    if !map.contains_key(key.as_str()) {
                        map.set(key.clone(), Container::new());
                    }
                    current = match map.get_mut(key.as_str()) {
                        Some(entry) => entry,
                        None => return Err(ContainerError::navigation(path, "map entry vanished")),
                    };
                    i += 2;
                }
            }
        }
    }

    /// Rejects a write whose list indices reach too far past the lists' ends.
    fn check_growth(&self, path: &Path) -> Result<(), ContainerError> {
        let segments = path.segments();
        for (i, segment) in segments.iter().enumerate() {
            let Segment::ListIndex(index) = segment else {
                continue;
            };
            let len = match self.resolve(&Path::from(segments[..i].to_vec())) {
                Ok(Resolved::Value(Value::List(list))) => list.len(),
                _ => 0,
            };
            if *index >= len && *index - len >= MAX_LIST_GROWTH {
                return Err(ContainerError::navigation(
                    path,
                    format!(
                        "index {index} is more than {MAX_LIST_GROWTH} past the end of a list of {len}"
                    ),
                ));
            }
        }
        Ok(())
    }

    fn detach(&mut self, path: &Path) -> Result<Option<Value>, ContainerError> {
        check_shape(path)?;
        let segments = path.segments();
        if segments.is_empty() {
            return Err(ContainerError::InvalidArgument {
                reason: "cannot remove the empty path".to_string(),
            });
        }

        let mut current = self;
        let mut i = 0;
        loop {
            let Segment::Property(name) = &segments[i] else {
                return Err(misplaced_accessor(path));
            };
            let terminal_accessor = i + 2 == segments.len();

            match segments.get(i + 1) {
                None => return Ok(current.remove(name)),
                Some(Segment::Property(_)) => {
                    current = match current.get_container_mut(name) {
                        Some(child) => child,
                        None => return Ok(None),
                    };
                    i += 1;
                }
                Some(Segment::ListIndex(index)) => {
                    let index = *index;
                    let list = match current.entries.get_mut(name.as_str()) {
                        Some(Value::List(list)) if index < list.len() => list,
                        _ => return Ok(None),
                    };
                    if terminal_accessor {
                        return Ok(Some(Value::Container(list.remove(index))));
                    }
                    current = &mut list[index];
                    i += 2;
                }
                Some(Segment::MapKey(key)) => {
                    let map = match current.entries.get_mut(name.as_str()) {
                        Some(Value::Map(map)) => map,
                        _ => return Ok(None),
                    };
                    if terminal_accessor {
                        return Ok(map.remove(key.as_str()).map(Value::Container));
                    }
                    current = match map.get_mut(key.as_str()) {
                        Some(entry) => entry,
                        None => return Ok(None),
                    };
                    i += 2;
                }
            }
        }
    }
}

/// Every accessor must directly follow a property.
fn check_shape(path: &Path) -> Result<(), ContainerError> {
    let mut previous_was_accessor = true;
    for segment in path.segments() {
        if segment.is_accessor() && previous_was_accessor {
            return Err(misplaced_accessor(path));
        }
        previous_was_accessor = segment.is_accessor();
    }
    Ok(())
}

fn misplaced_accessor(path: &Path) -> ContainerError {
    ContainerError::navigation(path, "an accessor must follow a property name")
}

fn non_container(path: &Path, value: &Value) -> ContainerError {
    ContainerError::NonContainerElement {
        path: path.to_string(),
        actual: value.type_id().to_string(),
    }
}

fn into_element(path: &Path, value: Value) -> Result<Container, ContainerError> {
    match value {
        Value::Container(container) => Ok(container),
        other => Err(non_container(path, &other)),
    }
}

fn list_element<'a>(
    path: &Path,
    name: &str,
    value: &'a Value,
    index: usize,
) -> Result<&'a Container, ContainerError> {
    let list = value.as_list().ok_or_else(|| {
        ContainerError::navigation(path, format!("'{name}' holds {} rather than a list", value.type_id()))
    })?;
    list.get(index).ok_or_else(|| {
        ContainerError::navigation(
            path,
            format!("index {index} is out of range for '{name}' of length {}", list.len()),
        )
    })
}

fn map_entry<'a>(
    path: &Path,
    name: &str,
    value: &'a Value,
    key: &str,
) -> Result<&'a Container, ContainerError> {
    let map = value.as_map().ok_or_else(|| {
        ContainerError::navigation(path, format!("'{name}' holds {} rather than a map", value.type_id()))
    })?;
    map.get(key)
        .ok_or_else(|| ContainerError::navigation(path, format!("map '{name}' has no key \"{key}\"")))
}
