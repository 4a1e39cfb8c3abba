//! Insertion-ordered associative container.
//!
//! [`OrderedMap`] keeps a hash index alongside a slot vector holding the
//! entries in insertion order. Every mutation updates both structures before
//! returning, so readers never observe them out of sync.
//!
//! Removal leaves a tombstone slot instead of shifting the vector; tombstones
//! are compacted once they outnumber live entries. This keeps `set`, `get`,
//! `remove` and `contains_key` O(1) amortized regardless of map size. Only
//! [`OrderedMap::move_entry`] is linear.
//!
//! # Usage
//!
//! ```
//! use templar::ordered::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.set("a", 1);
//! map.set("b", 2);
//! map.set("a", 3); // updates in place
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
//!
//! map.remove(&"a");
//! map.set("a", 4); // re-insertion goes to the end
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
//! ```

use std::{
    borrow::Borrow,
    collections::HashMap,
    fmt,
    hash::Hash,
    marker::PhantomData,
};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

pub mod errors;

pub use errors::OrderedMapError;

/// Tombstones are only compacted past this count, so small maps never pay for it.
const COMPACT_THRESHOLD: usize = 16;

/// An associative container preserving insertion order with O(1) lookup.
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    /// Entries in display order; `None` marks a removed entry.
    slots: Vec<Option<(K, V)>>,
    /// Key to slot position.
    index: HashMap<K, usize>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Inserts or updates an entry, returning the previous value.
    ///
    /// Updating an existing key keeps its original position.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot) = self.index.get(&key) {
            if let Some((_, existing)) = self.slots[slot].as_mut() {
                return Some(std::mem::replace(existing, value));
            }
        }
        self.index.insert(key.clone(), self.slots.len());
        self.slots.push(Some((key, value)));
        None
    }

    /// Gets a reference to the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.slots[slot].as_ref().map(|(_, v)| v)
    }

    /// Gets a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.slots[slot].as_mut().map(|(_, v)| v)
    }

    /// Returns true if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Removes an entry, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.remove(key)?;
        let removed = self.slots[slot].take().map(|(_, v)| v);
        self.maybe_compact();
        removed
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    /// Ordinal position of `key` among live entries.
    pub fn position_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        if !self.has_tombstones() {
            return Some(slot);
        }
        Some(self.slots[..slot].iter().filter(|s| s.is_some()).count())
    }

    /// Entry at ordinal position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        if !self.has_tombstones() {
            return self.slots.get(index)?.as_ref().map(|(k, v)| (k, v));
        }
        self.iter().nth(index)
    }

    /// Relocates an existing entry to `new_index`, shifting the entries between.
    ///
    /// # Errors
    /// Fails if `key` is absent or `new_index` is not in `[0, len)`; the map
    /// is left untouched in both cases.
    pub fn move_entry<Q>(&mut self, key: &Q, new_index: usize) -> Result<(), OrderedMapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + fmt::Debug,
    {
        if !self.index.contains_key(key) {
            return Err(OrderedMapError::KeyNotFound {
                key: format!("{key:?}"),
            });
        }
        if new_index >= self.len() {
            return Err(OrderedMapError::IndexOutOfRange {
                index: new_index,
                len: self.len(),
            });
        }

        self.compact();
        let Some(&from) = self.index.get(key) else {
            return Err(OrderedMapError::KeyNotFound {
                key: format!("{key:?}"),
            });
        };
        if from == new_index {
            return Ok(());
        }

        let entry = self.slots.remove(from);
        self.slots.insert(new_index, entry);
        self.reindex(from.min(new_index)..=from.max(new_index));
        Ok(())
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over values in order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Iterates mutably over values in order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.iter_mut().map(|(_, v)| v)
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.slots.iter(),
            remaining: self.len(),
        }
    }

    /// Iterates over entries in order with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.as_mut().map(|(k, v)| (&*k, v)))
    }

    fn has_tombstones(&self) -> bool {
        self.slots.len() != self.index.len()
    }

    fn maybe_compact(&mut self) {
        let tombstones = self.slots.len() - self.index.len();
        if tombstones > COMPACT_THRESHOLD && tombstones > self.index.len() {
            self.compact();
        }
    }

    fn compact(&mut self) {
        if !self.has_tombstones() {
            return;
        }
        self.slots.retain(Option::is_some);
        self.reindex(0..=self.slots.len().saturating_sub(1));
    }

    fn reindex(&mut self, range: std::ops::RangeInclusive<usize>) {
        for position in range {
            if let Some(Some((key, _))) = self.slots.get(position) {
                if let Some(slot) = self.index.get_mut(key) {
                    *slot = position;
                }
            }
        }
    }
}

/// Ordered iterator over the entries of an [`OrderedMap`].
pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, Option<(K, V)>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.inner.by_ref() {
            if let Some((k, v)) = slot {
                self.remaining -= 1;
                return Some((k, v));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    /// Order-sensitive: two maps are equal when they hold equal entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Serialize for OrderedMap<K, V>
where
    K: Eq + Hash + Clone + Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<K, V> {
    marker: PhantomData<fn() -> OrderedMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: Eq + Hash + Clone + Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            map.set(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}
