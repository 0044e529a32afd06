//! Backing data structures for Map and Set.
//!
//! Keys use SameValueZero semantics via `MapKey`; storage is insertion
//! ordered and deletion keeps the relative order of the remaining entries.

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;
use std::hash::{Hash, Hasher};

use crate::value::{Value, same_value_zero};

// ============================================================================
// MapKey: Value wrapper with SameValueZero Hash/Eq for Map/Set keys
// ============================================================================

/// A wrapper around `Value` that implements `Hash` and `Eq` using
/// SameValueZero semantics.
///
/// SameValueZero: NaN equals NaN, -0 equals +0, otherwise strict equality.
#[derive(Clone)]
pub struct MapKey(pub Value);

impl MapKey {
    /// Returns a reference to the underlying `Value`.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Consumes the `MapKey` and returns the underlying `Value`.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for MapKey {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// Type discriminant tags for hashing
const HASH_TAG_UNDEFINED: u8 = 0;
const HASH_TAG_NULL: u8 = 1;
const HASH_TAG_BOOL: u8 = 2;
const HASH_TAG_NUMBER: u8 = 3;
const HASH_TAG_STRING: u8 = 4;
const HASH_TAG_BIGINT: u8 = 5;
const HASH_TAG_HEAP: u8 = 6;

/// Normalize a float for SameValueZero hashing: -0 → +0, NaN → canonical NaN bits.
fn normalize_float_bits(n: f64) -> u64 {
    if n == 0.0 {
        0u64
    } else if n.is_nan() {
        0x7FF8_0000_0000_0000u64
    } else {
        n.to_bits()
    }
}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            Value::Undefined => HASH_TAG_UNDEFINED.hash(state),
            Value::Null => HASH_TAG_NULL.hash(state),
            Value::Boolean(b) => {
                HASH_TAG_BOOL.hash(state);
                b.hash(state);
            }
            Value::Number(n) => {
                HASH_TAG_NUMBER.hash(state);
                normalize_float_bits(*n).hash(state);
            }
            Value::String(s) => {
                HASH_TAG_STRING.hash(state);
                s.hash(state);
            }
            Value::BigInt(b) => {
                HASH_TAG_BIGINT.hash(state);
                b.hash(state);
            }
            other => {
                // Remaining kinds compare by identity
                HASH_TAG_HEAP.hash(state);
                other.heap_id().hash(state);
            }
        }
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        same_value_zero(&self.0, &other.0)
    }
}

impl Eq for MapKey {}

impl std::fmt::Debug for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MapKey").field(&self.0).finish()
    }
}

// ============================================================================
// MapData
// ============================================================================

/// Internal storage for a `Map`.
///
/// Updating an existing key keeps its original position.
pub struct MapData {
    entries: RwLock<IndexMap<MapKey, Value, FxBuildHasher>>,
}

impl Default for MapData {
    fn default() -> Self {
        Self::new()
    }
}

impl MapData {
    /// Create an empty MapData.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::default()),
        }
    }

    /// Create a map from `(key, value)` pairs, later duplicates overwrite
    pub fn from_entries(entries: impl IntoIterator<Item = (Value, Value)>) -> std::sync::Arc<Self> {
        let map = Self::new();
        for (key, value) in entries {
            map.set(key, value);
        }
        std::sync::Arc::new(map)
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.entries.read().len()
    }

    /// Get the value associated with `key`, or `None`.
    pub fn get(&self, key: &Value) -> Option<Value> {
        self.entries.read().get(&MapKey(key.clone())).cloned()
    }

    /// Returns `true` if `key` exists.
    pub fn has(&self, key: &Value) -> bool {
        self.entries.read().contains_key(&MapKey(key.clone()))
    }

    /// Insert or update `key` → `value`. Returns `true` if this was an update.
    pub fn set(&self, key: Value, value: Value) -> bool {
        let mut entries = self.entries.write();
        match entries.get_mut(&MapKey(key.clone())) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => {
                entries.insert(MapKey(normalize_zero(key)), value);
                false
            }
        }
    }

    /// Delete `key`. Returns `true` if it existed.
    pub fn delete(&self, key: &Value) -> bool {
        self.entries
            .write()
            .shift_remove(&MapKey(key.clone()))
            .is_some()
    }

    /// Remove all entries (breaks reference cycles).
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Snapshot of all entries in insertion order.
    ///
    /// The lock is released before returning, enabling re-entrant operations.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.value().clone(), v.clone()))
            .collect()
    }
}

impl std::fmt::Debug for MapData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MapData(size={})", self.size())
    }
}

// ============================================================================
// SetData
// ============================================================================

/// Internal storage for a `Set`.
///
/// Same ordering rules as `MapData`, but stores only keys.
pub struct SetData {
    entries: RwLock<IndexSet<MapKey, FxBuildHasher>>,
}

impl Default for SetData {
    fn default() -> Self {
        Self::new()
    }
}

impl SetData {
    /// Create an empty SetData.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexSet::default()),
        }
    }

    /// Create a set from values, dropping SameValueZero duplicates
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> std::sync::Arc<Self> {
        let set = Self::new();
        for value in values {
            set.add(value);
        }
        std::sync::Arc::new(set)
    }

    /// Number of live entries.
    pub fn size(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if `value` is a member.
    pub fn has(&self, value: &Value) -> bool {
        self.entries.read().contains(&MapKey(value.clone()))
    }

    /// Add a value. Returns `true` if already present (no-op).
    pub fn add(&self, value: Value) -> bool {
        let mut entries = self.entries.write();
        let key = MapKey(normalize_zero(value));
        if entries.contains(&key) {
            return true;
        }
        entries.insert(key);
        false
    }

    /// Delete `value`. Returns `true` if it existed.
    pub fn delete(&self, value: &Value) -> bool {
        self.entries.write().shift_remove(&MapKey(value.clone()))
    }

    /// Remove all entries (breaks reference cycles).
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Snapshot of all members in insertion order.
    pub fn values(&self) -> Vec<Value> {
        self.entries
            .read()
            .iter()
            .map(|k| k.value().clone())
            .collect()
    }
}

impl std::fmt::Debug for SetData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SetData(size={})", self.size())
    }
}

/// Map and Set store -0 keys as +0.
fn normalize_zero(value: Value) -> Value {
    match value {
        Value::Number(n) if n == 0.0 => Value::Number(0.0),
        other => other,
    }
}
