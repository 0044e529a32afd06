//! Plain keyed records
//!
//! Records keep their own properties in insertion order. Keys are strings
//! or symbols; every property carries an `enumerable` flag so hidden
//! bookkeeping slots can live next to ordinary data.

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::symbol::Symbol;
use crate::value::Value;

/// Property key (string or symbol)
#[derive(Clone, Debug)]
pub enum PropertyKey {
    /// String property key
    String(Arc<str>),
    /// Symbol property key
    Symbol(Arc<Symbol>),
}

impl PropertyKey {
    /// Create a string property key
    pub fn string(s: &str) -> Self {
        Self::String(Arc::from(s))
    }

    /// Create a symbol property key
    pub fn symbol(sym: Arc<Symbol>) -> Self {
        Self::Symbol(sym)
    }

    /// Check if this is a symbol key
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// The key as a value (string or symbol)
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Symbol(sym) => Value::Symbol(sym.clone()),
        }
    }
}

impl PartialEq for PropertyKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a.id == b.id,
            _ => false,
        }
    }
}

impl Eq for PropertyKey {}

impl Hash for PropertyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::String(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            Self::Symbol(sym) => {
                1u8.hash(state);
                sym.id.hash(state);
            }
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl From<Arc<Symbol>> for PropertyKey {
    fn from(sym: Arc<Symbol>) -> Self {
        Self::Symbol(sym)
    }
}

/// A stored property
#[derive(Clone, Debug)]
struct Property {
    value: Value,
    enumerable: bool,
}

/// A plain keyed record
///
/// Thread-safe with interior mutability.
pub struct Record {
    properties: RwLock<IndexMap<PropertyKey, Property, FxBuildHasher>>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self {
            properties: RwLock::new(IndexMap::default()),
        }
    }

    /// Create a record from `(key, value)` pairs, all enumerable
    pub fn from_entries<K, I>(entries: I) -> Arc<Self>
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let record = Self::new();
        for (key, value) in entries {
            record.set(key, value);
        }
        Arc::new(record)
    }

    /// Get property by key
    pub fn get(&self, key: &PropertyKey) -> Option<Value> {
        self.properties.read().get(key).map(|p| p.value.clone())
    }

    /// Get a string-keyed property
    pub fn get_str(&self, key: &str) -> Option<Value> {
        self.get(&PropertyKey::string(key))
    }

    /// Set an enumerable property.
    ///
    /// Updating an existing key keeps its position and its enumerability.
    pub fn set(&self, key: impl Into<PropertyKey>, value: Value) {
        let mut props = self.properties.write();
        match props.entry(key.into()) {
            indexmap::map::Entry::Occupied(mut slot) => slot.get_mut().value = value,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(Property {
                    value,
                    enumerable: true,
                });
            }
        }
    }

    /// Define a non-enumerable property
    pub fn define_hidden(&self, key: impl Into<PropertyKey>, value: Value) {
        self.properties.write().insert(
            key.into(),
            Property {
                value,
                enumerable: false,
            },
        );
    }

    /// Delete a property. Returns `true` if it existed.
    pub fn delete(&self, key: &PropertyKey) -> bool {
        self.properties.write().shift_remove(key).is_some()
    }

    /// Check for an own property
    pub fn has(&self, key: &PropertyKey) -> bool {
        self.properties.read().contains_key(key)
    }

    /// Check whether an own property is enumerable
    pub fn is_enumerable(&self, key: &PropertyKey) -> bool {
        self.properties
            .read()
            .get(key)
            .is_some_and(|p| p.enumerable)
    }

    /// Number of own properties, enumerable or not
    pub fn len(&self) -> usize {
        self.properties.read().len()
    }

    /// Check if the record has no own properties
    pub fn is_empty(&self) -> bool {
        self.properties.read().is_empty()
    }

    /// All own keys in insertion order
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.properties.read().keys().cloned().collect()
    }

    /// Enumerable `(key, value)` pairs in insertion order.
    ///
    /// The lock is released before returning, so callers may mutate the
    /// record while walking the snapshot.
    pub fn entries(&self) -> Vec<(PropertyKey, Value)> {
        self.properties
            .read()
            .iter()
            .filter(|(_, p)| p.enumerable)
            .map(|(k, p)| (k.clone(), p.value.clone()))
            .collect()
    }

    /// Remove all properties (breaks reference cycles)
    pub fn clear(&self) {
        self.properties.write().clear();
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Record(len={})", self.len())
    }
}
