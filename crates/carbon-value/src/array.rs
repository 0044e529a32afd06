//! Ordered sequences

use parking_lot::RwLock;
use std::sync::Arc;

use crate::value::Value;

/// An ordered sequence of values
pub struct Array {
    elements: RwLock<Vec<Value>>,
}

impl Default for Array {
    fn default() -> Self {
        Self::new()
    }
}

impl Array {
    /// Create an empty array
    pub fn new() -> Self {
        Self {
            elements: RwLock::new(Vec::new()),
        }
    }

    /// Create an empty array with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Create an array holding `values`
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Arc<Self> {
        Arc::new(Self {
            elements: RwLock::new(values.into_iter().collect()),
        })
    }

    /// Element at `index`
    pub fn get(&self, index: usize) -> Option<Value> {
        self.elements.read().get(index).cloned()
    }

    /// Store `value` at `index`, filling any gap with `undefined`
    pub fn set(&self, index: usize, value: Value) {
        let mut elements = self.elements.write();
        if index >= elements.len() {
            elements.resize(index + 1, Value::undefined());
        }
        elements[index] = value;
    }

    /// Append a value
    pub fn push(&self, value: Value) {
        self.elements.write().push(value);
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.elements.read().is_empty()
    }

    /// Snapshot of all elements in index order
    pub fn values(&self) -> Vec<Value> {
        self.elements.read().clone()
    }

    /// Remove all elements (breaks reference cycles)
    pub fn clear(&self) {
        self.elements.write().clear();
    }
}

impl std::fmt::Debug for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Array(len={})", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_fills_holes_with_undefined() {
        let arr = Array::new();
        arr.set(2, Value::number(9.0));
        assert_eq!(arr.len(), 3);
        assert!(arr.get(0).unwrap().is_undefined());
        assert!(arr.get(1).unwrap().is_undefined());
        assert_eq!(arr.get(2), Some(Value::number(9.0)));
        assert!(arr.get(3).is_none());
    }

    #[test]
    fn test_push_and_values() {
        let arr = Array::from_values([Value::number(1.0)]);
        arr.push(Value::string("two"));
        let values = arr.values();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1].as_str(), Some("two"));
    }
}
