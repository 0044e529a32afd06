//! Structural deep copy
//!
//! Produces an independent copy of a value graph. Key properties:
//! - Handles circular references
//! - Preserves aliasing: a container reached twice in the source is one
//!   container in the copy
//! - Shares opaque handles (functions, symbols, bigints, strings) by reference
//! - Rejects host objects with `UnsupportedType`
//!
//! Every container gets an empty shell that is registered in the per-call
//! memory before any child is copied. Shells are filled from a FIFO work
//! queue, so nesting depth is bounded by the heap rather than the stack, and
//! each container is first reached along its shortest path from the root.
//! A container's depth is that shortest distance, whatever the sibling order.

use std::collections::VecDeque;
use std::sync::Arc;

use carbon_value::{Array, Date, MapData, Record, SetData, Value};
use rustc_hash::FxHashMap;

use crate::config::CloneOptions;
use crate::error::{CloneError, CloneResult};

/// Counters for one clone call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneStats {
    /// Container shells created
    pub containers: usize,
    /// Lookups answered from the memory (shared or cyclic references)
    pub aliases: usize,
    /// Deepest container level reached
    pub max_depth: usize,
}

/// A shell waiting for its children
struct Pending {
    source: Value,
    shell: Value,
    depth: usize,
}

/// Performs identity-tracked deep copies
pub struct DeepCloner {
    /// Map from source identity to cloned value (for circular reference handling)
    memory: FxHashMap<usize, Value>,
    pending: VecDeque<Pending>,
    options: CloneOptions,
    stats: CloneStats,
    last_stats: Option<CloneStats>,
}

impl Default for DeepCloner {
    fn default() -> Self {
        Self::new(CloneOptions::default())
    }
}

impl DeepCloner {
    /// Create a new cloner
    pub fn new(options: CloneOptions) -> Self {
        Self {
            memory: FxHashMap::default(),
            pending: VecDeque::new(),
            options,
            stats: CloneStats::default(),
            last_stats: None,
        }
    }

    /// Options this cloner was built with
    pub fn options(&self) -> &CloneOptions {
        &self.options
    }

    /// Statistics of the most recent successful call
    pub fn last_stats(&self) -> Option<CloneStats> {
        self.last_stats
    }

    /// Deep-copy `value`.
    ///
    /// The identity memory lives for exactly this call; nothing is reused
    /// by later calls on the same cloner.
    pub fn clone(&mut self, value: &Value) -> CloneResult<Value> {
        self.memory.clear();
        self.pending.clear();
        self.stats = CloneStats::default();

        let result = self.run(value);

        if result.is_err() {
            self.discard_partial();
        }
        self.memory.clear();
        self.pending.clear();

        match &result {
            Ok(_) => {
                tracing::debug!(
                    target: "carbon::clone",
                    containers = self.stats.containers,
                    aliases = self.stats.aliases,
                    max_depth = self.stats.max_depth,
                    "deep clone complete"
                );
                self.last_stats = Some(self.stats);
            }
            Err(err) => {
                tracing::debug!(target: "carbon::clone", error = %err, "deep clone aborted");
            }
        }
        result
    }

    fn run(&mut self, value: &Value) -> CloneResult<Value> {
        let root = self.resolve(value, 1)?;
        while let Some(task) = self.pending.pop_front() {
            self.populate(task)?;
        }
        Ok(root)
    }

    /// Identity of `value` in the output graph.
    ///
    /// Containers resolve to their registered shell; filling it is deferred.
    fn resolve(&mut self, value: &Value, depth: usize) -> CloneResult<Value> {
        match value {
            Value::Undefined
            | Value::Null
            | Value::Boolean(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Symbol(_)
            | Value::BigInt(_)
            | Value::Function(_) => Ok(value.clone()),

            Value::Host(host) => Err(CloneError::unsupported(host.class_name())),

            Value::Object(_) | Value::Array(_) | Value::Set(_) | Value::Map(_) | Value::Date(_) => {
                self.resolve_container(value, depth)
            }
        }
    }

    fn resolve_container(&mut self, value: &Value, depth: usize) -> CloneResult<Value> {
        let Some(id) = value.heap_id() else {
            return Ok(value.clone());
        };

        // Check for circular or shared reference
        if let Some(cloned) = self.memory.get(&id) {
            self.stats.aliases += 1;
            return Ok(cloned.clone());
        }

        if !self.options.permits_depth(depth) {
            let limit = self.options.max_depth.unwrap_or(depth);
            tracing::warn!(target: "carbon::clone", limit, "clone depth limit exceeded");
            return Err(CloneError::DepthLimitExceeded { limit });
        }

        let Some(shell) = empty_shell(value) else {
            return Ok(value.clone());
        };

        // Register before cloning children (to handle circular refs)
        self.memory.insert(id, shell.clone());
        self.stats.containers += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        tracing::trace!(target: "carbon::clone", kind = value.type_name(), depth, "shell created");

        if !matches!(value, Value::Date(_)) {
            self.pending.push_back(Pending {
                source: value.clone(),
                shell: shell.clone(),
                depth,
            });
        }
        Ok(shell)
    }

    /// Empty every shell built by a failed call.
    ///
    /// Partial shells may reference each other and are never handed out, so
    /// their cycles have to be broken here.
    fn discard_partial(&mut self) {
        for shell in self.memory.values() {
            match shell {
                Value::Object(obj) => obj.clear(),
                Value::Array(arr) => arr.clear(),
                Value::Set(set) => set.clear(),
                Value::Map(map) => map.clear(),
                _ => {}
            }
        }
    }

    fn populate(&mut self, task: Pending) -> CloneResult<()> {
        let depth = task.depth + 1;
        match (&task.source, &task.shell) {
            (Value::Object(src), Value::Object(dst)) => {
                for (key, val) in src.entries() {
                    let cloned = self.resolve(&val, depth)?;
                    dst.set(key, cloned);
                }
            }
            (Value::Array(src), Value::Array(dst)) => {
                for val in src.values() {
                    let cloned = self.resolve(&val, depth)?;
                    dst.push(cloned);
                }
            }
            (Value::Set(src), Value::Set(dst)) => {
                for member in src.values() {
                    let cloned = self.resolve(&member, depth)?;
                    dst.add(cloned);
                }
            }
            (Value::Map(src), Value::Map(dst)) => {
                for (key, val) in src.entries() {
                    let cloned_key = self.resolve(&key, depth)?;
                    let cloned_val = self.resolve(&val, depth)?;
                    dst.set(cloned_key, cloned_val);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// New empty container of the same kind. Dates are complete on creation.
fn empty_shell(value: &Value) -> Option<Value> {
    let shell = match value {
        Value::Object(_) => Value::object(Arc::new(Record::new())),
        Value::Array(src) => Value::array(Arc::new(Array::with_capacity(src.len()))),
        Value::Set(_) => Value::set(Arc::new(SetData::new())),
        Value::Map(_) => Value::map(Arc::new(MapData::new())),
        Value::Date(src) => Value::date(Arc::new(Date::from_timestamp_ms(src.time()))),
        _ => return None,
    };
    Some(shell)
}

/// Convenience function to clone a value with default options
pub fn deep_clone(value: &Value) -> CloneResult<Value> {
    DeepCloner::default().clone(value)
}

/// Convenience function to clone a value with explicit options
pub fn deep_clone_with(value: &Value, options: CloneOptions) -> CloneResult<Value> {
    DeepCloner::new(options).clone(value)
}
