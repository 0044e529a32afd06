//! Dynamic values
//!
//! `Value` is the closed set of kinds the deep-copy engine understands.
//! Primitives are stored inline; everything else is an `Arc` handle, so
//! cloning a `Value` never duplicates heap contents.
//!
//! ## Kinds
//!
//! ```text
//! inline:          Undefined, Null, Boolean, Number
//! immutable heap:  String, Symbol, BigInt
//! opaque handle:   Function, Host
//! container:       Object, Array, Set, Map, Date
//! ```

use std::sync::Arc;

use num_bigint::BigInt;

use crate::array::Array;
use crate::date::Date;
use crate::function::Function;
use crate::host::HostObject;
use crate::map_data::{MapData, SetData};
use crate::object::Record;
use crate::symbol::Symbol;

/// A dynamic value
#[derive(Clone, Default)]
pub enum Value {
    /// `undefined`
    #[default]
    Undefined,
    /// `null`
    Null,
    /// Boolean
    Boolean(bool),
    /// IEEE 754 double, including NaN, ±Infinity and -0
    Number(f64),
    /// Immutable string
    String(Arc<str>),
    /// Unique symbol handle
    Symbol(Arc<Symbol>),
    /// Arbitrary precision integer
    BigInt(Arc<BigInt>),
    /// Opaque callable
    Function(Arc<Function>),
    /// Plain keyed record
    Object(Arc<Record>),
    /// Ordered sequence
    Array(Arc<Array>),
    /// Insertion-ordered set
    Set(Arc<SetData>),
    /// Insertion-ordered map
    Map(Arc<MapData>),
    /// Date (millisecond timestamp)
    Date(Arc<Date>),
    /// Instance of a custom type the value domain does not model
    Host(Arc<HostObject>),
}

/// Kinds of values that are copied structurally
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// Ordered sequence
    Array,
    /// Plain keyed record
    Object,
    /// Set
    Set,
    /// Map
    Map,
    /// Date
    Date,
}

impl ContainerKind {
    /// Human readable kind name
    pub fn name(self) -> &'static str {
        match self {
            ContainerKind::Array => "Array",
            ContainerKind::Object => "Object",
            ContainerKind::Set => "Set",
            ContainerKind::Map => "Map",
            ContainerKind::Date => "Date",
        }
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Create undefined value
    #[inline]
    pub const fn undefined() -> Self {
        Value::Undefined
    }

    /// Create null value
    #[inline]
    pub const fn null() -> Self {
        Value::Null
    }

    /// Create boolean value
    #[inline]
    pub const fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    /// Create number value
    #[inline]
    pub const fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Create NaN value explicitly
    #[inline]
    pub const fn nan() -> Self {
        Value::Number(f64::NAN)
    }

    /// Create string value
    pub fn string(s: &str) -> Self {
        Value::String(Arc::from(s))
    }

    /// Create symbol value
    pub fn symbol(sym: Arc<Symbol>) -> Self {
        Value::Symbol(sym)
    }

    /// Create BigInt value
    pub fn bigint(n: impl Into<BigInt>) -> Self {
        Value::BigInt(Arc::new(n.into()))
    }

    /// Create function value
    pub fn function(f: Arc<Function>) -> Self {
        Value::Function(f)
    }

    /// Create record value
    pub fn object(obj: Arc<Record>) -> Self {
        Value::Object(obj)
    }

    /// Create array value
    pub fn array(arr: Arc<Array>) -> Self {
        Value::Array(arr)
    }

    /// Create Set value
    pub fn set(set: Arc<SetData>) -> Self {
        Value::Set(set)
    }

    /// Create Map value
    pub fn map(map: Arc<MapData>) -> Self {
        Value::Map(map)
    }

    /// Create Date value
    pub fn date(date: Arc<Date>) -> Self {
        Value::Date(date)
    }

    /// Create host object value
    pub fn host(host: Arc<HostObject>) -> Self {
        Value::Host(host)
    }

    /// Check if undefined
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if null
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if null or undefined
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Check if boolean
    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Check if number
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Check if NaN
    #[inline]
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    /// Check if string
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if symbol
    #[inline]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    /// Check if BigInt
    #[inline]
    pub fn is_bigint(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    /// Check if callable
    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Check if plain record
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Check if array
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if host object
    #[inline]
    pub fn is_host(&self) -> bool {
        matches!(self, Value::Host(_))
    }

    /// Get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    /// Get as symbol
    pub fn as_symbol(&self) -> Option<&Arc<Symbol>> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Get as BigInt
    pub fn as_bigint(&self) -> Option<&Arc<BigInt>> {
        match self {
            Value::BigInt(b) => Some(b),
            _ => None,
        }
    }

    /// Get as function
    pub fn as_function(&self) -> Option<&Arc<Function>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Get as record
    pub fn as_object(&self) -> Option<&Arc<Record>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get as array
    pub fn as_array(&self) -> Option<&Arc<Array>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as Set
    pub fn as_set(&self) -> Option<&Arc<SetData>> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Get as Map
    pub fn as_map(&self) -> Option<&Arc<MapData>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get as Date
    pub fn as_date(&self) -> Option<&Arc<Date>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Get as host object
    pub fn as_host(&self) -> Option<&Arc<HostObject>> {
        match self {
            Value::Host(h) => Some(h),
            _ => None,
        }
    }

    /// Container kind, or `None` for primitives and opaque handles
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Value::Object(_) => Some(ContainerKind::Object),
            Value::Array(_) => Some(ContainerKind::Array),
            Value::Set(_) => Some(ContainerKind::Set),
            Value::Map(_) => Some(ContainerKind::Map),
            Value::Date(_) => Some(ContainerKind::Date),
            _ => None,
        }
    }

    /// Identity of the heap allocation behind this value.
    ///
    /// Two values with the same `heap_id` are the same instance.
    pub fn heap_id(&self) -> Option<usize> {
        match self {
            Value::Undefined | Value::Null | Value::Boolean(_) | Value::Number(_) => None,
            Value::String(s) => Some(Arc::as_ptr(s) as *const u8 as usize),
            Value::Symbol(s) => Some(Arc::as_ptr(s) as usize),
            Value::BigInt(b) => Some(Arc::as_ptr(b) as usize),
            Value::Function(f) => Some(Arc::as_ptr(f) as usize),
            Value::Object(o) => Some(Arc::as_ptr(o) as usize),
            Value::Array(a) => Some(Arc::as_ptr(a) as usize),
            Value::Set(s) => Some(Arc::as_ptr(s) as usize),
            Value::Map(m) => Some(Arc::as_ptr(m) as usize),
            Value::Date(d) => Some(Arc::as_ptr(d) as usize),
            Value::Host(h) => Some(Arc::as_ptr(h) as usize),
        }
    }

    /// Check whether two values are the same heap instance
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self.heap_id(), other.heap_id()) {
            (Some(a), Some(b)) => a == b && self.type_name() == other.type_name(),
            _ => false,
        }
    }

    /// Name of the value's kind, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::BigInt(_) => "bigint",
            Value::Function(_) => "function",
            Value::Object(_) => "Object",
            Value::Array(_) => "Array",
            Value::Set(_) => "Set",
            Value::Map(_) => "Map",
            Value::Date(_) => "Date",
            Value::Host(_) => "host object",
        }
    }
}

/// Strict equality (`===`): NaN is not equal to itself, heap values by identity
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        _ => a.ptr_eq(b),
    }
}

/// SameValue (`Object.is`): NaN equals NaN, +0 and -0 differ
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if x.is_nan() && y.is_nan() {
                return true;
            }
            x == y && x.is_sign_negative() == y.is_sign_negative()
        }
        _ => strict_equals(a, b),
    }
}

/// SameValueZero: NaN equals NaN, +0 equals -0
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => (x.is_nan() && y.is_nan()) || x == y,
        _ => strict_equals(a, b),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        strict_equals(self, other)
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::format::inspect(self))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::BigInt(Arc::new(n))
    }
}

impl From<Arc<Record>> for Value {
    fn from(obj: Arc<Record>) -> Self {
        Value::Object(obj)
    }
}

impl From<Arc<Array>> for Value {
    fn from(arr: Arc<Array>) -> Self {
        Value::Array(arr)
    }
}
