//! # Carbon Value
//!
//! The dynamic value domain that the Carbon deep-copy engine operates on.
//!
//! ## Design Principles
//!
//! - **Closed domain**: `Value` is an exhaustive enum, so every consumer
//!   matches on the full set of kinds
//! - **Shared handles**: heap values are `Arc`-backed; cloning a `Value`
//!   clones the handle, never the contents
//! - **Thread-safe**: containers use `parking_lot` locks, so values are
//!   `Send + Sync`

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod array;
pub mod date;
pub mod equality;
pub mod format;
pub mod function;
pub mod host;
pub mod map_data;
pub mod object;
pub mod symbol;
pub mod value;

pub use array::Array;
pub use date::Date;
pub use equality::deep_equal;
pub use format::inspect;
pub use function::{Function, NativeFn};
pub use host::HostObject;
pub use map_data::{MapData, MapKey, SetData};
pub use object::{PropertyKey, Record};
pub use symbol::Symbol;
pub use value::{ContainerKind, Value, same_value, same_value_zero, strict_equals};
