//! # Carbon Clone
//!
//! Identity-tracked structural deep copy for Carbon values.
//!
//! `deep_clone` turns any supported value into an independent copy with the
//! same structure, the same container kinds and the same aliasing topology,
//! including cycles. Callers that keep snapshots (initial value, value before
//! reset) clone once per capture and once per hand-out.
//!
//! ```ignore
//! use carbon_clone::deep_clone;
//!
//! let snapshot = deep_clone(&state)?;
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod cloner;
pub mod config;
pub mod error;

pub use cloner::{CloneStats, DeepCloner, deep_clone, deep_clone_with};
pub use config::CloneOptions;
pub use error::{CloneError, CloneResult};
