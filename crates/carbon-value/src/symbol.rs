//! Unique symbols

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A unique, immutable symbol
///
/// Symbols compare by identity. The `id` is process-unique and is what
/// record keys hash on.
#[derive(Debug)]
pub struct Symbol {
    /// Symbol description
    pub description: Option<String>,
    /// Unique ID
    pub id: u64,
}

impl Symbol {
    /// Create a fresh symbol
    pub fn new(description: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            description: description.map(str::to_owned),
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Description or empty string
    pub fn description_str(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
