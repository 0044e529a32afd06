//! Deep clone error types

use thiserror::Error;

/// Errors raised by the deep-copy engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloneError {
    /// The input holds an instance of a type the engine has no structural
    /// model for
    #[error("cannot clone value of unsupported type '{type_name}'")]
    UnsupportedType {
        /// Class name of the offending value
        type_name: String,
    },

    /// Nesting went past the configured `max_depth`
    #[error("clone exceeded maximum depth of {limit}")]
    DepthLimitExceeded {
        /// The configured limit
        limit: usize,
    },
}

impl CloneError {
    /// Create an unsupported type error
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }
}

/// Result type for clone operations
pub type CloneResult<T> = std::result::Result<T, CloneError>;
