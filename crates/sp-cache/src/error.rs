//! Cache error types.

use std::fmt;

/// Cache operation errors.
///
/// Store unavailability and timeouts are infrastructure failures; they
/// must never be conflated with "key not found".
#[derive(Debug)]
pub enum CacheError {
    /// Connection to the store backend failed.
    Connection(String),
    /// Serialization/deserialization error.
    Serialization(String),
    /// Key not found (only for operations that require presence).
    NotFound,
    /// Store operation timed out.
    Timeout,
    /// Invalid store configuration.
    Configuration(String),
    /// Internal store error.
    Internal(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(msg) => write!(f, "store connection error: {msg}"),
            Self::Serialization(msg) => write!(f, "store serialization error: {msg}"),
            Self::NotFound => write!(f, "key not found in store"),
            Self::Timeout => write!(f, "store operation timed out"),
            Self::Configuration(msg) => write!(f, "store configuration error: {msg}"),
            Self::Internal(msg) => write!(f, "internal store error: {msg}"),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
