//! Session error types.

use sp_cache::CacheError;
use thiserror::Error;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The cache backend failed.
    #[error("session storage error: {0}")]
    Storage(#[from] CacheError),

    /// Could not allocate a unique session ID.
    #[error("session ID allocation failed after {0} attempts")]
    IdAllocation(u32),
}

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
