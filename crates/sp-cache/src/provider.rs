//! Store provider traits.

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::CacheResult;

/// Key-value store with TTL support.
///
/// Implementations must be thread-safe; all operations are keyed and
/// independent, so no cross-key coordination is required of callers.
/// Every operation has a bounded timeout in real backends; a timeout is
/// an infrastructure failure, not a miss.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Gets a value.
    ///
    /// Returns `None` if the key does not exist or has expired.
    async fn get<T>(&self, key: &str) -> CacheResult<Option<T>>
    where
        T: DeserializeOwned + Send;

    /// Sets a value with an optional TTL.
    async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<()>
    where
        T: Serialize + Sync;

    /// Deletes a value. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Checks whether a key exists and has not expired.
    async fn exists(&self, key: &str) -> CacheResult<bool>;
}

/// Atomic extensions to [`CacheProvider`].
#[async_trait]
pub trait AtomicCacheProvider: CacheProvider {
    /// Sets a value only if the key does not already exist.
    ///
    /// Returns `true` if the value was written, `false` if the key was
    /// already present. This is a single atomic operation against the
    /// store, never a separate read-then-write; it is the serialization
    /// point for replay protection.
    async fn set_nx<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<bool>
    where
        T: Serialize + Sync;
}
