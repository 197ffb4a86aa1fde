//! In-process store backend.
//!
//! Suitable for tests and single-node deployments. Entries carry their
//! own expiry instant; expired entries are treated as absent on read and
//! lazily removed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CacheError, CacheResult};
use crate::provider::{AtomicCacheProvider, CacheProvider};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory implementation of the store traits.
#[derive(Default)]
pub struct MemoryCacheProvider {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCacheProvider {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn serialize<T: Serialize>(value: &T) -> CacheResult<String> {
        serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(value: &str) -> CacheResult<T> {
        serde_json::from_str(value).map_err(|e| CacheError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get<T>(&self, key: &str) -> CacheResult<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        let now = Instant::now();
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => Ok(Some(Self::deserialize(&entry.value)?)),
            _ => Ok(None),
        }
    }

    async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<()>
    where
        T: Serialize + Sync,
    {
        let serialized = Self::serialize(value)?;
        let entry = Entry {
            value: serialized,
            expires_at: ttl.map(|d| Instant::now() + d),
        };
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now)))
    }
}

#[async_trait]
impl AtomicCacheProvider for MemoryCacheProvider {
    async fn set_nx<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<bool>
    where
        T: Serialize + Sync,
    {
        let serialized = Self::serialize(value)?;
        let now = Instant::now();

        // Check-and-insert happens under a single write lock, so two
        // racing callers cannot both observe the key as absent.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| !entry.is_expired(now)) {
            return Ok(false);
        }
        entries.insert(
            key.to_string(),
            Entry {
                value: serialized,
                expires_at: ttl.map(|d| now + d),
            },
        );
        Ok(true)
    }
}
