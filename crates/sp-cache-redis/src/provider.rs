//! Redis store provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use fred::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use sp_cache::{AtomicCacheProvider, CacheError, CacheProvider, CacheResult};

use crate::config::RedisConfig;
use crate::error::{from_redis_error, from_serde_error};

/// Redis-based store provider.
pub struct RedisCacheProvider {
    client: Client,
    config: RedisConfig,
}

impl RedisCacheProvider {
    /// Creates a new Redis store provider.
    ///
    /// ## Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn new(config: RedisConfig) -> CacheResult<Self> {
        let redis_config = Config::from_url(&config.connection_url())
            .map_err(|e| CacheError::Configuration(e.to_string()))?;

        // Every command is bounded; a hung server surfaces as a timeout
        // error instead of stalling the request that hit the store.
        let performance = PerformanceConfig {
            default_command_timeout: Duration::from_millis(config.command_timeout_ms),
            ..PerformanceConfig::default()
        };
        let connection = ConnectionConfig {
            connection_timeout: Duration::from_millis(config.connect_timeout_ms),
            ..ConnectionConfig::default()
        };

        let client = Client::new(
            redis_config,
            Some(performance),
            Some(connection),
            Some(ReconnectPolicy::new_exponential(0, 1000, 30_000, 2)),
        );

        client.init().await.map_err(from_redis_error)?;

        Ok(Self { client, config })
    }

    /// Returns the underlying Redis client.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Formats a key with the configured prefix.
    fn key(&self, key: &str) -> String {
        self.config.prefixed_key(key)
    }
}

/// Safely convert seconds to i64 for Redis expiration.
#[allow(clippy::cast_possible_wrap)]
const fn seconds_to_i64(seconds: u64) -> i64 {
    seconds as i64
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get<T>(&self, key: &str) -> CacheResult<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        let key = self.key(key);
        let value: Option<String> = self.client.get(&key).await.map_err(from_redis_error)?;

        match value {
            Some(v) => {
                let parsed: T = serde_json::from_str(&v).map_err(from_serde_error)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<()>
    where
        T: Serialize + Sync,
    {
        let key = self.key(key);
        let serialized = serde_json::to_string(value).map_err(from_serde_error)?;

        match ttl {
            Some(duration) => {
                let seconds = seconds_to_i64(duration.as_secs().max(1));
                self.client
                    .set::<(), _, _>(
                        &key,
                        serialized,
                        Some(Expiration::EX(seconds)),
                        None,
                        false,
                    )
                    .await
                    .map_err(from_redis_error)
            }
            None => self
                .client
                .set::<(), _, _>(&key, serialized, None, None, false)
                .await
                .map_err(from_redis_error),
        }
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let key = self.key(key);
        self.client
            .del::<(), _>(&key)
            .await
            .map_err(from_redis_error)
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        let key = self.key(key);
        let count: i64 = self.client.exists(&key).await.map_err(from_redis_error)?;
        Ok(count > 0)
    }
}

#[async_trait]
impl AtomicCacheProvider for RedisCacheProvider {
    async fn set_nx<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<bool>
    where
        T: Serialize + Sync,
    {
        let key = self.key(key);
        let serialized = serde_json::to_string(value).map_err(from_serde_error)?;

        let expiration = ttl.map(|d| Expiration::EX(seconds_to_i64(d.as_secs().max(1))));

        // SET NX is a single server-side operation, so concurrent
        // consumers across instances cannot both claim the key.
        let result: Option<String> = self
            .client
            .set(&key, serialized, expiration, Some(SetOptions::NX), false)
            .await
            .map_err(from_redis_error)?;

        Ok(result.is_some())
    }
}
