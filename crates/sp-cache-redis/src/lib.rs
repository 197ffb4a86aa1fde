//! # sp-cache-redis
//!
//! Redis store backend using the `fred` crate, implementing the store
//! traits defined in `sp-cache`. This is the backend to use when more
//! than one service-provider instance consumes assertions: replay
//! protection relies on `SET NX`, which Redis evaluates atomically
//! across all connections.
//!
//! ## Example
//!
//! ```ignore
//! use sp_cache_redis::{RedisCacheProvider, RedisConfig};
//! use sp_cache::CacheProvider;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RedisConfig::default()
//!         .host("localhost")
//!         .port(6379);
//!
//!     let store = RedisCacheProvider::new(config).await?;
//!
//!     store.set("key", &"value", Some(Duration::from_secs(3600))).await?;
//!     let value: Option<String> = store.get("key").await?;
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod provider;

pub use config::RedisConfig;
pub use provider::RedisCacheProvider;
