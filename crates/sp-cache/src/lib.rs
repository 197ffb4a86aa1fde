//! # sp-cache
//!
//! Durable key-value store abstraction used by the replay guard and the
//! session store.
//!
//! The traits here are deliberately narrow: keyed get/set/delete with
//! TTL, plus [`AtomicCacheProvider::set_nx`], the single atomic
//! operation the replay guard is built on. Backends:
//!
//! - [`MemoryCacheProvider`] - in-process store for tests and
//!   single-node deployments
//! - `sp-cache-redis` - Redis-backed store for multi-node deployments

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod memory;
pub mod provider;

pub use error::{CacheError, CacheResult};
pub use memory::MemoryCacheProvider;
pub use provider::{AtomicCacheProvider, CacheProvider};
