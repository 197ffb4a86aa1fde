//! Assertion replay protection.
//!
//! Each accepted assertion ID is marked in the cache with an atomic
//! set-if-absent, so concurrent deliveries of the same assertion admit
//! exactly one winner even across server instances sharing a Redis
//! backend.

use std::sync::Arc;
use std::time::Duration;

use sp_cache::AtomicCacheProvider;

use crate::error::SamlResult;

/// Outcome of a replay check for one assertion ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayCheck {
    /// First time this assertion ID was seen; it is now marked consumed.
    Accepted,
    /// The assertion ID was already consumed.
    AlreadyConsumed,
}

/// Replay guard over an atomic cache backend.
pub struct ReplayGuard<C: AtomicCacheProvider> {
    store: Arc<C>,
    ttl: Duration,
}

impl<C: AtomicCacheProvider> ReplayGuard<C> {
    /// Creates a guard marking consumed IDs for `ttl`.
    ///
    /// The TTL must exceed the assertion validity window plus skew:
    /// once the mark expires, an expired assertion is already rejected
    /// by the time-window check instead.
    pub fn new(store: Arc<C>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Atomically checks and marks one assertion ID.
    ///
    /// Check and mark are a single cache operation; there is no window
    /// between them for a concurrent request to slip through.
    pub async fn check_and_mark(&self, assertion_id: &str) -> SamlResult<ReplayCheck> {
        let key = format!("assertion:{assertion_id}");
        let inserted = self.store.set_nx(&key, &"consumed", Some(self.ttl)).await?;

        if inserted {
            Ok(ReplayCheck::Accepted)
        } else {
            Ok(ReplayCheck::AlreadyConsumed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_cache::MemoryCacheProvider;

    fn guard() -> ReplayGuard<MemoryCacheProvider> {
        ReplayGuard::new(Arc::new(MemoryCacheProvider::new()), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn fresh_assertion_is_accepted() {
        let guard = guard();
        let result = guard.check_and_mark("_abc123").await.unwrap();
        assert_eq!(result, ReplayCheck::Accepted);
    }

    #[tokio::test]
    async fn second_delivery_is_rejected() {
        let guard = guard();
        assert_eq!(
            guard.check_and_mark("_abc123").await.unwrap(),
            ReplayCheck::Accepted
        );
        assert_eq!(
            guard.check_and_mark("_abc123").await.unwrap(),
            ReplayCheck::AlreadyConsumed
        );
    }

    #[tokio::test]
    async fn distinct_assertion_ids_do_not_interfere() {
        let guard = guard();
        assert_eq!(
            guard.check_and_mark("_first").await.unwrap(),
            ReplayCheck::Accepted
        );
        assert_eq!(
            guard.check_and_mark("_second").await.unwrap(),
            ReplayCheck::Accepted
        );
    }

    #[tokio::test]
    async fn concurrent_deliveries_admit_exactly_one() {
        let guard = Arc::new(ReplayGuard::new(
            Arc::new(MemoryCacheProvider::new()),
            Duration::from_secs(60),
        ));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let guard = Arc::clone(&guard);
            handles.push(tokio::spawn(async move {
                guard.check_and_mark("_contended").await.unwrap()
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap() == ReplayCheck::Accepted {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
    }
}
