//! Session store over a cache backend.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sp_cache::AtomicCacheProvider;
use tracing::warn;

use crate::error::{SessionError, SessionResult};
use crate::record::SessionRecord;

/// How many ID allocations to attempt before giving up.
///
/// Session IDs carry 32 alphanumeric characters of randomness, so a
/// collision indicates a broken RNG rather than bad luck. The bound
/// keeps that failure mode from looping forever.
const MAX_ID_ATTEMPTS: u32 = 3;

/// Session store backed by a TTL-capable cache.
pub struct SessionStore<C: AtomicCacheProvider> {
    store: Arc<C>,
    ttl: Duration,
}

impl<C: AtomicCacheProvider> SessionStore<C> {
    /// Creates a store issuing sessions valid for `ttl`.
    pub fn new(store: Arc<C>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Creates a session for an authenticated user.
    ///
    /// Returns the new session ID. The record is written with
    /// set-if-absent so a colliding ID can never overwrite another
    /// user's live session.
    pub async fn create(
        &self,
        user: &str,
        attributes: HashMap<String, Vec<String>>,
    ) -> SessionResult<String> {
        for attempt in 0..MAX_ID_ATTEMPTS {
            let session_id = sp_crypto::generate_session_id();
            let record = SessionRecord {
                session_id: session_id.clone(),
                user: user.to_string(),
                attributes: attributes.clone(),
                created_at: Utc::now(),
            };

            let inserted = self
                .store
                .set_nx(&Self::key(&session_id), &record, Some(self.ttl))
                .await?;
            if inserted {
                return Ok(session_id);
            }

            warn!(attempt, "session ID collision, regenerating");
        }

        Err(SessionError::IdAllocation(MAX_ID_ATTEMPTS))
    }

    /// Looks up a session by ID.
    ///
    /// Returns `None` for unknown, expired, or destroyed sessions.
    pub async fn read(&self, session_id: &str) -> SessionResult<Option<SessionRecord>> {
        let record = self.store.get(&Self::key(session_id)).await?;
        Ok(record)
    }

    /// Destroys a session. Idempotent: destroying an unknown or
    /// already-destroyed session succeeds.
    pub async fn destroy(&self, session_id: &str) -> SessionResult<()> {
        self.store.delete(&Self::key(session_id)).await?;
        Ok(())
    }

    fn key(session_id: &str) -> String {
        format!("session:{session_id}")
    }
}
