//! Application state shared across request handlers.

use std::sync::Arc;

use sp_cache::AtomicCacheProvider;
use sp_protocol_saml::{ReplayGuard, ValidationPolicy};
use sp_session::SessionStore;

use crate::config::ServerConfig;

/// Shared state, generic over the cache backend.
pub struct AppState<C: AtomicCacheProvider> {
    /// Server configuration.
    pub config: ServerConfig,
    /// Assertion validation policy.
    pub policy: Arc<ValidationPolicy>,
    /// Replay guard over consumed assertion IDs.
    pub replay: Arc<ReplayGuard<C>>,
    /// Session store.
    pub sessions: Arc<SessionStore<C>>,
}

// Derived Clone would require C: Clone; the fields are all shared.
impl<C: AtomicCacheProvider> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            policy: Arc::clone(&self.policy),
            replay: Arc::clone(&self.replay),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<C: AtomicCacheProvider> AppState<C> {
    /// Builds the state from configuration and a cache backend.
    ///
    /// Fails when the configured certificate or algorithm allow-list is
    /// unusable, so misconfiguration aborts startup.
    pub fn new(config: ServerConfig, store: Arc<C>) -> anyhow::Result<Self> {
        let policy = Arc::new(ValidationPolicy::from_config(&config.sp)?);
        let replay = Arc::new(ReplayGuard::new(Arc::clone(&store), config.sp.replay_ttl));
        let sessions = Arc::new(SessionStore::new(store, config.sp.session_duration));

        Ok(Self {
            config,
            policy,
            replay,
            sessions,
        })
    }
}
