//! # sp-server
//!
//! Axum HTTP boundary for the SAML service provider.
//!
//! The server wires the protocol pipeline (decode, parse, validate,
//! replay-check, session issuance) to HTTP routes and selects the cache
//! backend at startup: Redis when configured, in-memory otherwise.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod cookies;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use router::create_router;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use sp_cache::{AtomicCacheProvider, MemoryCacheProvider};
use sp_cache_redis::RedisCacheProvider;
use tokio::net::TcpListener;

/// The service provider server.
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// Creates a server from configuration.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Runs the server until a shutdown signal arrives.
    pub async fn run(self) -> anyhow::Result<()> {
        match self.config.redis.clone() {
            Some(redis) => {
                let store = Arc::new(RedisCacheProvider::new(redis).await?);
                tracing::info!("using Redis session/replay store");
                self.serve(store).await
            }
            None => {
                tracing::info!("using in-memory session/replay store");
                self.serve(Arc::new(MemoryCacheProvider::new())).await
            }
        }
    }

    async fn serve<C: AtomicCacheProvider + 'static>(self, store: Arc<C>) -> anyhow::Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let state = AppState::new(self.config, store)?;
        let app = create_router(state);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server shutdown complete");
        Ok(())
    }
}

/// Waits for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
