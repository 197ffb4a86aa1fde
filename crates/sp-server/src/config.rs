//! Server configuration.
//!
//! Configuration is loaded from environment variables with sensible
//! defaults; the SAML trust configuration is loaded by `sp-core`.

use sp_cache_redis::RedisConfig;
use sp_core::SpConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host to bind to.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Redis connection (optional; in-memory store when absent).
    pub redis: Option<RedisConfig>,

    /// Whether session cookies carry the `Secure` attribute.
    ///
    /// On by default; disable only behind plain HTTP (tests, local
    /// development).
    pub cookie_secure: bool,

    /// SAML service provider configuration.
    pub sp: SpConfig,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let host = std::env::var("SP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("SP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let cookie_secure = std::env::var("SP_COOKIE_SECURE")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        let redis = redis_from_env();
        let sp = SpConfig::from_env()?;

        Ok(Self {
            host,
            port,
            redis,
            cookie_secure,
            sp,
        })
    }

    /// Creates a configuration for testing with the in-memory store.
    #[must_use]
    pub fn for_testing(sp: SpConfig) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            redis: None,
            cookie_secure: false,
            sp,
        }
    }
}

/// Builds the Redis configuration when `REDIS_HOST` is set.
fn redis_from_env() -> Option<RedisConfig> {
    let host = std::env::var("REDIS_HOST").ok()?;

    let mut config = RedisConfig::new().host(host);
    if let Some(port) = std::env::var("REDIS_PORT").ok().and_then(|p| p.parse().ok()) {
        config = config.port(port);
    }
    if let Ok(password) = std::env::var("REDIS_PASSWORD") {
        config = config.password(password);
    }
    if let Some(db) = std::env::var("REDIS_DATABASE")
        .ok()
        .and_then(|d| d.parse().ok())
    {
        config = config.database(db);
    }
    if let Ok(tls) = std::env::var("REDIS_TLS") {
        config = config.tls(tls.to_lowercase() == "true" || tls == "1");
    }
    if let Some(ms) = std::env::var("REDIS_CONNECT_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config = config.connect_timeout_ms(ms);
    }
    if let Some(ms) = std::env::var("REDIS_COMMAND_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        config = config.command_timeout_ms(ms);
    }

    Some(config)
}
