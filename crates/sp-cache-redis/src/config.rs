//! Redis connection configuration.

use serde::{Deserialize, Serialize};

/// Redis connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis server host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Redis server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Redis password (optional).
    pub password: Option<String>,
    /// Redis database number.
    #[serde(default)]
    pub database: u8,
    /// Use TLS for connection.
    #[serde(default)]
    pub tls: bool,
    /// Connection timeout in milliseconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
    /// Command timeout in milliseconds. Bounds every store operation,
    /// so a hung server surfaces as a timeout error instead of stalling
    /// the caller.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_ms: u64,
    /// Key prefix for all store keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            password: None,
            database: 0,
            tls: false,
            connect_timeout_ms: default_connect_timeout(),
            command_timeout_ms: default_command_timeout(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl RedisConfig {
    /// Creates a new Redis configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Redis host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the Redis port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the Redis password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the Redis database number.
    #[must_use]
    pub const fn database(mut self, database: u8) -> Self {
        self.database = database;
        self
    }

    /// Enables TLS.
    #[must_use]
    pub const fn tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// Sets the connection timeout in milliseconds.
    #[must_use]
    pub const fn connect_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.connect_timeout_ms = timeout_ms;
        self
    }

    /// Sets the command timeout in milliseconds.
    #[must_use]
    pub const fn command_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.command_timeout_ms = timeout_ms;
        self
    }

    /// Sets the key prefix.
    #[must_use]
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Builds the Redis connection URL.
    #[must_use]
    pub fn connection_url(&self) -> String {
        let scheme = if self.tls { "rediss" } else { "redis" };
        let auth = self
            .password
            .as_ref()
            .map(|p| format!(":{p}@"))
            .unwrap_or_default();
        format!(
            "{scheme}://{auth}{host}:{port}/{db}",
            host = self.host,
            port = self.port,
            db = self.database
        )
    }

    /// Formats a key with the configured prefix.
    #[must_use]
    pub fn prefixed_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

const fn default_port() -> u16 {
    6379
}

const fn default_connect_timeout() -> u64 {
    5000
}

const fn default_command_timeout() -> u64 {
    2000
}

fn default_key_prefix() -> String {
    "sp".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RedisConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 6379);
        assert_eq!(config.database, 0);
        assert!(!config.tls);
        assert_eq!(config.connect_timeout_ms, 5000);
        assert_eq!(config.command_timeout_ms, 2000);
    }

    #[test]
    fn timeouts_are_configurable() {
        let config = RedisConfig::default()
            .connect_timeout_ms(1000)
            .command_timeout_ms(500);
        assert_eq!(config.connect_timeout_ms, 1000);
        assert_eq!(config.command_timeout_ms, 500);
    }

    #[test]
    fn connection_url() {
        let config = RedisConfig::default();
        assert_eq!(config.connection_url(), "redis://localhost:6379/0");

        let config = RedisConfig::default()
            .host("redis.example.com")
            .port(6380)
            .password("secret")
            .database(1)
            .tls(true);
        assert_eq!(
            config.connection_url(),
            "rediss://:secret@redis.example.com:6380/1"
        );
    }

    #[test]
    fn prefixed_key() {
        let config = RedisConfig::default();
        assert_eq!(config.prefixed_key("session:abc"), "sp:session:abc");

        let config = RedisConfig::default().key_prefix("");
        assert_eq!(config.prefixed_key("session:abc"), "session:abc");
    }
}
