//! Configuration for the tick engine.
//!
//! This module provides the [`Config`] struct covering the Redis transport
//! endpoint and the timing knobs of the heartbeat/reconnect loop.

use std::time::Duration;

/// Configuration for the engine and its Redis publisher
///
/// # Example
///
/// ```rust
/// use tick_engine::Config;
/// use std::time::Duration;
///
/// let config = Config::new("redis.internal", 6380)
///     .with_password("s3cret")
///     .with_heartbeat_interval(Duration::from_secs(10))
///     .with_snapshot_depth(5);
///
/// assert_eq!(config.redis_url(), "redis://:s3cret@redis.internal:6380/");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis host
    redis_host: String,

    /// Redis port
    redis_port: u16,

    /// Optional Redis AUTH password
    redis_password: Option<String>,

    /// Interval between liveness pings
    heartbeat_interval: Duration,

    /// Flat delay before a reconnection attempt after a failed ping
    reconnect_delay: Duration,

    /// Number of levels per side included in published snapshots
    snapshot_depth: usize,
}

impl Config {
    /// Create a configuration for the given Redis endpoint
    pub fn new(redis_host: impl Into<String>, redis_port: u16) -> Self {
        Self {
            redis_host: redis_host.into(),
            redis_port,
            redis_password: None,
            heartbeat_interval: Duration::from_secs(30),
            reconnect_delay: Duration::from_secs(5),
            snapshot_depth: 10,
        }
    }

    /// Set the Redis AUTH password
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.redis_password = Some(password.into());
        self
    }

    /// Set the heartbeat ping interval
    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Set the flat delay between reconnection attempts
    #[must_use]
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Set the snapshot depth (levels per side)
    #[must_use]
    pub fn with_snapshot_depth(mut self, depth: usize) -> Self {
        self.snapshot_depth = depth;
        self
    }

    /// Get the Redis host
    pub fn redis_host(&self) -> &str {
        &self.redis_host
    }

    /// Get the Redis port
    pub fn redis_port(&self) -> u16 {
        self.redis_port
    }

    /// Get the heartbeat interval
    pub fn heartbeat_interval(&self) -> Duration {
        self.heartbeat_interval
    }

    /// Get the reconnect delay
    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }

    /// Get the snapshot depth
    pub fn snapshot_depth(&self) -> usize {
        self.snapshot_depth
    }

    /// Compose the Redis connection URL
    pub fn redis_url(&self) -> String {
        match &self.redis_password {
            Some(password) => format!(
                "redis://:{}@{}:{}/",
                password, self.redis_host, self.redis_port
            ),
            None => format!("redis://{}:{}/", self.redis_host, self.redis_port),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("127.0.0.1", 6379)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.redis_host(), "127.0.0.1");
        assert_eq!(config.redis_port(), 6379);
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(30));
        assert_eq!(config.reconnect_delay(), Duration::from_secs(5));
        assert_eq!(config.snapshot_depth(), 10);
        assert_eq!(config.redis_url(), "redis://127.0.0.1:6379/");
    }

    #[test]
    fn test_builder_pattern() {
        let config = Config::new("redis.internal", 6380)
            .with_password("hunter2")
            .with_heartbeat_interval(Duration::from_secs(10))
            .with_reconnect_delay(Duration::from_secs(1))
            .with_snapshot_depth(25);

        assert_eq!(config.heartbeat_interval(), Duration::from_secs(10));
        assert_eq!(config.reconnect_delay(), Duration::from_secs(1));
        assert_eq!(config.snapshot_depth(), 25);
        assert_eq!(config.redis_url(), "redis://:hunter2@redis.internal:6380/");
    }
}
