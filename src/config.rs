//! Configuration Module
//!
//! Map parameters and server configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::ttlmap::{DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};

// == TTL Map Config ==
/// Creation parameters for a [`crate::TtlMap`].
///
/// Zero durations are accepted here and replaced by the defaults when the
/// map is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlMapConfig {
    /// TTL for entries stored with a zero TTL
    pub default_ttl: Duration,
    /// Period of the background sweep
    pub sweep_interval: Duration,
}

impl TtlMapConfig {
    /// Sets the default TTL.
    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    /// Sets the sweep interval.
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }
}

impl Default for TtlMapConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for entries stored without a TTL
    pub default_ttl: u64,
    /// Background sweep interval in milliseconds
    pub sweep_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 5000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            sweep_interval_ms: env_or("SWEEP_INTERVAL_MS", defaults.sweep_interval_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Map parameters derived from this configuration.
    pub fn map_config(&self) -> TtlMapConfig {
        TtlMapConfig {
            default_ttl: Duration::from_secs(self.default_ttl),
            sweep_interval: Duration::from_millis(self.sweep_interval_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL.as_secs(),
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL.as_millis() as u64,
            server_port: 3000,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.sweep_interval_ms, 5000);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DEFAULT_TTL");
        env::remove_var("SWEEP_INTERVAL_MS");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.sweep_interval_ms, 5000);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("TTLMAP_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("TTLMAP_TEST_GARBAGE", 7u64), 7);

        env::set_var("TTLMAP_TEST_NUMBER", " 42 ");
        assert_eq!(env_or("TTLMAP_TEST_NUMBER", 7u64), 42);
    }

    #[test]
    fn test_map_config_conversion() {
        let config = Config {
            default_ttl: 60,
            sweep_interval_ms: 250,
            server_port: 8080,
        };

        let map_config = config.map_config();
        assert_eq!(map_config.default_ttl, Duration::from_secs(60));
        assert_eq!(map_config.sweep_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_map_config_default() {
        let config = TtlMapConfig::default();
        assert_eq!(config.default_ttl, DEFAULT_TTL);
        assert_eq!(config.sweep_interval, DEFAULT_SWEEP_INTERVAL);
    }
}
