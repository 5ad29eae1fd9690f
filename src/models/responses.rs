//! Response DTOs for the TTL map server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::ttlmap::TtlMapStats;

/// Response body for the GET operation (GET /entries/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the PUT operation (PUT /entries/:key)
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
}

impl PutResponse {
    /// Creates a new PutResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' stored successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /entries/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted", key),
            key,
        }
    }
}

/// Response body for the listing endpoint (GET /entries)
///
/// Mirrors the map snapshot, so entries past their TTL may still appear
/// until the next sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotResponse {
    /// Number of entries in the snapshot
    pub count: usize,
    /// Copied key/value pairs
    pub entries: HashMap<String, Value>,
}

impl SnapshotResponse {
    /// Creates a new SnapshotResponse from a map snapshot
    pub fn new(entries: HashMap<String, Value>) -> Self {
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed lazily on read
    pub expired: u64,
    /// Entries removed by the sweep
    pub swept: u64,
    /// Raw number of stored entries
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Default TTL in milliseconds
    pub default_ttl_ms: u64,
    /// Sweep interval in milliseconds
    pub sweep_interval_ms: u64,
    /// Whether the background sweep is active
    pub sweep_running: bool,
}

impl StatsResponse {
    /// Creates a new StatsResponse from map statistics and settings
    pub fn new(
        stats: &TtlMapStats,
        default_ttl: Duration,
        sweep_interval: Duration,
        sweep_running: bool,
    ) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            swept: stats.swept,
            total_entries: stats.entries,
            hit_rate: stats.hit_rate(),
            default_ttl_ms: millis(default_ttl),
            sweep_interval_ms: millis(sweep_interval),
            sweep_running,
        }
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
