//! ttlmap - A concurrent in-memory key-value map with expiring entries
//!
//! Each entry carries its own TTL. Expired entries are removed lazily when a
//! lookup finds them and periodically by a per-map background sweep. An
//! optional HTTP front-end exposes a map of JSON values.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
mod tasks;
pub mod ttlmap;

pub use api::AppState;
pub use config::{Config, TtlMapConfig};
pub use error::{Result, TtlMapError};
pub use ttlmap::{TtlMap, TtlMapStats, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};
