//! TTL Map Module
//!
//! Provides a concurrent in-memory map with per-entry expiration, lazy
//! eviction on read and a periodic background sweep.

mod entry;
mod stats;
mod store;
mod table;


use std::time::Duration;

// Re-export public types
pub use entry::MAX_TTL;
pub use stats::TtlMapStats;
pub use store::TtlMap;

pub(crate) use entry::Entry;
pub(crate) use table::EntryTable;

// == Public Constants ==
/// TTL used when `put` is given a zero TTL and the map was created without one
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Sweep period used when a map is created with a zero interval
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5);
