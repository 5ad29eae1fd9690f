//! Map Statistics Module
//!
//! Lock-free counters for lookups and evictions, plus the serializable
//! snapshot handed out to callers.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Stats Counters ==
/// Live counters shared between callers and the sweep task.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
    swept: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts an entry removed by a read that found it expired.
    pub(crate) fn record_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts entries removed by one sweep pass.
    pub(crate) fn record_swept(&self, count: usize) {
        if count > 0 {
            self.swept.fetch_add(count as u64, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self, entries: usize) -> TtlMapStats {
        TtlMapStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            swept: self.swept.load(Ordering::Relaxed),
            entries,
        }
    }
}

// == TtlMap Stats ==
/// Point-in-time view of a map's counters.
///
/// Counters are updated with relaxed atomics, so under concurrent load the
/// fields are individually accurate but not mutually consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TtlMapStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed lazily by a lookup
    pub expired: u64,
    /// Entries removed by sweep passes
    pub swept: u64,
    /// Raw entry count, expired-but-unswept entries included
    pub entries: usize,
}

impl TtlMapStats {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total entries removed because they expired, by either path.
    pub fn evictions(&self) -> u64 {
        self.expired + self.swept
    }
}
