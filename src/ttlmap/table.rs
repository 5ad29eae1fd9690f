//! Entry Table Module
//!
//! The concurrent storage shared between a `TtlMap` handle and its sweep task.

use std::time::Instant;

use dashmap::DashMap;

use crate::ttlmap::stats::StatsCounters;
use crate::ttlmap::Entry;

// == Entry Table ==
/// Sharded key -> entry storage plus the counters describing it.
///
/// DashMap guards each shard with its own lock, so operations on different
/// keys proceed in parallel. A `Ref` into the map must never be held while
/// calling back into the same map, or the shard lock deadlocks.
#[derive(Debug)]
pub(crate) struct EntryTable<V> {
    pub(crate) entries: DashMap<String, Entry<V>>,
    pub(crate) stats: StatsCounters,
}

impl<V> EntryTable<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: DashMap::new(),
            stats: StatsCounters::default(),
        }
    }

    // == Evict If Expired ==
    /// Removes `key` only if its current entry is expired as of `now`.
    ///
    /// The check and the removal happen under one shard lock, so an entry
    /// refreshed by a concurrent `put` after the caller's check survives.
    pub(crate) fn evict_if_expired(&self, key: &str, now: Instant) -> bool {
        let removed = self
            .entries
            .remove_if(key, |_, entry| entry.is_expired_at(now))
            .is_some();

        if removed {
            self.stats.record_expired();
        }
        removed
    }

    // == Sweep Expired ==
    /// Removes every entry whose deadline has passed.
    ///
    /// Returns the number of entries removed.
    pub(crate) fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.entries.retain(|_, entry| {
            if entry.is_expired_at(now) {
                removed += 1;
                false
            } else {
                true
            }
        });

        self.stats.record_swept(removed);
        removed
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn insert(table: &EntryTable<&'static str>, key: &str, ttl: Duration, now: Instant) {
        table
            .entries
            .insert(key.to_string(), Entry::new("value", ttl, now));
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let table = EntryTable::new();
        let past = Instant::now() - Duration::from_secs(10);

        insert(&table, "stale_a", Duration::from_secs(1), past);
        insert(&table, "stale_b", Duration::from_secs(2), past);
        insert(&table, "fresh", Duration::from_secs(3600), Instant::now());

        assert_eq!(table.sweep_expired(), 2);
        assert_eq!(table.entries.len(), 1);
        assert!(table.entries.contains_key("fresh"));
        assert_eq!(table.stats.snapshot(0).swept, 2);
    }

    #[test]
    fn test_sweep_on_empty_table() {
        let table: EntryTable<u8> = EntryTable::new();
        assert_eq!(table.sweep_expired(), 0);
    }

    #[test]
    fn test_evict_if_expired_keeps_refreshed_entry() {
        let table = EntryTable::new();
        let checked_at = Instant::now();

        // Simulates a put that landed after the reader saw the stale entry
        insert(&table, "key", Duration::from_secs(60), checked_at);

        assert!(!table.evict_if_expired("key", checked_at));
        assert!(table.entries.contains_key("key"));
        assert_eq!(table.stats.snapshot(0).expired, 0);
    }

    #[test]
    fn test_evict_if_expired_removes_stale_entry() {
        let table = EntryTable::new();
        let past = Instant::now() - Duration::from_secs(5);
        insert(&table, "key", Duration::from_secs(1), past);

        assert!(table.evict_if_expired("key", Instant::now()));
        assert!(table.entries.is_empty());
        assert_eq!(table.stats.snapshot(0).expired, 1);
    }

    #[test]
    fn test_evict_if_expired_missing_key() {
        let table: EntryTable<u8> = EntryTable::new();
        assert!(!table.evict_if_expired("missing", Instant::now()));
    }
}
