//! TTL Map Store Module
//!
//! The public expiring key-value map. Entries carry an absolute deadline and
//! are removed either lazily, by the lookup that finds them expired, or by the
//! periodic sweep task each map owns.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::TtlMapConfig;
use crate::error::{Result, TtlMapError};
use crate::tasks::spawn_sweep_task;
use crate::ttlmap::{
    Entry, EntryTable, TtlMapStats, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL, MAX_TTL,
};

// == TTL Map ==
/// Concurrent string-keyed map whose entries expire after a per-entry TTL.
///
/// All operations take `&self`; share the map between threads or tasks by
/// wrapping it in an `Arc`. Values are cloned out on read, never handed out
/// by reference.
///
/// Each map spawns one sweep task on the Tokio runtime it was created in.
/// The task runs until [`TtlMap::stop`] is called or the map is dropped.
/// A stopped map keeps serving reads and writes; expired entries are then
/// only removed lazily by lookups.
///
/// # Example
/// ```rust,no_run
/// use std::time::Duration;
/// use ttlmap::TtlMap;
///
/// #[tokio::main]
/// async fn main() {
///     let map = TtlMap::new(Duration::from_secs(5), Duration::from_secs(1));
///     map.put("session", Duration::ZERO, "alice".to_string());
///     assert_eq!(map.get("session").as_deref(), Some("alice"));
///     map.stop();
/// }
/// ```
pub struct TtlMap<V> {
    table: Arc<EntryTable<V>>,
    default_ttl: Duration,
    sweep_interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<V> TtlMap<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a map and starts its sweep task.
    ///
    /// A zero `default_ttl` becomes [`DEFAULT_TTL`] and a zero
    /// `sweep_interval` becomes [`DEFAULT_SWEEP_INTERVAL`]. Intervals longer
    /// than [`MAX_TTL`] are clamped to it.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context, like
    /// `tokio::spawn`. Use [`TtlMap::try_new`] to get an error instead.
    pub fn new(default_ttl: Duration, sweep_interval: Duration) -> Self {
        match Self::try_new(default_ttl, sweep_interval) {
            Ok(map) => map,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`TtlMap::new`].
    ///
    /// # Errors
    /// Returns [`TtlMapError::NoRuntime`] when no Tokio runtime is available
    /// to run the sweep task.
    pub fn try_new(default_ttl: Duration, sweep_interval: Duration) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| TtlMapError::NoRuntime)?;

        let default_ttl = if default_ttl.is_zero() {
            DEFAULT_TTL
        } else {
            default_ttl
        };
        let sweep_interval = if sweep_interval.is_zero() {
            DEFAULT_SWEEP_INTERVAL
        } else {
            sweep_interval.min(MAX_TTL)
        };

        let table = Arc::new(EntryTable::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let sweeper = spawn_sweep_task(&handle, Arc::clone(&table), sweep_interval, shutdown_rx);

        debug!(?default_ttl, ?sweep_interval, "TTL map created");

        Ok(Self {
            table,
            default_ttl,
            sweep_interval,
            shutdown_tx,
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    /// Creates a map from a [`TtlMapConfig`].
    ///
    /// # Panics
    /// Same as [`TtlMap::new`].
    pub fn from_config(config: &TtlMapConfig) -> Self {
        Self::new(config.default_ttl, config.sweep_interval)
    }

    // == Put ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The entry expires `ttl` from now; a zero `ttl` uses the map's default.
    /// Overwriting a key resets its deadline.
    pub fn put(&self, key: impl Into<String>, ttl: Duration, value: V) {
        let ttl = if ttl.is_zero() { self.default_ttl } else { ttl };
        let entry = Entry::new(value, ttl, Instant::now());
        self.table.entries.insert(key.into(), entry);
    }

    // == Get ==
    /// Returns a clone of the value stored under `key`.
    ///
    /// An expired entry is reported as absent and removed before returning.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lookup(key, V::clone)
    }

    /// Returns true if `key` holds a live entry. Evicts like [`TtlMap::get`].
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key, |_| ()).is_some()
    }

    fn lookup<R>(&self, key: &str, read: impl FnOnce(&V) -> R) -> Option<R> {
        let now = Instant::now();

        let Some(entry) = self.table.entries.get(key) else {
            self.table.stats.record_miss();
            return None;
        };

        if entry.is_expired_at(now) {
            // Release the shard read lock before taking its write lock
            drop(entry);
            self.table.evict_if_expired(key, now);
            self.table.stats.record_miss();
            return None;
        }

        let result = read(&entry.value);
        self.table.stats.record_hit();
        Some(result)
    }

    // == Time To Live ==
    /// Remaining lifetime of `key`, or `None` if it is absent or expired.
    ///
    /// Does not evict and does not touch the hit/miss counters.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.table
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.remaining_at(now))
    }

    // == Delete ==
    /// Removes `key`. Absent keys are ignored.
    pub fn delete(&self, key: &str) {
        self.table.entries.remove(key);
    }

    // == Length ==
    /// Returns the raw number of stored entries.
    ///
    /// Entries that have expired but were not yet swept or read are still
    /// counted. [`TtlMap::snapshot`] follows the same rule.
    pub fn len(&self) -> usize {
        self.table.entries.len()
    }

    /// Returns true if no entries are stored, expired ones included.
    pub fn is_empty(&self) -> bool {
        self.table.entries.is_empty()
    }

    // == Snapshot ==
    /// Copies every stored key and value into a new map.
    ///
    /// Like [`TtlMap::len`], the copy may contain entries that have expired
    /// but not been removed yet. Other shards may change while the copy is
    /// taken, so it is only consistent per key.
    pub fn snapshot(&self) -> HashMap<String, V> {
        self.table
            .entries
            .iter()
            .map(|item| (item.key().clone(), item.value().value.clone()))
            .collect()
    }

    // == Purge Expired ==
    /// Runs one sweep pass on the calling thread.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        self.table.sweep_expired()
    }

    // == Stats ==
    /// Returns the current lookup and eviction counters.
    pub fn stats(&self) -> TtlMapStats {
        self.table.stats.snapshot(self.len())
    }

    /// TTL applied by `put` when called with a zero TTL.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Period of the background sweep.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    // == Lifecycle ==
    /// Signals the sweep task to exit.
    ///
    /// Stored entries are kept. Calling `stop` again is a no-op.
    pub fn stop(&self) {
        let was_stopped = self.shutdown_tx.send_replace(true);
        if !was_stopped {
            info!("TTL map sweep stop requested");
        }
    }

    /// Stops the sweep task and waits for it to finish.
    pub async fn shutdown(&self) {
        self.stop();

        let sweeper = self.sweeper.lock().take();
        if let Some(handle) = sweeper {
            if let Err(err) = handle.await {
                warn!(error = %err, "TTL map sweep task ended abnormally");
            }
        }
    }
}

impl<V> TtlMap<V> {
    /// Returns true while the sweep task is alive.
    ///
    /// False once [`TtlMap::stop`] has been called, or once the task has
    /// ended for any other reason, such as its runtime shutting down.
    pub fn is_running(&self) -> bool {
        if *self.shutdown_tx.borrow() {
            return false;
        }
        self.sweeper
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<V> Drop for TtlMap<V> {
    fn drop(&mut self) {
        self.shutdown_tx.send_replace(true);
    }
}

impl<V> fmt::Debug for TtlMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlMap")
            .field("len", &self.table.entries.len())
            .field("default_ttl", &self.default_ttl)
            .field("sweep_interval", &self.sweep_interval)
            .field("running", &self.is_running())
            .finish()
    }
}
