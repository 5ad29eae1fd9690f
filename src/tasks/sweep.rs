//! TTL Sweep Task
//!
//! Background task that periodically removes expired map entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::ttlmap::{EntryTable, MAX_TTL};

/// Spawns the sweep task for one map on `handle`.
///
/// The first pass runs one full `sweep_interval` after spawning. Intervals
/// beyond `MAX_TTL` are clamped so the first deadline cannot overflow. The
/// task exits when `shutdown_rx` observes `true` or its sender is dropped.
///
/// # Returns
/// The task's JoinHandle, which the owning map keeps so shutdown can await it.
pub(crate) fn spawn_sweep_task<V>(
    handle: &Handle,
    table: Arc<EntryTable<V>>,
    sweep_interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    let sweep_interval = sweep_interval.min(MAX_TTL);

    handle.spawn(async move {
        info!(?sweep_interval, "Starting TTL sweep task");

        let mut ticker = interval_at(Instant::now() + sweep_interval, sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    let removed = table.sweep_expired();
                    if removed > 0 {
                        debug!(removed, remaining = table.entries.len(), "TTL sweep: removed expired entries");
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
                changed = shutdown_rx.changed() => {
                    // Sender dropped along with the map
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!("TTL sweep task stopped");
    })
}
