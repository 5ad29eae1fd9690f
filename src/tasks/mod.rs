//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the life of a map.
//!
//! # Tasks
//! - TTL Sweep: Removes expired entries at the map's sweep interval

mod sweep;

pub(crate) use sweep::spawn_sweep_task;
