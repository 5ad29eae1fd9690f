//! Map Entry Module
//!
//! Defines a single stored value together with its absolute deadline.

use std::time::{Duration, Instant};

/// Upper bound for a single TTL (~100 years). Longer TTLs are clamped so the
/// deadline arithmetic cannot overflow.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Entry ==
/// A value owned by the map and the instant it stops being visible.
#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    pub(crate) value: V,
    pub(crate) expires_at: Instant,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after `now`.
    pub(crate) fn new(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            expires_at: now + ttl.min(MAX_TTL),
        }
    }

    // == Is Expired ==
    /// An entry is expired once `now` has reached its deadline.
    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired.
    pub(crate) fn remaining_at(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}
