//! Cache entries

use std::time::Duration;

use tokio::time::Instant;

/// A cached value with its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<V> {
    pub data: V,
    pub timestamp: Instant,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Entry written at `now`, valid for `ttl`.
    pub fn new(data: V, now: Instant, ttl: Duration) -> Self {
        Self {
            data,
            timestamp: now,
            expires_at: now + ttl,
        }
    }

    /// Valid while `now <= expires_at`.
    pub fn is_valid(&self, now: Instant) -> bool {
        now <= self.expires_at
    }
}
