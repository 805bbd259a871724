//! Counters for signature cache operations
//!
//! Lock-free; updating them never contends with the cache's own lock.
//!
//! ## Usage
//!
//! ```ignore
//! let cache = SigCache::new(100_000)?;
//! // ... validation ...
//! let snapshot = cache.metrics();
//! println!("hit rate: {:.2}", snapshot.hit_rate());
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for one signature cache instance.
#[derive(Debug, Default)]
pub struct SigCacheMetrics {
    /// `exists` calls that found the entry
    pub hits: AtomicU64,
    /// `exists` calls that did not
    pub misses: AtomicU64,
    /// New entries inserted
    pub insertions: AtomicU64,
    /// `add` calls for an entry that was already resident
    pub duplicate_insertions: AtomicU64,
    /// Entries evicted to make room
    pub evictions: AtomicU64,
    /// `add` calls abandoned because no eviction draw was available
    pub dropped_insertions: AtomicU64,
}

impl SigCacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lookup(&self, found: bool) {
        if found {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_insertion(&self) {
        self.insertions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicate_insertions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.dropped_insertions.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> SigCacheMetricsSnapshot {
        SigCacheMetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.insertions.load(Ordering::Relaxed),
            duplicate_insertions: self.duplicate_insertions.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            dropped_insertions: self.dropped_insertions.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`SigCacheMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SigCacheMetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub duplicate_insertions: u64,
    pub evictions: u64,
    pub dropped_insertions: u64,
}

impl SigCacheMetricsSnapshot {
    /// Total `exists` calls observed.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.lookups();
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}
