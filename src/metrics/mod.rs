//! Cache Metrics System
//!
//! Provides BTreeMap-based metrics reporting for the cache. Counters are kept
//! in plain structs that the cache updates as it works, and the
//! [`CacheMetrics`] trait exposes them as a name → value map.
//!
//! Metric names come out in sorted order.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Counters specific to the pin-aware cache.
pub mod pinned_lru;

pub use pinned_lru::PinnedLruCacheMetrics;

/// Common counters for a recency-based cache.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`/`get_mut`) made to the cache
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of new keys written into the cache
    pub insertions: u64,

    /// Number of value replacements on keys already present
    pub updates: u64,

    /// Number of entries removed explicitly by the caller
    pub removals: u64,

    /// Number of entries removed automatically to restore the capacity bound
    pub evictions: u64,

    /// Number of inserts whose new key could not be retained
    pub rejected_inserts: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that missed.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new key entering the cache.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a value replaced in place.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an explicit removal.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Records an automatic eviction.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an insert that had to drop its own key.
    pub fn record_rejected_insert(&mut self) {
        self.rejected_inserts += 1;
    }

    /// Number of lookups that missed.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, between 0.0 and 1.0.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, between 0.0 and 1.0.
    ///
    /// Returns 0.0 if no lookups have been made.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("rejected_inserts".to_string(), self.rejected_inserts as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Trait for reporting cache metrics.
///
/// Provides a uniform, deterministic view of a cache's counters regardless
/// of how the cache stores them internally.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs, sorted by name.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification
    fn algorithm_name(&self) -> &'static str;
}
