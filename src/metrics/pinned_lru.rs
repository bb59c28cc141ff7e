//! Pinned LRU Cache Metrics
//!
//! Metrics specific to the pin-aware LRU cache: on top of the core counters it
//! tracks how often pinned entries were rotated out of the eviction path and
//! how many entries are pinned right now.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Pinned-LRU metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PinnedLruCacheMetrics {
    /// Core metrics common to recency-based caches
    pub core: CoreCacheMetrics,

    /// Times a pinned entry at the tail was moved to the head during eviction
    pub pinned_rotations: u64,

    /// Number of pin/unpin transitions that actually changed an entry's state
    pub pin_changes: u64,

    /// Entries pinned at the moment the metrics were read
    pub pinned_entries: u64,
}

impl PinnedLruCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pinned tail moved to the head by the eviction loop.
    pub fn record_pinned_rotation(&mut self) {
        self.pinned_rotations += 1;
    }

    /// Records a pin state change and updates the current pinned count.
    pub fn record_pin_change(&mut self, pinned: bool) {
        self.pin_changes += 1;
        if pinned {
            self.pinned_entries += 1;
        } else {
            self.pinned_entries -= 1;
        }
    }

    /// Records a pinned entry leaving the cache through explicit removal.
    pub fn record_pinned_removal(&mut self) {
        self.pinned_entries -= 1;
    }

    /// Resets the current pinned count after the cache was cleared.
    ///
    /// Running counters are kept.
    pub fn record_clear(&mut self) {
        self.pinned_entries = 0;
    }

    /// Converts the metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("pin_changes".to_string(), self.pin_changes as f64);
        metrics.insert("pinned_entries".to_string(), self.pinned_entries as f64);
        metrics.insert("pinned_rotations".to_string(), self.pinned_rotations as f64);
        metrics
    }
}

impl CacheMetrics for PinnedLruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "PinnedLRU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_changes_track_current_count() {
        let mut metrics = PinnedLruCacheMetrics::new();
        metrics.record_pin_change(true);
        metrics.record_pin_change(true);
        metrics.record_pin_change(false);
        assert_eq!(metrics.pin_changes, 3);
        assert_eq!(metrics.pinned_entries, 1);

        metrics.record_pinned_removal();
        assert_eq!(metrics.pinned_entries, 0);
    }

    #[test]
    fn test_clear_keeps_running_counters() {
        let mut metrics = PinnedLruCacheMetrics::new();
        metrics.record_pin_change(true);
        metrics.record_pinned_rotation();
        metrics.record_clear();
        assert_eq!(metrics.pinned_entries, 0);
        assert_eq!(metrics.pinned_rotations, 1);
        assert_eq!(metrics.pin_changes, 1);
    }

    #[test]
    fn test_btreemap_includes_core_and_pin_metrics() {
        let mut metrics = PinnedLruCacheMetrics::new();
        metrics.core.record_hit();
        metrics.record_pinned_rotation();
        let map = metrics.metrics();
        assert_eq!(map.get("cache_hits"), Some(&1.0));
        assert_eq!(map.get("pinned_rotations"), Some(&1.0));
        assert_eq!(map.get("pinned_entries"), Some(&0.0));
        assert_eq!(metrics.algorithm_name(), "PinnedLRU");
    }
}
