//! Pin-Aware Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a capacity-bounded LRU cache in which individual
//! entries can be *pinned*. Pinned entries are never removed by automatic
//! eviction; only an explicit [`remove`](PinnedLruCache::remove),
//! [`clear`](PinnedLruCache::clear), or un-pinning makes them eligible again.
//!
//! # Algorithm
//!
//! Two structures cooperate:
//!
//! - the **recency list**, an arena-backed doubly linked list of keys ordered
//!   from most recently used (front) to least recently used (back);
//! - the **entry index**, a hash map from key to [`CacheEntry`] holding the
//!   value, the pinned flag and the handle of the key's list node.
//!
//! Every access resolves the key through the index and moves its node to the
//! front. Inserting a new key runs the eviction loop:
//!
//! ```text
//! while len > capacity:
//!     tail unpinned  -> evict it
//!     tail pinned    -> move it to the front, exposing the next candidate
//!     all pinned     -> stop
//! ```
//!
//! Rotating a pinned tail to the front keeps a pinned entry from blocking the
//! scan forever. Because the rotation is a real move, the recency order seen
//! by [`iter`](PinnedLruCache::iter) and
//! [`to_snapshot`](PinnedLruCache::to_snapshot) reflects it.
//!
//! # Inserting When Everything Else Is Pinned
//!
//! A new key always starts unpinned, so the eviction loop can always make
//! progress. Older unpinned entries sit closer to the tail than the new key
//! and are evicted first. The new key itself is only evicted when every other
//! entry is pinned; [`put`](PinnedLruCache::put) then returns `false` and the
//! cache keeps its previous contents.
//!
//! # Performance Characteristics
//!
//! - `get`, `put` on an existing key, `remove`, pin changes: O(1)
//! - `put` of a new key: O(1) plus one step per pinned entry rotated past
//! - `iter`, `to_snapshot`: O(n)
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap the
//! cache in a `Mutex` and hold the lock for each operation, or shard keys
//! across independent caches.

extern crate alloc;

use crate::config::PinnedLruCacheConfig;
use crate::entry::CacheEntry;
use crate::error::Result;
use crate::list::{self, List};
use crate::metrics::{CacheMetrics, PinnedLruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::{FusedIterator, Rev};
use core::num::NonZeroUsize;
use tracing::{debug, trace, warn};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
extern crate std;
#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A capacity-bounded LRU cache with pinnable entries.
///
/// # Examples
///
/// ```
/// use pinned_lru::PinnedLruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = PinnedLruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("config", 1);
/// cache.set_persistent(&"config");
///
/// cache.put("apple", 2);
/// cache.put("banana", 3); // "apple" evicted, "config" is pinned
///
/// assert_eq!(cache.get(&"config"), Some(&1));
/// assert_eq!(cache.get(&"apple"), None);
/// assert_eq!(cache.get(&"banana"), Some(&3));
/// ```
pub struct PinnedLruCache<K, V, S = DefaultHashBuilder> {
    config: PinnedLruCacheConfig,
    list: List<K>,
    map: HashMap<K, CacheEntry<V>, S>,
    pinned: usize,
    metrics: PinnedLruCacheMetrics,
}

impl<K: Hash + Eq, V> PinnedLruCache<K, V> {
    /// Creates a new cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> PinnedLruCache<K, V, DefaultHashBuilder> {
        PinnedLruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new cache from a raw capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// if `capacity` is zero.
    ///
    /// ```
    /// use pinned_lru::PinnedLruCache;
    ///
    /// assert!(PinnedLruCache::<&str, i32>::try_new(0).is_err());
    /// assert_eq!(PinnedLruCache::<&str, i32>::try_new(10).unwrap().cap().get(), 10);
    /// ```
    pub fn try_new(capacity: usize) -> Result<PinnedLruCache<K, V, DefaultHashBuilder>> {
        let config = PinnedLruCacheConfig::new(capacity)?;
        Ok(PinnedLruCache::new(config.capacity))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> PinnedLruCache<K, V, S> {
    /// Creates a cache from a config, with an optional hash builder.
    ///
    /// When `hash_builder` is `None`, `S::default()` is used.
    pub fn init(config: PinnedLruCacheConfig, hash_builder: Option<S>) -> Self {
        Self::with_hasher(config.capacity, hash_builder.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> PinnedLruCache<K, V, S> {
    /// Creates a new cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        debug!(capacity = cap.get(), "creating pinned LRU cache");
        PinnedLruCache {
            config: PinnedLruCacheConfig::from(cap),
            list: List::new(cap),
            map: HashMap::with_capacity_and_hasher(cap.get(), hash_builder),
            pinned: 0,
            metrics: PinnedLruCacheMetrics::new(),
        }
    }

    /// Maximum number of entries before automatic eviction starts.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Number of entries currently cached.
    ///
    /// Never exceeds [`cap`](Self::cap): a new key is dropped again rather
    /// than pushing the cache past it when everything else is pinned.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of entries currently pinned.
    #[inline]
    pub fn pinned_len(&self) -> usize {
        self.pinned
    }

    /// Counters collected since the cache was created.
    #[inline]
    pub fn metrics(&self) -> &PinnedLruCacheMetrics {
        &self.metrics
    }

    /// Returns true if `key` is cached. Does not change recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the value for `key` without marking it as used.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(|entry| &entry.value)
    }

    /// Returns whether `key` is pinned, or `None` if it is not cached.
    pub fn is_pinned<Q>(&self, key: &Q) -> Option<bool>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(CacheEntry::is_pinned)
    }

    /// Returns the value for `key` and marks it as most recently used.
    ///
    /// A missing key is not an error; it is counted as a miss and `None` is
    /// returned.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key) {
            Some(entry) => {
                self.list.move_to_front(entry.node());
                self.metrics.core.record_hit();
                Some(&entry.value)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Mutable variant of [`get`](Self::get); also counts as a use.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get_mut(key) {
            Some(entry) => {
                self.list.move_to_front(entry.node());
                self.metrics.core.record_hit();
                Some(&mut entry.value)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Removes `key` and returns its value, pinned or not.
    pub fn pop<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let entry = self.map.remove(key)?;
        let removed = self.list.remove(entry.node());
        debug_assert!(removed.is_some(), "index entry without a list node");
        if entry.is_pinned() {
            self.pinned -= 1;
            self.metrics.record_pinned_removal();
        }
        self.metrics.core.record_removal();
        trace!(len = self.map.len(), "removed entry");
        Some(entry.value)
    }

    /// Removes `key`, returning true if it was cached.
    ///
    /// Explicit removal ignores the pinned flag; pinning only protects an
    /// entry from automatic eviction.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.pop(key).is_some()
    }

    /// Pins `key` so automatic eviction skips it. No-op if absent.
    pub fn set_persistent<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.update_pin(key, |_| true);
    }

    /// Unpins `key`. No-op if absent.
    ///
    /// Unpinning does not evict anything by itself; an over-capacity cache is
    /// brought back within bounds by the next insert of a new key.
    pub fn remove_persistent<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.update_pin(key, |_| false);
    }

    /// Flips the pinned flag of `key`. No-op if absent.
    pub fn toggle_persistent<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.update_pin(key, |pinned| !pinned);
    }

    fn update_pin<Q, F>(&mut self, key: &Q, f: F)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(bool) -> bool,
    {
        let Some(entry) = self.map.get_mut(key) else {
            return;
        };
        let pinned = f(entry.is_pinned());
        if entry.set_pinned(pinned) == pinned {
            return;
        }
        if pinned {
            self.pinned += 1;
        } else {
            self.pinned -= 1;
        }
        self.metrics.record_pin_change(pinned);
        trace!(pinned, pinned_len = self.pinned, "changed pin state");
    }

    /// Removes every entry, pinned ones included.
    pub fn clear(&mut self) {
        let entries = self.map.len();
        self.map.clear();
        self.list.clear();
        self.pinned = 0;
        self.metrics.record_clear();
        debug!(entries, "cleared cache");
    }

    /// Iterates entries from least to most recently used.
    ///
    /// Iteration does not change recency.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            keys: self.list.iter().rev(),
            map: &self.map,
        }
    }

    /// Evicts the least recently used entry, pinned or not.
    fn evict_tail(&mut self) {
        if let Some(key) = self.list.remove_last() {
            let removed = self.map.remove(&key);
            debug_assert!(removed.is_some(), "list node without an index entry");
            self.metrics.core.record_eviction();
            debug!(len = self.map.len(), "evicted least recently used entry");
        }
    }

    /// Restores the capacity bound after `new_node` was inserted.
    ///
    /// Returns false if the key at `new_node` had to be dropped itself. A
    /// dropped key counts as a rejected insert, never as an insertion or an
    /// eviction.
    fn evict_overflow(&mut self, new_node: list::Handle) -> bool {
        let cap = self.cap().get();
        let mut retained = true;

        while self.map.len() > cap {
            // The new key is unpinned, so this only stops an endless rotation.
            debug_assert!(self.pinned < self.map.len(), "new key must be unpinned");
            if self.pinned >= self.map.len() {
                break;
            }

            let Some(tail) = self.list.last() else {
                break;
            };
            let tail_pinned = self
                .list
                .get_value(tail)
                .and_then(|key| self.map.get(key))
                .is_some_and(CacheEntry::is_pinned);

            if tail_pinned {
                self.list.move_to_front(tail);
                self.metrics.record_pinned_rotation();
                debug!("rotated pinned entry away from the eviction tail");
                continue;
            }

            if tail == new_node {
                // Dropping the new key is a rejection, not an eviction.
                if let Some(key) = self.list.remove_last() {
                    self.map.remove(&key);
                }
                retained = false;
                break;
            }
            self.evict_tail();
        }

        if retained {
            self.metrics.core.record_insertion();
        } else {
            self.metrics.core.record_rejected_insert();
            warn!(
                pinned_len = self.pinned,
                capacity = cap,
                "new entry dropped, all other entries are pinned"
            );
        }
        retained
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> PinnedLruCache<K, V, S> {
    /// Inserts or updates `key` and marks it as most recently used.
    ///
    /// Updating an existing key replaces its value in place and keeps its pin
    /// state. Inserting a new key may evict unpinned entries from the least
    /// recently used end; pinned entries met on the way are rotated to the
    /// front instead.
    ///
    /// Returns true if `key` is cached once the call returns. It is false
    /// only when `key` was new and every other entry is pinned, in which case
    /// the new entry is dropped and the cache is left as it was.
    ///
    /// ```
    /// use pinned_lru::PinnedLruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let mut cache = PinnedLruCache::new(NonZeroUsize::new(1).unwrap());
    /// assert!(cache.put("a", 1));
    /// cache.set_persistent(&"a");
    /// assert!(!cache.put("b", 2));
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> bool {
        if let Some(entry) = self.map.get_mut(&key) {
            entry.replace_value(value);
            self.list.move_to_front(entry.node());
            self.metrics.core.record_update();
            trace!("updated existing entry");
            return true;
        }

        let node = self.list.add(key.clone());
        self.map.insert(key, CacheEntry::new(value, node));
        debug_assert_eq!(self.list.len(), self.map.len());
        trace!(len = self.map.len(), "inserted new entry");

        self.evict_overflow(node)
    }

    /// Copies out every entry from least to most recently used.
    ///
    /// ```
    /// use pinned_lru::PinnedLruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let mut cache = PinnedLruCache::new(NonZeroUsize::new(3).unwrap());
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// cache.put("c", 3);
    /// cache.get(&"a");
    /// assert_eq!(cache.to_snapshot(), vec![("b", 2), ("c", 3), ("a", 1)]);
    /// ```
    pub fn to_snapshot(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K, V, S> fmt::Debug for PinnedLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinnedLruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .field("pinned", &self.pinned)
            .finish()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for PinnedLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a PinnedLruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Iter<'a, K, V, S> {
        self.iter()
    }
}

/// Iterator over cache entries from least to most recently used.
///
/// Created by [`PinnedLruCache::iter`].
pub struct Iter<'a, K, V, S = DefaultHashBuilder> {
    keys: Rev<list::Iter<'a, K>>,
    map: &'a HashMap<K, CacheEntry<V>, S>,
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        self.map.get(key).map(|entry| (key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> DoubleEndedIterator for Iter<'_, K, V, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        self.map.get(key).map(|entry| (key, &entry.value))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ExactSizeIterator for Iter<'_, K, V, S> {}

impl<K: Hash + Eq, V, S: BuildHasher> FusedIterator for Iter<'_, K, V, S> {}

impl<K, V, S> fmt::Debug for Iter<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.keys.len())
            .finish()
    }
}
