//! Cache Entry Type
//!
//! A `CacheEntry<V>` is the record the entry index keeps for every live key:
//! the cached value, the pinned flag, and the handle of the key's node in the
//! recency list. The entry and its node are created and destroyed together,
//! so a live entry always refers to exactly one node.
//!
//! # Memory Layout
//!
//! - `value: V` - User's value type
//! - `pinned: bool` - 1 byte (+ padding)
//! - `node: Handle` - 8 bytes on 64-bit targets
//!
//! The key itself is stored twice: once as the index key and once in the
//! recency-list node, which is how eviction from the tail finds its way back
//! into the index.

use crate::list::Handle;
use core::fmt;

/// Index record for a cached key.
///
/// # Examples
///
/// ```
/// use pinned_lru::PinnedLruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = PinnedLruCache::new(NonZeroUsize::new(2).unwrap());
/// cache.put("key", 42);
/// cache.set_persistent(&"key");
/// assert_eq!(cache.is_pinned(&"key"), Some(true));
/// ```
pub struct CacheEntry<V> {
    /// The cached value.
    pub value: V,

    /// Whether the entry is exempt from automatic eviction.
    pinned: bool,

    /// Position of the key in the recency list.
    node: Handle,
}

impl<V> CacheEntry<V> {
    /// Creates an unpinned entry bound to `node`.
    ///
    /// New entries always start unpinned; pinning is only reachable through
    /// the persistence operations on a live key.
    #[inline]
    pub(crate) fn new(value: V, node: Handle) -> Self {
        Self {
            value,
            pinned: false,
            node,
        }
    }

    /// Returns true if the entry is pinned.
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Sets the pinned flag and returns the previous state.
    #[inline]
    pub(crate) fn set_pinned(&mut self, pinned: bool) -> bool {
        core::mem::replace(&mut self.pinned, pinned)
    }

    /// Handle of this entry's recency-list node.
    #[inline]
    pub(crate) fn node(&self) -> Handle {
        self.node
    }

    /// Replaces the value, returning the old one.
    #[inline]
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }
}

impl<V: fmt::Debug> fmt::Debug for CacheEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("value", &self.value)
            .field("pinned", &self.pinned)
            .field("node", &self.node)
            .finish()
    }
}
