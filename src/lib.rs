#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        PinnedLruCache                            │
//! │                                                                  │
//! │   entry index (HashMap)            recency list (arena)          │
//! │   ┌──────────────────────┐         head                tail      │
//! │   │ key → CacheEntry     │         ┌───┐   ┌───┐   ┌───┐         │
//! │   │   value              │         │ k3│◀─▶│ k1│◀─▶│ k2│         │
//! │   │   pinned             │         └───┘   └───┘   └───┘         │
//! │   │   node ──────────────┼───────▶ handles into the arena        │
//! │   └──────────────────────┘         MRU ─────────────▶ LRU        │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Construction
//!
//! ```rust
//! use pinned_lru::PinnedLruCache;
//! use pinned_lru::config::PinnedLruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! // From a NonZeroUsize
//! let cache: PinnedLruCache<String, u32> = PinnedLruCache::new(NonZeroUsize::new(100).unwrap());
//!
//! // From an unchecked capacity
//! let cache: PinnedLruCache<String, u32> = PinnedLruCache::try_new(100).unwrap();
//! assert!(PinnedLruCache::<String, u32>::try_new(0).is_err());
//!
//! // From a config, e.g. one parsed from text
//! let config: PinnedLruCacheConfig = "100".parse().unwrap();
//! let cache: PinnedLruCache<String, u32> = PinnedLruCache::init(config, None);
//! ```
//!
//! ## Metrics
//!
//! ```rust
//! use pinned_lru::PinnedLruCache;
//! use pinned_lru::metrics::CacheMetrics;
//! use core::num::NonZeroUsize;
//!
//! let mut cache = PinnedLruCache::new(NonZeroUsize::new(2).unwrap());
//! cache.put("a", 1);
//! cache.get(&"a");
//! cache.get(&"b");
//!
//! let metrics = CacheMetrics::metrics(&cache);
//! assert_eq!(metrics.get("hit_rate"), Some(&0.5));
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: The pin-aware LRU cache
//! - [`entry`]: Per-key index records
//! - [`config`]: Configuration and capacity validation
//! - [`error`]: Error types
//! - [`metrics`]: Metrics collection for cache monitoring

#![no_std]

/// Per-key index record.
///
/// Holds the cached value, the pinned flag and the handle of the key's
/// recency-list node.
pub mod entry;

/// Arena-backed doubly linked list ordering keys by recency.
///
/// Internal infrastructure; the cache keeps the list and the index in sync.
pub(crate) mod list;

/// Cache configuration and capacity validation.
pub mod config;

/// Error types.
pub mod error;

/// Pin-aware Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-capacity cache that evicts the least recently used
/// unpinned entry when a new key pushes it over capacity.
pub mod lru;

/// Cache metrics system.
pub mod metrics;

pub use entry::CacheEntry;
pub use error::{CacheError, CapacityError, Result};
pub use lru::PinnedLruCache;
