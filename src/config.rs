//! Cache Configuration
//!
//! Configuration for [`PinnedLruCache`](crate::PinnedLruCache). The config
//! struct has public fields for simple instantiation; the fallible
//! constructors validate raw capacities coming from integers or text (config
//! files, environment variables, command lines) before they become a
//! `NonZeroUsize`.
//!
//! # Validation
//!
//! | Input | Result |
//! |-------|--------|
//! | `3`, `"3"` | capacity 3 |
//! | `0`, `-86`, `"0"`, `"-86"` | [`CapacityError::NotPositive`] |
//! | `"3.3"`, `"1222.23"`, `"ten"` | [`CapacityError::NotAnInteger`] |
//!
//! # Examples
//!
//! ```
//! use pinned_lru::config::PinnedLruCacheConfig;
//! use pinned_lru::PinnedLruCache;
//! use core::num::NonZeroUsize;
//!
//! // Create config with all fields
//! let config = PinnedLruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: PinnedLruCache<String, i32> = PinnedLruCache::init(config, None);
//!
//! // Or validate a capacity read from text
//! let config: PinnedLruCacheConfig = "250".parse().unwrap();
//! assert_eq!(config.capacity.get(), 250);
//! assert!("2.5".parse::<PinnedLruCacheConfig>().is_err());
//! ```

extern crate alloc;

use crate::error::{CacheError, CapacityError, Result};
use alloc::string::ToString;
use core::fmt;
use core::num::NonZeroUsize;
use core::str::FromStr;

/// Configuration for a pinned LRU cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache holds before automatic
///   eviction kicks in. Pinned entries count towards it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PinnedLruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl PinnedLruCacheConfig {
    /// Validates `capacity` and builds a config from it.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CapacityError::NotPositive(0))?;
        Ok(Self { capacity })
    }
}

impl From<NonZeroUsize> for PinnedLruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }
}

impl TryFrom<i64> for PinnedLruCacheConfig {
    type Error = CacheError;

    fn try_from(capacity: i64) -> Result<Self> {
        if capacity <= 0 {
            return Err(CapacityError::NotPositive(capacity).into());
        }
        let capacity = usize::try_from(capacity)
            .map_err(|_| CapacityError::TooLarge(capacity.to_string()))?;
        Self::new(capacity)
    }
}

impl FromStr for PinnedLruCacheConfig {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(capacity) => Self::try_from(capacity),
            // Digits only but out of range for i64 is still an integer.
            Err(_) if is_integer_literal(trimmed) => {
                if trimmed.starts_with('-') {
                    Err(CapacityError::NotPositive(i64::MIN).into())
                } else {
                    Err(CapacityError::TooLarge(trimmed.to_string()).into())
                }
            }
            Err(_) => Err(CapacityError::NotAnInteger(trimmed.to_string()).into()),
        }
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Debug for PinnedLruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinnedLruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
