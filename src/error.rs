//! Error types for cache construction.
//!
//! Only construction can fail. Lookups, removals and pin changes on absent
//! keys are ordinary outcomes reported through `Option`/`bool`, and an insert
//! that cannot be retained because everything else is pinned is reported by
//! the return value of [`put`](crate::PinnedLruCache::put).

extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// Why a capacity value was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    /// The capacity was not a whole number.
    #[error("Expected an integer number, got `{0}`")]
    NotAnInteger(String),

    /// The capacity was zero or negative.
    #[error("Expected a positive number greater or equal to 1, got {0}")]
    NotPositive(i64),

    /// The capacity does not fit in `usize` on this target.
    #[error("Capacity `{0}` does not fit in usize")]
    TooLarge(String),
}

/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The supplied capacity is not a positive integer.
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(#[from] CapacityError),
}

/// Convenience Result type for the cache.
pub type Result<T> = core::result::Result<T, CacheError>;
