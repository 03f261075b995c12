//! Error types shared by the containers.
//!
//! - [`ConfigError`]: a cache constructor was handed a zero where a positive
//!   count is required (capacity, index load factor).
//! - [`InvariantError`]: a debug-only `check_invariants` call found the hash
//!   index and the recency list out of sync.
//!
//! ```
//! use containerkit::error::ConfigError;
//! use containerkit::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<String, i32>, ConfigError> = LruCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! let bad = LruCache::<String, i32>::try_new(0).unwrap_err();
//! assert_eq!(bad.parameter(), "capacity");
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// A cache configuration parameter that must be positive was zero.
///
/// Produced by fallible constructors such as
/// [`LruCache::try_new`](crate::policy::lru::LruCache::try_new) and
/// [`LruCacheClass::try_new_cache`](crate::builder::LruCacheClass::try_new_cache).
/// The panicking constructors (`new`, `new_cache`) panic with its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    parameter: &'static str,
}

impl ConfigError {
    pub(crate) fn zero(parameter: &'static str) -> Self {
        Self { parameter }
    }

    /// Name of the rejected parameter: `"capacity"` or `"max_load_factor"`.
    pub fn parameter(&self) -> &'static str {
        self.parameter
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LRU cache {} must be > 0, got 0", self.parameter)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// The cache's internal structures disagree. Only produced in debug builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Describes the first mismatch found.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LRU invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
