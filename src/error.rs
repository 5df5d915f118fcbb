//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`InvalidCapacity`]: Returned when a cache is constructed with a
//!   capacity of zero. Construction is the only fallible operation in the
//!   library; every runtime read/write is total and reports absence as
//!   `None`, never as an error.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::cache::Cache;
//! use evictkit::error::InvalidCapacity;
//! use evictkit::policy::lru::LruPolicy;
//!
//! let cache: Result<Cache<u64, String>, InvalidCapacity> =
//!     Cache::new(0, LruPolicy::new());
//! assert!(cache.is_err());
//! ```

use std::fmt;

/// Error returned when a cache is constructed with an invalid capacity.
///
/// A cache must be able to hold at least one entry; a zero capacity would
/// leave eviction hooks with a full store and no victim to select. Carries
/// the rejected value for diagnostics.
///
/// # Example
///
/// ```
/// use evictkit::cache::Cache;
/// use evictkit::policy::lru::LruPolicy;
///
/// let err = Cache::<u64, u64>::new(0, LruPolicy::new()).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// assert_eq!(err.requested(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCapacity(usize);

impl InvalidCapacity {
    /// Creates a new `InvalidCapacity` recording the rejected value.
    #[inline]
    pub fn new(requested: usize) -> Self {
        Self(requested)
    }

    /// Returns the capacity value that was rejected.
    #[inline]
    pub fn requested(&self) -> usize {
        self.0
    }
}

impl fmt::Display for InvalidCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cache capacity must be at least 1, got {}", self.0)
    }
}

impl std::error::Error for InvalidCapacity {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_parameter() {
        let err = InvalidCapacity::new(0);
        assert_eq!(err.to_string(), "cache capacity must be at least 1, got 0");
    }

    #[test]
    fn debug_includes_value() {
        let err = InvalidCapacity::new(0);
        let dbg = format!("{:?}", err);
        assert!(dbg.contains('0'));
    }

    #[test]
    fn requested_accessor() {
        assert_eq!(InvalidCapacity::new(7).requested(), 7);
    }

    #[test]
    fn clone_and_eq() {
        let a = InvalidCapacity::new(0);
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvalidCapacity>();
    }
}
