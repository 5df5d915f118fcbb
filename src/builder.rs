//! Unified cache builder for all eviction policies.
//!
//! Provides a single construction path that hides the concrete policy
//! types: pick a [`PolicyKind`], hand it to [`CacheBuilder::build`], get a
//! [`Cache`] back. Useful when the policy comes from configuration rather
//! than being fixed at the call site.
//!
//! ## Example
//!
//! ```
//! use evictkit::builder::{CacheBuilder, PolicyKind};
//!
//! let mut cache = CacheBuilder::new(100)
//!     .build::<u64, String>(PolicyKind::Lru)
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;
use std::time::Duration;

use crate::cache::Cache;
use crate::error::InvalidCapacity;
use crate::policy::lfu::LfuPolicy;
use crate::policy::lru::LruPolicy;
use crate::policy::random::RandomPolicy;
use crate::policy::ttl::TtlPolicy;
use crate::policy::window::SlidingWindowPolicy;

/// Available eviction policies, with their per-policy parameters.
#[derive(Debug, Clone)]
pub enum PolicyKind {
    /// Least-Recently-Used eviction.
    Lru,
    /// Fixed time-to-live from last write.
    Ttl { ttl: Duration },
    /// Idle timeout extended by every touch.
    SlidingWindow { window: Duration },
    /// Least-Frequently-Used eviction, oldest-first tie-break.
    Lfu,
    /// Uniform random eviction; `seed` fixes the victim sequence.
    Random { seed: Option<u64> },
}

/// Builder carrying the policy-independent cache parameters.
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Starts a builder for a cache of the given capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Builds a cache with the chosen policy.
    ///
    /// Keys must be `Send` because the policy's auxiliary state (deadline
    /// and counter maps) travels with the cache into
    /// [`SharedCache`](crate::shared::SharedCache).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if the capacity is zero.
    pub fn build<K, V>(&self, kind: PolicyKind) -> Result<Cache<K, V>, InvalidCapacity>
    where
        K: Clone + Eq + Hash + Send + 'static,
        V: 'static,
    {
        match kind {
            PolicyKind::Lru => Cache::new(self.capacity, LruPolicy::new()),
            PolicyKind::Ttl { ttl } => Cache::new(self.capacity, TtlPolicy::new(ttl)),
            PolicyKind::SlidingWindow { window } => {
                Cache::new(self.capacity, SlidingWindowPolicy::new(window))
            },
            PolicyKind::Lfu => Cache::new(self.capacity, LfuPolicy::new()),
            PolicyKind::Random { seed } => {
                let policy = match seed {
                    Some(seed) => RandomPolicy::with_seed(seed),
                    None => RandomPolicy::new(),
                };
                Cache::new(self.capacity, policy)
            },
        }
    }
}
