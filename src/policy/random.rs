//! Random replacement eviction policy.
//!
//! Selects a uniformly random victim under capacity pressure and tracks
//! nothing at all between operations. Often used as a baseline: any policy
//! that claims to understand the workload should beat random eviction on a
//! workload with locality.
//!
//! ## Randomness
//!
//! The policy owns its generator state — a XorShift64 word seeded at
//! construction — rather than reaching for global RNG state. That keeps
//! eviction sequences reproducible under a fixed seed (deterministic tests,
//! Miri-friendly, no system-time reads).
//!
//! ## Operations
//!
//! | Hook        | Time | Effect                        |
//! |-------------|------|-------------------------------|
//! | `on_access` | O(1) | nothing                       |
//! | `on_admit`  | O(1) | nothing                       |
//! | `on_insert` | O(n) | nth-in-order victim selection |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::cache::Cache;
//! use evictkit::policy::random::RandomPolicy;
//!
//! let mut cache = Cache::new(3, RandomPolicy::with_seed(7)).unwrap();
//! for i in 0..10 {
//!     cache.put(i, i * 10);
//! }
//!
//! // Exactly one victim per overflowing insert.
//! assert_eq!(cache.len(), 3);
//! ```

use std::hash::Hash;
use std::time::Duration;

use crate::policy::EvictionPolicy;
use crate::store::OrderedStore;

/// Uniform random eviction backed by a policy-owned XorShift64 generator.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng_state: u64,
}

impl RandomPolicy {
    /// Creates the policy with a fixed default seed.
    ///
    /// Eviction is still uniform per step; use [`with_seed`](Self::with_seed)
    /// when a test needs a specific reproducible sequence.
    #[inline]
    pub fn new() -> Self {
        Self::with_seed(0x9e3779b97f4a7c15)
    }

    /// Creates the policy from an explicit seed. A zero seed is remapped,
    /// since XorShift has a zero fixed point.
    #[inline]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng_state: if seed == 0 { 0x9e3779b97f4a7c15 } else { seed },
        }
    }

    /// XorShift64 step.
    #[inline]
    fn next_u64(&mut self) -> u64 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        x
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EvictionPolicy<K, V> for RandomPolicy
where
    K: Clone + Eq + Hash,
{
    fn name(&self) -> &'static str {
        "random"
    }

    /// Access carries no signal for random replacement.
    fn on_access(&mut self, _store: &mut OrderedStore<K, V>, _key: &K, _now: Duration) {}

    fn on_insert(&mut self, store: &mut OrderedStore<K, V>, _now: Duration) {
        let len = store.len();
        if len == 0 {
            return;
        }

        let idx = (self.next_u64() % len as u64) as usize;
        let victim = store.iter().nth(idx).map(|(k, _)| k.clone());
        if let Some(key) = victim {
            store.remove(&key);
        }
    }
}
