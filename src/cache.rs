//! Capacity-bounded cache facade.
//!
//! [`Cache`] owns exactly one [`OrderedStore`], one boxed
//! [`EvictionPolicy`], and one [`Clock`]; it is the only public mutation
//! surface. Its job is strictly orchestration: enforce the capacity
//! invariant, read the clock once per operation, and invoke the policy
//! hooks at the contractually fixed points. It never reasons about the
//! store's order itself.
//!
//! ## Operation flows
//!
//! ```text
//!   get(k):
//!     now ── absent? ──────────────► miss (no side effects)
//!         ── policy.is_expired? ───► remove + on_remove, miss
//!         ── hit ──────────────────► policy.on_access, return &value
//!
//!   put(k, v):
//!     now ── k present? ───────────► store update + policy.on_update
//!         ── new, store full ──────► policy.on_insert (frees >= 1 slot)
//!         └─ insert ───────────────► policy.on_admit
//! ```
//!
//! `len() <= capacity()` holds immediately after every `put`: eviction
//! happens *before* insertion, never as cleanup after.
//!
//! ## Thread safety
//!
//! `Cache` is a synchronous single-threaded structure; no operation blocks
//! or suspends. For sharing across threads wrap it in
//! [`SharedCache`](crate::shared::SharedCache), which holds one exclusive
//! lock per cache for the duration of each operation.

use std::hash::Hash;

use crate::clock::{Clock, MonotonicClock};
use crate::error::InvalidCapacity;
use crate::policy::EvictionPolicy;
use crate::store::OrderedStore;

/// Capacity-bounded key-value cache with a pluggable eviction policy.
///
/// The policy is injected at construction and fixed for the cache's
/// lifetime. Absence is a first-class result: `get` on a missing (or
/// expired) key returns `None`, never an error.
///
/// # Type Parameters
///
/// - `K`: key type, `Clone + Eq + Hash`
/// - `V`: value type
///
/// # Example
///
/// ```
/// use evictkit::cache::Cache;
/// use evictkit::policy::lru::LruPolicy;
///
/// let mut cache = Cache::new(128, LruPolicy::new()).unwrap();
/// cache.put("k", 1);
///
/// assert_eq!(cache.get(&"k"), Some(&1));
/// assert_eq!(cache.get(&"missing"), None);
/// assert_eq!(cache.len(), 1);
/// ```
pub struct Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    store: OrderedStore<K, V>,
    policy: Box<dyn EvictionPolicy<K, V> + Send>,
    clock: Box<dyn Clock>,
    capacity: usize,
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache with the given capacity and eviction policy, using
    /// the monotonic system clock.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::cache::Cache;
    /// use evictkit::policy::lfu::LfuPolicy;
    ///
    /// let cache: Cache<u64, String> = Cache::new(100, LfuPolicy::new()).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new<P>(capacity: usize, policy: P) -> Result<Self, InvalidCapacity>
    where
        P: EvictionPolicy<K, V> + Send + 'static,
    {
        Self::with_clock(capacity, policy, MonotonicClock::new())
    }

    /// Creates a cache with an explicit clock, for deterministic tests of
    /// the time-based policies.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use evictkit::cache::Cache;
    /// use evictkit::clock::ManualClock;
    /// use evictkit::policy::ttl::TtlPolicy;
    ///
    /// let clock = ManualClock::new();
    /// let mut cache =
    ///     Cache::with_clock(8, TtlPolicy::new(Duration::from_secs(1)), clock.clone()).unwrap();
    ///
    /// cache.put(1, "v");
    /// clock.advance(Duration::from_secs(1));
    /// assert_eq!(cache.get(&1), None);
    /// ```
    pub fn with_clock<P, C>(capacity: usize, policy: P, clock: C) -> Result<Self, InvalidCapacity>
    where
        P: EvictionPolicy<K, V> + Send + 'static,
        C: Clock + 'static,
    {
        if capacity == 0 {
            return Err(InvalidCapacity::new(capacity));
        }
        Ok(Self {
            store: OrderedStore::with_capacity(capacity),
            policy: Box::new(policy),
            clock: Box::new(clock),
            capacity,
        })
    }

    /// Looks up a value. A hit runs the policy's access bookkeeping; a miss
    /// has no side effect beyond lazy removal of an expired entry.
    ///
    /// The clock is read once at the top and that single value drives both
    /// the expiry judgment and the access bookkeeping.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.now();

        if !self.store.contains(key) {
            return None;
        }
        if self.policy.is_expired(key, now) {
            self.store.remove(key);
            self.policy.on_remove(key);
            return None;
        }

        self.policy.on_access(&mut self.store, key, now);
        self.store.get(key)
    }

    /// Inserts or updates a key-value pair.
    ///
    /// Updating an existing key replaces the value and runs the policy's
    /// update bookkeeping (an overwrite counts as a touch; TTL additionally
    /// resets the entry's deadline). A new key on a full store triggers
    /// `on_insert` first, which frees at least one slot before the insert.
    pub fn put(&mut self, key: K, value: V) {
        let now = self.clock.now();

        if self.store.contains(&key) {
            self.store.insert(key.clone(), value);
            self.policy.on_update(&mut self.store, &key, now);
            return;
        }

        if self.store.len() >= self.capacity {
            self.policy.on_insert(&mut self.store, now);
            debug_assert!(
                self.store.len() < self.capacity,
                "policy {} failed to free a slot",
                self.policy.name()
            );
        }

        self.store.insert(key.clone(), value);
        self.policy.on_admit(&key, now);
    }

    /// Existence probe that never counts as an access and never reorders.
    ///
    /// Expired entries report `false`; they are left in place for the next
    /// `get` or capacity-pressured `put` to reap.
    pub fn contains(&self, key: &K) -> bool {
        let now = self.clock.now();
        self.store.contains(key) && !self.policy.is_expired(key, now)
    }

    /// Returns the current number of entries, including any not-yet-reaped
    /// expired entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the immutable maximum capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries and resets the policy's auxiliary state.
    pub fn clear(&mut self) {
        self.store.clear();
        self.policy.on_clear();
    }
}

impl<K, V> std::fmt::Debug for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy.name())
            .field("len", &self.store.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
