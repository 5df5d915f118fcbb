//! Thread-safe shared handle over a [`Cache`].
//!
//! The cache core is single-threaded by design: reordering on access and
//! capacity-triggered eviction touch the store and the policy's auxiliary
//! state as one unit, and that unit cannot be decomposed into finer locks
//! without racing (two `get`s bumping the same LFU counter, two `put`s both
//! electing victims). [`SharedCache`] therefore takes the simplest correct
//! shape: one `parking_lot::Mutex` per cache instance, acquired at the top
//! of every operation and released on every exit path by guard scope.
//!
//! `get` clones the value out rather than handing references across the
//! lock, keeping hold times short.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lru::LruPolicy;
//! use evictkit::shared::SharedCache;
//!
//! let cache = SharedCache::new(100, LruPolicy::new()).unwrap();
//!
//! let handle = cache.clone();
//! std::thread::spawn(move || {
//!     handle.put(1, "from another thread");
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(cache.get(&1), Some("from another thread"));
//! ```

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::Cache;
use crate::clock::Clock;
use crate::error::InvalidCapacity;
use crate::policy::EvictionPolicy;

/// Cloneable, thread-safe handle to a [`Cache`].
///
/// All clones address the same underlying cache; dropping the last clone
/// drops the cache. Requires `V: Clone` so `get` can release the lock
/// before returning.
pub struct SharedCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    inner: Arc<Mutex<Cache<K, V>>>,
}

impl<K, V> SharedCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Creates a shared cache with the given capacity and policy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if `capacity` is zero.
    pub fn new<P>(capacity: usize, policy: P) -> Result<Self, InvalidCapacity>
    where
        P: EvictionPolicy<K, V> + Send + 'static,
    {
        Ok(Self::from_cache(Cache::new(capacity, policy)?))
    }

    /// Creates a shared cache with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if `capacity` is zero.
    pub fn with_clock<P, C>(capacity: usize, policy: P, clock: C) -> Result<Self, InvalidCapacity>
    where
        P: EvictionPolicy<K, V> + Send + 'static,
        C: Clock + 'static,
    {
        Ok(Self::from_cache(Cache::with_clock(capacity, policy, clock)?))
    }

    /// Wraps an already-constructed cache.
    pub fn from_cache(cache: Cache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Looks up a value, cloning it out under the lock.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Inserts or updates a key-value pair.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Existence probe; never counts as an access.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Removes all entries and resets policy state.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Current entry count.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// The immutable maximum capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }
}

impl<K, V> Clone for SharedCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> std::fmt::Debug for SharedCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCache")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
