//! Sliding-window (idle-timeout) eviction policy.
//!
//! Each entry carries a last-touched stamp refreshed on every `put` and
//! every `get` hit; an entry is stale once it has been idle for the full
//! window (`now - last_touched >= window`). Unlike [`TtlPolicy`], access
//! extends life — a key touched at least once per window never expires.
//!
//! ## Expiry paths
//!
//! ```text
//!   lazy:   get(k) ── is_expired? ──► facade removes k, reports a miss
//!
//!   eager:  put(new) on a full store ── on_insert:
//!             1. purge every entry idle >= window   (explicit scan,
//!                no background timer)
//!             2. nothing purged? evict the entry with the smallest
//!                last-touched stamp (LRU by timestamp)
//! ```
//!
//! The purge scan runs only inside `on_insert`, keeping the core
//! single-threaded and deterministic: idle entries linger until the next
//! lookup touches them (lazy path) or the next insert needs room (eager
//! path).
//!
//! [`TtlPolicy`]: crate::policy::ttl::TtlPolicy
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use evictkit::cache::Cache;
//! use evictkit::clock::ManualClock;
//! use evictkit::policy::window::SlidingWindowPolicy;
//!
//! let clock = ManualClock::new();
//! let mut cache = Cache::with_clock(
//!     4,
//!     SlidingWindowPolicy::new(Duration::from_secs(10)),
//!     clock.clone(),
//! )
//! .unwrap();
//!
//! cache.put("conn", 1);
//!
//! // Touching every half-window keeps the entry alive indefinitely.
//! for _ in 0..8 {
//!     clock.advance(Duration::from_secs(5));
//!     assert_eq!(cache.get(&"conn"), Some(&1));
//! }
//!
//! // A full window of silence expires it.
//! clock.advance(Duration::from_secs(10));
//! assert_eq!(cache.get(&"conn"), None);
//! ```

use std::hash::Hash;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::policy::EvictionPolicy;
use crate::store::OrderedStore;

/// Sliding-window eviction: entries expire after a full window of idleness,
/// and every touch restarts the window.
///
/// # Type Parameters
///
/// - `K`: key type, `Clone + Eq + Hash`
pub struct SlidingWindowPolicy<K>
where
    K: Clone + Eq + Hash,
{
    window: Duration,
    last_touched: FxHashMap<K, Duration>,
}

impl<K> SlidingWindowPolicy<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates a policy with a fixed idle window.
    #[inline]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_touched: FxHashMap::default(),
        }
    }

    /// Returns the configured window.
    #[inline]
    pub fn window(&self) -> Duration {
        self.window
    }

    #[inline]
    fn touch(&mut self, key: &K, now: Duration) {
        self.last_touched.insert(key.clone(), now);
    }

    #[inline]
    fn idle_expired(&self, stamp: Duration, now: Duration) -> bool {
        now.saturating_sub(stamp) >= self.window
    }

    /// Removes every entry idle for a full window. Returns how many were
    /// purged.
    fn purge_expired<V>(&mut self, store: &mut OrderedStore<K, V>, now: Duration) -> usize {
        let stale: Vec<K> = store
            .iter()
            .filter(|(k, _)| {
                self.last_touched
                    .get(k)
                    .is_some_and(|stamp| self.idle_expired(*stamp, now))
            })
            .map(|(k, _)| k.clone())
            .collect();

        for key in &stale {
            store.remove(key);
            self.last_touched.remove(key);
        }
        stale.len()
    }
}

impl<K> std::fmt::Debug for SlidingWindowPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlidingWindowPolicy")
            .field("window", &self.window)
            .field("tracked", &self.last_touched.len())
            .finish()
    }
}

impl<K, V> EvictionPolicy<K, V> for SlidingWindowPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn name(&self) -> &'static str {
        "sliding-window"
    }

    /// Every hit restarts the entry's idle window.
    fn on_access(&mut self, _store: &mut OrderedStore<K, V>, key: &K, now: Duration) {
        self.touch(key, now);
    }

    /// Purges idle entries first; if none were idle, evicts the entry left
    /// untouched the longest.
    fn on_insert(&mut self, store: &mut OrderedStore<K, V>, now: Duration) {
        if self.purge_expired(store, now) > 0 {
            return;
        }

        let victim = store
            .iter()
            .filter_map(|(k, _)| self.last_touched.get(k).map(|stamp| (k.clone(), *stamp)))
            .min_by_key(|(_, stamp)| *stamp)
            .map(|(k, _)| k);

        // Entries missing a stamp cannot happen through the facade, but a
        // victim must still be found for the hook to uphold its contract.
        let victim = victim.or_else(|| store.oldest_key().cloned());

        if let Some(key) = victim {
            store.remove(&key);
            self.last_touched.remove(&key);
        }
    }

    fn on_admit(&mut self, key: &K, now: Duration) {
        self.touch(key, now);
    }

    fn is_expired(&self, key: &K, now: Duration) -> bool {
        self.last_touched
            .get(key)
            .is_some_and(|stamp| self.idle_expired(*stamp, now))
    }

    fn on_remove(&mut self, key: &K) {
        self.last_touched.remove(key);
    }

    fn on_clear(&mut self) {
        self.last_touched.clear();
    }
}
