//! Least-Frequently-Used eviction policy.
//!
//! Each entry carries an access count: 1 on first insert, +1 on every
//! subsequent hit (and on every overwrite, which counts as an access). Under
//! capacity pressure the entry with the smallest count is evicted.
//!
//! ## Tie-break
//!
//! Multiple entries routinely share the minimum count, so the tie-break must
//! be fixed for eviction to be deterministic and testable: among tied
//! entries the one earliest in store order loses. LFU never reorders the
//! store, so store order *is* insertion order and the rule reads
//! "oldest-inserted-first".
//!
//! ## New entries are not protected
//!
//! A freshly admitted entry starts at count 1, which can make it the
//! immediate victim under heavy insert pressure when every resident entry
//! has count > 1. That is correct LFU behavior, not a defect to
//! special-case.
//!
//! ## Operations
//!
//! | Hook        | Time | Effect                                   |
//! |-------------|------|------------------------------------------|
//! | `on_access` | O(1) | increment counter                        |
//! | `on_admit`  | O(1) | counter := 1                             |
//! | `on_insert` | O(n) | min-count scan, first-in-order tie-break |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::cache::Cache;
//! use evictkit::policy::lfu::LfuPolicy;
//!
//! let mut cache = Cache::new(2, LfuPolicy::new()).unwrap();
//! cache.put("hot", 1);
//! cache.put("cold", 2);
//!
//! cache.get(&"hot");
//! cache.get(&"hot");
//!
//! // "cold" has the smaller count and is evicted.
//! cache.put("new", 3);
//! assert_eq!(cache.get(&"cold"), None);
//! assert_eq!(cache.get(&"hot"), Some(&1));
//! ```

use std::hash::Hash;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::policy::EvictionPolicy;
use crate::store::OrderedStore;

/// Least-Frequently-Used eviction with deterministic oldest-first tie-break.
///
/// # Type Parameters
///
/// - `K`: key type, `Clone + Eq + Hash`
pub struct LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    counts: FxHashMap<K, u64>,
}

impl<K> LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates the policy with no tracked entries.
    #[inline]
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }

    /// Returns the access count recorded for `key`, if tracked.
    #[inline]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.counts.get(key).copied()
    }
}

impl<K> Default for LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> std::fmt::Debug for LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LfuPolicy")
            .field("tracked", &self.counts.len())
            .finish()
    }
}

impl<K, V> EvictionPolicy<K, V> for LfuPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn name(&self) -> &'static str {
        "lfu"
    }

    fn on_access(&mut self, _store: &mut OrderedStore<K, V>, key: &K, _now: Duration) {
        if let Some(count) = self.counts.get_mut(key) {
            *count = count.saturating_add(1);
        }
    }

    /// Scans for the minimum count; `<` (not `<=`) keeps the first entry in
    /// store order as the winner among ties.
    fn on_insert(&mut self, store: &mut OrderedStore<K, V>, _now: Duration) {
        let mut victim: Option<(K, u64)> = None;
        for (key, _) in store.iter() {
            let count = self.counts.get(key).copied().unwrap_or(0);
            match &victim {
                Some((_, best)) if *best <= count => {},
                _ => victim = Some((key.clone(), count)),
            }
        }

        if let Some((key, _)) = victim {
            store.remove(&key);
            self.counts.remove(&key);
        }
    }

    fn on_admit(&mut self, key: &K, _now: Duration) {
        self.counts.insert(key.clone(), 1);
    }

    fn on_remove(&mut self, key: &K) {
        self.counts.remove(key);
    }

    fn on_clear(&mut self) {
        self.counts.clear();
    }
}
