//! Least-Recently-Used eviction policy.
//!
//! The classic recency policy: every hit moves the touched key to the back
//! of the store's order, so the front is always the least recently used
//! entry and eviction is a single `oldest_key()` lookup.
//!
//! ## Architecture
//!
//! ```text
//!   store order:   front ──────────────────────────► back
//!                  [ least recent ]  ...  [ most recent ]
//!
//!   get(k) hit:    move k to back        (on_access)
//!   put(k) update: move k to back        (on_update = on_access)
//!   put(new) full: evict front entry     (on_insert)
//! ```
//!
//! LRU carries no metadata of its own — recency is encoded purely by
//! position in the store's order, which makes every hook O(1).
//!
//! ## Operations
//!
//! | Hook        | Time | Effect                          |
//! |-------------|------|---------------------------------|
//! | `on_access` | O(1) | `move_to_back(key)`             |
//! | `on_insert` | O(1) | remove `oldest_key()`           |
//! | `on_admit`  | O(1) | nothing (store appends at back) |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::cache::Cache;
//! use evictkit::policy::lru::LruPolicy;
//!
//! let mut cache = Cache::new(2, LruPolicy::new()).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//!
//! // Touch "a" so "b" becomes the eviction candidate.
//! cache.get(&"a");
//! cache.put("c", 3);
//!
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.get(&"a"), Some(&1));
//! assert_eq!(cache.get(&"c"), Some(&3));
//! ```

use std::hash::Hash;
use std::time::Duration;

use crate::policy::EvictionPolicy;
use crate::store::OrderedStore;

/// Least-Recently-Used eviction: hits refresh recency, the coldest entry is
/// the victim.
///
/// With capacity 1 every insert of a new key evicts the sole existing entry,
/// which is correct LRU behavior rather than an edge case to defend against.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruPolicy;

impl LruPolicy {
    /// Creates the policy. Stateless; all bookkeeping lives in the store's
    /// order.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<K, V> EvictionPolicy<K, V> for LruPolicy
where
    K: Clone + Eq + Hash,
{
    fn name(&self) -> &'static str {
        "lru"
    }

    fn on_access(&mut self, store: &mut OrderedStore<K, V>, key: &K, _now: Duration) {
        store.move_to_back(key);
    }

    fn on_insert(&mut self, store: &mut OrderedStore<K, V>, _now: Duration) {
        if let Some(victim) = store.oldest_key().cloned() {
            store.remove(&victim);
        }
    }
}
