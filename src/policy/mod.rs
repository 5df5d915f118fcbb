//! Eviction policies and the strategy trait the cache facade drives.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──────────────────────────────────────────┐
//!                  │         EvictionPolicy<K, V>             │
//!                  │                                          │
//!                  │  on_access(store, &K, now)   hit         │
//!                  │  on_update(store, &K, now)   overwrite   │
//!                  │  on_insert(store, now)       full store  │
//!                  │  on_admit(&K, now)           fresh key   │
//!                  │  is_expired(&K, now)         lazy check  │
//!                  │  on_remove(&K) / on_clear()  bookkeeping │
//!                  └───────────────────┬──────────────────────┘
//!                                      │
//!        ┌──────────┬─────────────┬────┴─────────┬──────────────┐
//!        ▼          ▼             ▼              ▼              ▼
//!    LruPolicy  TtlPolicy  SlidingWindowPolicy  LfuPolicy  RandomPolicy
//!    (order)    (deadline)  (last-touched)      (counters)  (xorshift)
//! ```
//!
//! The facade owns one policy as a boxed trait object and calls the hooks at
//! fixed points; the policy owns all eviction-relevant metadata and is the
//! only component allowed to remove entries from a full store.
//!
//! ## Hook Contract
//!
//! | Hook         | Called when                                  | May remove entries |
//! |--------------|----------------------------------------------|--------------------|
//! | `on_access`  | after a confirmed, unexpired hit             | no                 |
//! | `on_update`  | `put` on an existing key                     | no                 |
//! | `on_insert`  | new key arrives and the store is at capacity | must (at least 1)  |
//! | `on_admit`   | new key stored below capacity                | no                 |
//! | `is_expired` | before a lookup is treated as a hit          | no (facade does)   |
//! | `on_remove`  | facade removed an entry outside `on_insert`  | no                 |
//! | `on_clear`   | facade cleared the store                     | no                 |
//!
//! `on_update` defaults to `on_access`: overwriting a key counts as touching
//! it. [`TtlPolicy`](ttl::TtlPolicy) overrides the default because for TTL a
//! re-insert resets the deadline while a plain read never does.

pub mod lfu;
pub mod lru;
pub mod random;
pub mod ttl;
pub mod window;

use std::hash::Hash;
use std::time::Duration;

use crate::store::OrderedStore;

/// Strategy trait encapsulating all policy-specific eviction behavior.
///
/// Implementations must be total over any non-empty store: when the facade
/// calls [`on_insert`](Self::on_insert) the store holds at least one entry
/// (capacity is validated at construction), so a victim always exists.
///
/// The trait is object-safe; the facade stores `Box<dyn EvictionPolicy>`.
pub trait EvictionPolicy<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Short policy name, used in `Debug` output.
    fn name(&self) -> &'static str;

    /// Called after a successful, unexpired `get` hit. May reorder the
    /// store or update per-entry metadata; must not remove entries.
    fn on_access(&mut self, store: &mut OrderedStore<K, V>, key: &K, now: Duration);

    /// Called when `put` overwrites an existing key, after the value has
    /// been replaced. Defaults to [`on_access`](Self::on_access) semantics:
    /// an overwrite is a touch.
    fn on_update(&mut self, store: &mut OrderedStore<K, V>, key: &K, now: Duration) {
        self.on_access(store, key, now);
    }

    /// Called immediately before a new key is inserted into a store at
    /// capacity. Must remove at least one entry (policies with an expiry
    /// notion may purge several) and keep any auxiliary metadata for the
    /// removed keys consistent.
    fn on_insert(&mut self, store: &mut OrderedStore<K, V>, now: Duration);

    /// Called after a fresh key has been inserted. Initializes per-entry
    /// metadata (frequency counters, deadlines, touch stamps).
    fn on_admit(&mut self, _key: &K, _now: Duration) {}

    /// Lazy-expiry probe, checked by the facade before a lookup becomes a
    /// hit. The default never expires anything.
    fn is_expired(&self, _key: &K, _now: Duration) -> bool {
        false
    }

    /// The facade removed `key` outside of [`on_insert`](Self::on_insert)
    /// (lazy expiry). Drop any metadata held for it.
    fn on_remove(&mut self, _key: &K) {}

    /// The facade cleared the store. Reset all auxiliary state.
    fn on_clear(&mut self) {}
}
