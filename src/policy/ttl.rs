//! Time-To-Live eviction policy.
//!
//! Every write stamps its key with a deadline of `write time + ttl`. Reads
//! never extend life; re-inserting a key resets its deadline. An entry is
//! expired the instant its deadline is reached (`now >= deadline`, not
//! strictly after).
//!
//! ## Expiry paths
//!
//! ```text
//!   lazy:      get(k) ── is_expired? ──► facade removes k, reports a miss
//!
//!   eager:     put(new) on a full store ── on_insert ──┐
//!                │  scan order for the first entry     │
//!                │  with now >= deadline, remove it    │
//!                └─ none expired: evict the oldest ────┘
//!                   (insertion order is the only other
//!                    signal a pure TTL policy has)
//! ```
//!
//! The deadline map is auxiliary state owned by the policy; the store's
//! order is never rearranged, so iteration order stays insertion order and
//! the capacity fallback is deterministic.
//!
//! ## Design choice: reads do not refresh
//!
//! A TTL bounds the *staleness* of a value, so only writes move the
//! deadline. Access-extended lifetimes are a different policy —
//! [`SlidingWindowPolicy`](crate::policy::window::SlidingWindowPolicy).
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use evictkit::cache::Cache;
//! use evictkit::clock::ManualClock;
//! use evictkit::policy::ttl::TtlPolicy;
//!
//! let clock = ManualClock::new();
//! let mut cache = Cache::with_clock(
//!     4,
//!     TtlPolicy::new(Duration::from_secs(10)),
//!     clock.clone(),
//! )
//! .unwrap();
//!
//! cache.put("session", 42);
//! clock.advance(Duration::from_secs(9));
//! assert_eq!(cache.get(&"session"), Some(&42));
//!
//! // Expired exactly at the deadline.
//! clock.advance(Duration::from_secs(1));
//! assert_eq!(cache.get(&"session"), None);
//! assert_eq!(cache.len(), 0);
//! ```

use std::hash::Hash;
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::policy::EvictionPolicy;
use crate::store::OrderedStore;

/// Fixed-TTL eviction: entries expire `ttl` after their last write.
///
/// # Type Parameters
///
/// - `K`: key type, `Clone + Eq + Hash`
pub struct TtlPolicy<K>
where
    K: Clone + Eq + Hash,
{
    ttl: Duration,
    deadlines: FxHashMap<K, Duration>,
}

impl<K> TtlPolicy<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates a policy with a fixed TTL applied to every entry.
    #[inline]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            deadlines: FxHashMap::default(),
        }
    }

    /// Returns the configured TTL.
    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[inline]
    fn stamp(&mut self, key: &K, now: Duration) {
        // A TTL near Duration::MAX must clamp, not panic.
        self.deadlines
            .insert(key.clone(), now.saturating_add(self.ttl));
    }
}

impl<K> std::fmt::Debug for TtlPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlPolicy")
            .field("ttl", &self.ttl)
            .field("tracked", &self.deadlines.len())
            .finish()
    }
}

impl<K, V> EvictionPolicy<K, V> for TtlPolicy<K>
where
    K: Clone + Eq + Hash,
{
    fn name(&self) -> &'static str {
        "ttl"
    }

    /// Reads never refresh the deadline and never reorder the store.
    fn on_access(&mut self, _store: &mut OrderedStore<K, V>, _key: &K, _now: Duration) {}

    /// Overwriting a key is a fresh write: its deadline resets to
    /// `now + ttl`.
    fn on_update(&mut self, _store: &mut OrderedStore<K, V>, key: &K, now: Duration) {
        self.stamp(key, now);
    }

    /// Prefers an already-expired victim; falls back to insertion order.
    fn on_insert(&mut self, store: &mut OrderedStore<K, V>, now: Duration) {
        let expired = store
            .iter()
            .find(|(k, _)| {
                self.deadlines
                    .get(k)
                    .is_some_and(|deadline| now >= *deadline)
            })
            .map(|(k, _)| k.clone());

        let victim = match expired {
            Some(key) => Some(key),
            None => store.oldest_key().cloned(),
        };

        if let Some(key) = victim {
            store.remove(&key);
            self.deadlines.remove(&key);
        }
    }

    fn on_admit(&mut self, key: &K, now: Duration) {
        self.stamp(key, now);
    }

    fn is_expired(&self, key: &K, now: Duration) -> bool {
        self.deadlines
            .get(key)
            .is_some_and(|deadline| now >= *deadline)
    }

    fn on_remove(&mut self, key: &K) {
        self.deadlines.remove(key);
    }

    fn on_clear(&mut self) {
        self.deadlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(10);

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn policy_with(
        entries: &[(&'static str, Duration)],
    ) -> (TtlPolicy<&'static str>, OrderedStore<&'static str, i32>) {
        let mut policy = TtlPolicy::new(TTL);
        let mut store = OrderedStore::new();
        for (i, (key, admitted_at)) in entries.iter().enumerate() {
            store.insert(*key, i as i32);
            EvictionPolicy::<_, i32>::on_admit(&mut policy, key, *admitted_at);
        }
        (policy, store)
    }

    // ==============================================
    // Expiry Semantics
    // ==============================================

    mod expiry {
        use super::*;

        #[test]
        fn fresh_entry_is_not_expired() {
            let (policy, _) = policy_with(&[("a", secs(0))]);
            assert!(!EvictionPolicy::<_, i32>::is_expired(&policy, &"a", secs(9)));
        }

        #[test]
        fn entry_expires_exactly_at_deadline() {
            let (policy, _) = policy_with(&[("a", secs(0))]);
            assert!(EvictionPolicy::<_, i32>::is_expired(&policy, &"a", secs(10)));
        }

        #[test]
        fn entry_expired_after_deadline() {
            let (policy, _) = policy_with(&[("a", secs(0))]);
            assert!(EvictionPolicy::<_, i32>::is_expired(&policy, &"a", secs(11)));
        }

        #[test]
        fn untracked_key_never_expires() {
            let (policy, _) = policy_with(&[]);
            assert!(!EvictionPolicy::<_, i32>::is_expired(
                &policy,
                &"ghost",
                secs(1_000)
            ));
        }

        #[test]
        fn read_does_not_refresh_deadline() {
            let (mut policy, mut store) = policy_with(&[("a", secs(0))]);

            policy.on_access(&mut store, &"a", secs(9));

            assert!(EvictionPolicy::<_, i32>::is_expired(&policy, &"a", secs(10)));
        }

        #[test]
        fn overwrite_resets_deadline() {
            let (mut policy, mut store) = policy_with(&[("a", secs(0))]);

            store.insert("a", 99);
            policy.on_update(&mut store, &"a", secs(8));

            assert!(!EvictionPolicy::<_, i32>::is_expired(&policy, &"a", secs(17)));
            assert!(EvictionPolicy::<_, i32>::is_expired(&policy, &"a", secs(18)));
        }
    }

    // ==============================================
    // Eviction Under Capacity Pressure
    // ==============================================

    mod eviction {
        use super::*;

        #[test]
        fn prefers_an_expired_victim() {
            // "b" is long past its deadline even though "a" is older.
            let (mut policy, mut store) = policy_with(&[("a", secs(20)), ("b", secs(0))]);

            policy.on_insert(&mut store, secs(25));

            assert!(!store.contains(&"b"));
            assert!(store.contains(&"a"));
        }

        #[test]
        fn falls_back_to_insertion_order() {
            let (mut policy, mut store) = policy_with(&[("a", secs(0)), ("b", secs(1))]);

            policy.on_insert(&mut store, secs(5));

            assert!(!store.contains(&"a"));
            assert!(store.contains(&"b"));
        }

        #[test]
        fn eviction_drops_deadline_metadata() {
            let (mut policy, mut store) = policy_with(&[("a", secs(0))]);

            policy.on_insert(&mut store, secs(5));

            assert!(store.is_empty());
            assert!(policy.deadlines.is_empty());
        }

        #[test]
        fn removes_exactly_one_entry() {
            // Both expired; on_insert needs to free one slot, not flush.
            let (mut policy, mut store) = policy_with(&[("a", secs(0)), ("b", secs(0))]);

            policy.on_insert(&mut store, secs(30));

            assert_eq!(store.len(), 1);
        }
    }

    // ==============================================
    // Bookkeeping Hooks
    // ==============================================

    mod bookkeeping {
        use super::*;

        #[test]
        fn on_remove_drops_metadata() {
            let (mut policy, _) = policy_with(&[("a", secs(0))]);

            EvictionPolicy::<_, i32>::on_remove(&mut policy, &"a");

            assert!(policy.deadlines.is_empty());
        }

        #[test]
        fn on_clear_resets_all_state() {
            let (mut policy, _) = policy_with(&[("a", secs(0)), ("b", secs(1))]);

            EvictionPolicy::<_, i32>::on_clear(&mut policy);

            assert!(policy.deadlines.is_empty());
        }

        #[test]
        fn ttl_accessor() {
            let policy: TtlPolicy<u64> = TtlPolicy::new(secs(30));
            assert_eq!(policy.ttl(), secs(30));
        }

        #[test]
        fn maximal_ttl_saturates_instead_of_overflowing() {
            let mut policy: TtlPolicy<&str> = TtlPolicy::new(Duration::MAX);

            EvictionPolicy::<_, i32>::on_admit(&mut policy, &"a", secs(1_000_000));

            // Deadline clamps to Duration::MAX; the entry simply never expires.
            assert!(!EvictionPolicy::<_, i32>::is_expired(
                &policy,
                &"a",
                Duration::MAX - secs(1)
            ));
        }
    }
}
