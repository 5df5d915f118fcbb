// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Tests that verify library-wide behavioral consistency across all eviction
// policies. These span multiple modules and belong here rather than in any
// single source file.

use std::time::Duration;

use proptest::prelude::*;

use evictkit::builder::{CacheBuilder, PolicyKind};
use evictkit::cache::Cache;
use evictkit::clock::ManualClock;
use evictkit::policy::lfu::LfuPolicy;
use evictkit::policy::lru::LruPolicy;
use evictkit::policy::ttl::TtlPolicy;
use evictkit::policy::window::SlidingWindowPolicy;

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn all_kinds() -> Vec<PolicyKind> {
    vec![
        PolicyKind::Lru,
        PolicyKind::Ttl { ttl: secs(3600) },
        PolicyKind::SlidingWindow { window: secs(3600) },
        PolicyKind::Lfu,
        PolicyKind::Random { seed: Some(0xC0FFEE) },
    ]
}

// ==============================================
// Construction
// ==============================================

mod construction {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected_by_every_policy() {
        for kind in all_kinds() {
            let result = CacheBuilder::new(0).build::<u64, u64>(kind.clone());
            assert!(result.is_err(), "capacity 0 must fail for {:?}", kind);
        }
    }

    #[test]
    fn capacity_one_is_accepted_by_every_policy() {
        for kind in all_kinds() {
            let cache = CacheBuilder::new(1).build::<u64, u64>(kind.clone()).unwrap();
            assert_eq!(cache.capacity(), 1, "capacity mismatch for {:?}", kind);
        }
    }
}

// ==============================================
// Shared Behavioral Contract
// ==============================================

mod shared_contract {
    use super::*;

    #[test]
    fn round_trip_holds_for_every_policy() {
        for kind in all_kinds() {
            let mut cache = CacheBuilder::new(8).build::<u64, u64>(kind.clone()).unwrap();
            cache.put(1, 100);
            assert_eq!(cache.get(&1), Some(&100), "round trip failed for {:?}", kind);
        }
    }

    #[test]
    fn missing_key_is_a_miss_for_every_policy() {
        for kind in all_kinds() {
            let mut cache = CacheBuilder::new(8).build::<u64, u64>(kind.clone()).unwrap();
            assert_eq!(cache.get(&42), None, "phantom hit for {:?}", kind);
        }
    }

    #[test]
    fn clear_is_idempotent_for_every_policy() {
        for kind in all_kinds() {
            let mut cache = CacheBuilder::new(8).build::<u64, u64>(kind.clone()).unwrap();
            for i in 0..8 {
                cache.put(i, i);
            }

            cache.clear();
            assert_eq!(cache.len(), 0, "first clear failed for {:?}", kind);
            cache.clear();
            assert_eq!(cache.len(), 0, "second clear failed for {:?}", kind);
            assert_eq!(cache.get(&0), None, "stale hit after clear for {:?}", kind);
        }
    }

    #[test]
    fn overflow_evicts_exactly_one_for_every_policy() {
        for kind in all_kinds() {
            let mut cache = CacheBuilder::new(5).build::<u64, u64>(kind.clone()).unwrap();
            for i in 0..5 {
                cache.put(i, i);
            }

            cache.put(99, 99);

            assert_eq!(cache.len(), 5, "wrong size after overflow for {:?}", kind);
            let prior_survivors = (0..5).filter(|i| cache.contains(i)).count();
            assert_eq!(prior_survivors, 4, "wrong survivor count for {:?}", kind);
            assert!(cache.contains(&99), "new key missing for {:?}", kind);
        }
    }
}

// ==============================================
// Capacity Invariant (property-based)
// ==============================================
//
// For all sequences of puts and gets, len() <= capacity holds after every
// operation, under every policy.

#[derive(Debug, Clone)]
enum Op {
    Put(u8, u16),
    Get(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
        any::<u8>().prop_map(Op::Get),
    ]
}

fn run_ops(cache: &mut Cache<u8, u16>, ops: &[Op]) {
    let capacity = cache.capacity();
    for op in ops {
        match op {
            Op::Put(k, v) => {
                cache.put(*k, *v);
            },
            Op::Get(k) => {
                cache.get(k);
            },
        }
        assert!(cache.len() <= capacity);
    }
}

proptest! {
    #[test]
    fn capacity_invariant_lru(ops in prop::collection::vec(op_strategy(), 1..200), cap in 1usize..16) {
        let mut cache = Cache::new(cap, LruPolicy::new()).unwrap();
        run_ops(&mut cache, &ops);
    }

    #[test]
    fn capacity_invariant_lfu(ops in prop::collection::vec(op_strategy(), 1..200), cap in 1usize..16) {
        let mut cache = Cache::new(cap, LfuPolicy::new()).unwrap();
        run_ops(&mut cache, &ops);
    }

    #[test]
    fn capacity_invariant_ttl(ops in prop::collection::vec(op_strategy(), 1..200), cap in 1usize..16) {
        let mut cache = Cache::new(cap, TtlPolicy::new(secs(60))).unwrap();
        run_ops(&mut cache, &ops);
    }

    #[test]
    fn capacity_invariant_window(ops in prop::collection::vec(op_strategy(), 1..200), cap in 1usize..16) {
        let mut cache = Cache::new(cap, SlidingWindowPolicy::new(secs(60))).unwrap();
        run_ops(&mut cache, &ops);
    }

    #[test]
    fn capacity_invariant_random(
        ops in prop::collection::vec(op_strategy(), 1..200),
        cap in 1usize..16,
        seed in any::<u64>(),
    ) {
        let mut cache = Cache::new(
            cap,
            evictkit::policy::random::RandomPolicy::with_seed(seed),
        )
        .unwrap();
        run_ops(&mut cache, &ops);
    }

    // Put followed immediately by get always round-trips, any policy state.
    #[test]
    fn put_then_get_round_trips_lru(
        ops in prop::collection::vec(op_strategy(), 0..100),
        k in any::<u8>(),
        v in any::<u16>(),
    ) {
        let mut cache = Cache::new(8, LruPolicy::new()).unwrap();
        run_ops(&mut cache, &ops);
        cache.put(k, v);
        prop_assert_eq!(cache.get(&k), Some(&v));
    }
}

// ==============================================
// Time-Based Policy Boundaries
// ==============================================

mod time_boundaries {
    use super::*;

    #[test]
    fn ttl_hit_strictly_before_deadline_miss_at_deadline() {
        for advance_by in [secs(9), secs(10), secs(11)] {
            let clock = ManualClock::new();
            let mut cache =
                Cache::with_clock(4, TtlPolicy::new(secs(10)), clock.clone()).unwrap();

            cache.put("k", 1);
            clock.advance(advance_by);

            if advance_by < secs(10) {
                assert_eq!(cache.get(&"k"), Some(&1));
            } else {
                assert_eq!(cache.get(&"k"), None);
            }
        }
    }

    #[test]
    fn window_entry_touched_every_half_window_never_expires() {
        let clock = ManualClock::new();
        let mut cache =
            Cache::with_clock(4, SlidingWindowPolicy::new(secs(10)), clock.clone()).unwrap();

        cache.put("k", 1);
        for _ in 0..100 {
            clock.advance(secs(5));
            assert_eq!(cache.get(&"k"), Some(&1));
        }
    }

    #[test]
    fn window_idle_entry_purged_under_capacity_pressure() {
        let clock = ManualClock::new();
        let mut cache =
            Cache::with_clock(2, SlidingWindowPolicy::new(secs(10)), clock.clone()).unwrap();

        cache.put("idle", 1);
        clock.advance(secs(1));
        cache.put("busy", 2);
        clock.advance(secs(9));
        cache.get(&"busy");

        // "idle" is a full window old; the insert purges it specifically.
        cache.put("new", 3);

        assert_eq!(cache.get(&"idle"), None);
        assert_eq!(cache.get(&"busy"), Some(&2));
        assert_eq!(cache.get(&"new"), Some(&3));
    }
}

// ==============================================
// LFU Determinism
// ==============================================

mod lfu_determinism {
    use super::*;

    #[test]
    fn smallest_count_is_always_the_victim() {
        let mut cache = Cache::new(3, LfuPolicy::new()).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"c");

        // counts: a=3, b=1, c=2
        cache.put("d", 4);

        assert_eq!(cache.get(&"b"), None);
        assert!(cache.contains(&"a"));
        assert!(cache.contains(&"c"));
        assert!(cache.contains(&"d"));
    }

    #[test]
    fn repeated_insert_pressure_churns_count_one_entries() {
        let mut cache = Cache::new(2, LfuPolicy::new()).unwrap();
        let pinned = -1;
        cache.put(pinned, 0);
        cache.get(&pinned); // count 2

        // Every newcomer lands at count 1 and is the next victim.
        for i in 0..20 {
            cache.put(i, i);
            assert!(cache.contains(&pinned));
        }
    }
}
