//! evictkit: capacity-bounded cache engine with pluggable eviction policies.
//!
//! One ordered entry store, one strategy trait, five policies (LRU, TTL,
//! sliding-window, LFU, random), a mutex-guarded shared handle, and a
//! memoization adapter on top.

pub mod builder;
pub mod cache;
pub mod clock;
pub mod error;
pub mod memo;
pub mod policy;
pub mod prelude;
pub mod shared;
pub mod store;
