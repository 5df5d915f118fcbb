//! Entry storage for the cache facade.
//!
//! The store owns key/value pairs and an observable order; policies own the
//! meaning of that order plus any per-entry metadata. Keeping those concerns
//! apart is what lets one store implementation serve recency-, time-,
//! frequency-, and randomness-based eviction unchanged.

mod ordered;

pub use ordered::{Iter, OrderedStore};
