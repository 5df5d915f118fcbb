//! Convenience re-exports for the common surface.
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let mut cache = Cache::new(16, LruPolicy::new()).unwrap();
//! cache.put("k", 1);
//! assert_eq!(cache.get(&"k"), Some(&1));
//! ```

pub use crate::builder::{CacheBuilder, PolicyKind};
pub use crate::cache::Cache;
pub use crate::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::error::InvalidCapacity;
pub use crate::memo::{memoize, Memoized};
pub use crate::policy::lfu::LfuPolicy;
pub use crate::policy::lru::LruPolicy;
pub use crate::policy::random::RandomPolicy;
pub use crate::policy::ttl::TtlPolicy;
pub use crate::policy::window::SlidingWindowPolicy;
pub use crate::policy::EvictionPolicy;
pub use crate::shared::SharedCache;
pub use crate::store::OrderedStore;
