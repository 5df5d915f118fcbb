//! Memoization adapter: turn a function into a cached function.
//!
//! [`Memoized`] is the library's sole intended external consumer pattern
//! for the cache core: it owns a [`Cache`], derives a composite key from
//! the call argument, probes `get`, and on a miss invokes the wrapped
//! function and stores the result with `put`. On a hit the function is not
//! invoked at all.
//!
//! The argument type *is* the composite key: bundle positional and named
//! arguments into a tuple or a small struct deriving `Clone + Eq + Hash`
//! and the derivation is deterministic by construction.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::memo::memoize;
//!
//! let mut calls = 0u32;
//! let mut fib = memoize(64, |n: &u64| {
//!     calls += 1;
//!     // Deliberately naive; the cache does the heavy lifting upstream.
//!     (0..*n).fold((0u64, 1u64), |(a, b), _| (b, a + b)).0
//! })
//! .unwrap();
//!
//! assert_eq!(fib.call(30), fib.call(30));
//! assert_eq!(fib.hits(), 1);
//! ```

use std::hash::Hash;

use crate::cache::Cache;
use crate::error::InvalidCapacity;
use crate::policy::lru::LruPolicy;

/// A function wrapped with an argument-keyed result cache.
///
/// # Type Parameters
///
/// - `F`: the wrapped function, `FnMut(&A) -> R`
/// - `A`: argument/key type, `Clone + Eq + Hash`
/// - `R`: result type, `Clone` (hits return clones of the cached value)
pub struct Memoized<F, A, R>
where
    F: FnMut(&A) -> R,
    A: Clone + Eq + Hash,
    R: Clone,
{
    func: F,
    cache: Cache<A, R>,
    hits: u64,
    misses: u64,
}

impl<F, A, R> Memoized<F, A, R>
where
    F: FnMut(&A) -> R,
    A: Clone + Eq + Hash,
    R: Clone,
{
    /// Wraps `func` with an existing cache, allowing any eviction policy.
    pub fn with_cache(func: F, cache: Cache<A, R>) -> Self {
        Self {
            func,
            cache,
            hits: 0,
            misses: 0,
        }
    }

    /// Calls the function through the cache.
    ///
    /// On a hit the wrapped function is not invoked and the cached result
    /// is cloned out; on a miss the function runs once and its result is
    /// stored before being returned.
    pub fn call(&mut self, arg: A) -> R {
        if let Some(cached) = self.cache.get(&arg) {
            self.hits += 1;
            return cached.clone();
        }

        self.misses += 1;
        let result = (self.func)(&arg);
        self.cache.put(arg, result.clone());
        result
    }

    /// Number of calls answered from the cache.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of calls that invoked the wrapped function.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops all cached results and resets the hit/miss counters.
    pub fn invalidate(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Wraps `func` with an LRU-backed result cache of the given capacity.
///
/// # Errors
///
/// Returns [`InvalidCapacity`] if `capacity` is zero.
pub fn memoize<F, A, R>(capacity: usize, func: F) -> Result<Memoized<F, A, R>, InvalidCapacity>
where
    F: FnMut(&A) -> R,
    A: Clone + Eq + Hash,
    R: Clone,
{
    Ok(Memoized::with_cache(func, Cache::new(capacity, LruPolicy::new())?))
}
