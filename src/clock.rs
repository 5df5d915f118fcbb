//! Time sources for the time-based eviction policies.
//!
//! The cache facade reads its clock exactly once at the top of each
//! operation and threads that single value through every policy hook, so a
//! `get` can never judge the same entry fresh and expired within one call.
//! Time is carried as a [`Duration`] offset from the clock's own origin,
//! which keeps timestamps monotonic, cheap to copy, and trivial to fabricate
//! in tests.
//!
//! ## Key Components
//!
//! - [`Clock`]: the read-only time source trait.
//! - [`MonotonicClock`]: production clock anchored to [`Instant::now`] at
//!   construction.
//! - [`ManualClock`]: shared, manually advanced clock for deterministic
//!   expiry tests. Public so downstream crates can drive time in their own
//!   tests without sleeping.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// A monotonic time source.
///
/// Implementations report elapsed time since their own fixed origin. The
/// absolute origin is irrelevant; policies only ever compare offsets and add
/// durations to them.
pub trait Clock: Send + Sync {
    /// Returns the time elapsed since this clock's origin.
    fn now(&self) -> Duration;
}

/// Production clock backed by [`Instant`].
///
/// The origin is captured at construction, so the first reading is close to
/// zero and readings never go backwards.
///
/// # Example
///
/// ```
/// use evictkit::clock::{Clock, MonotonicClock};
///
/// let clock = MonotonicClock::new();
/// let a = clock.now();
/// let b = clock.now();
/// assert!(b >= a);
/// ```
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock anchored at the current instant.
    #[inline]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Cloned handles share the same underlying time, so a test can hand one
/// clone to [`Cache::with_clock`](crate::cache::Cache::with_clock) and keep
/// another to advance time between assertions. Resolution is one
/// millisecond, which is far finer than any realistic TTL or window.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use evictkit::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
///
/// assert_eq!(clock.now(), Duration::ZERO);
/// handle.advance(Duration::from_secs(5));
/// assert_eq!(clock.now(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock starting at time zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `delta`, saturating at the millisecond
    /// counter's maximum rather than wrapping back to zero.
    #[inline]
    pub fn advance(&self, delta: Duration) {
        let delta_ms = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
        let _ = self
            .now_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(delta_ms))
            });
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let mut last = clock.now();
        for _ in 0..100 {
            let next = clock.now();
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn manual_clock_starts_at_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn manual_clock_advances_by_requested_delta() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_millis(250));
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_millis(1250));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(3));
    }

    #[test]
    fn manual_clock_saturates_instead_of_wrapping() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_millis(5));

        // Advancing past the counter's maximum must pin time at the top,
        // never wrap it back below where it was.
        clock.advance(Duration::MAX);
        let pinned = clock.now();
        assert!(pinned >= Duration::from_millis(5));

        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), pinned);
    }

    #[test]
    fn clocks_are_object_safe() {
        let boxed: Box<dyn Clock> = Box::new(ManualClock::new());
        assert_eq!(boxed.now(), Duration::ZERO);
    }
}
