//! Deterministic clock for exercising expiry in tests.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock that only moves when told to.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use lovetrip_cache::{TtlCache, test_support::ManualClock};
///
/// let clock = Arc::new(ManualClock::default());
/// let cache = TtlCache::with_clock(clock.clone(), Duration::from_secs(10));
/// cache.set("key", 1_u8);
/// clock.advance(Duration::from_secs(11));
/// assert_eq!(cache.get::<u8>("key"), None);
/// ```
#[derive(Debug)]
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl ManualClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `delta`.
    ///
    /// Steps that would overflow the representable range leave the clock
    /// where it is.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.lock_clock();
        let next = TimeDelta::from_std(delta)
            .ok()
            .and_then(|step| now.checked_add_signed(step));
        if let Some(next) = next {
            *now = next;
        }
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
