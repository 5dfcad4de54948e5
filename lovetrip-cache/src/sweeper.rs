//! Background task that periodically evicts expired entries.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};

use crate::{CacheConfig, CacheError, TtlCache};

/// Shortest period the sweeper will tick at.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Longest period the sweeper will tick at; longer ones would overflow the
/// timer's deadline arithmetic.
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Handle to a running sweeper.
///
/// The sweeper stops when the handle is stopped or dropped, or once the
/// cache it watches has been dropped.
#[derive(Debug)]
pub struct SweeperHandle {
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper.
    pub fn stop(self) {
        drop(self);
    }

    /// Whether the background task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run [`TtlCache::cleanup`] every `interval` on the current Tokio runtime.
///
/// The first sweep happens one full interval after spawning. The task only
/// holds a weak reference, so it never keeps the cache alive. The interval
/// is clamped between one millisecond and one year.
///
/// # Errors
/// Returns [`CacheError::NoRuntime`] when called outside a Tokio runtime.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use lovetrip_cache::{DEFAULT_CLEANUP_INTERVAL, TtlCache, spawn_sweeper};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), lovetrip_cache::CacheError> {
/// let cache = Arc::new(TtlCache::new());
/// let sweeper = spawn_sweeper(&cache, DEFAULT_CLEANUP_INTERVAL)?;
/// cache.set("key", 1_u8);
/// sweeper.stop();
/// # Ok(())
/// # }
/// ```
pub fn spawn_sweeper(
    cache: &Arc<TtlCache>,
    interval: Duration,
) -> Result<SweeperHandle, CacheError> {
    let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
    let period = interval.clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL);
    let weak = Arc::downgrade(cache);
    let task = runtime.spawn(sweep(weak, period));
    log::debug!("started cache sweeper every {period:?}");
    Ok(SweeperHandle { task })
}

/// Run [`TtlCache::cleanup`] every [`CacheConfig::cleanup_interval`].
///
/// # Errors
/// Returns [`CacheError::NoRuntime`] when called outside a Tokio runtime.
pub fn spawn_sweeper_with_config(
    cache: &Arc<TtlCache>,
    config: &CacheConfig,
) -> Result<SweeperHandle, CacheError> {
    spawn_sweeper(cache, config.cleanup_interval)
}

async fn sweep(cache: Weak<TtlCache>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let Some(live) = cache.upgrade() else {
            log::debug!("cache dropped; stopping sweeper");
            break;
        };
        live.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ManualClock;
    use rstest::rstest;

    const TTL: Duration = Duration::from_secs(60);
    const SWEEP: Duration = Duration::from_secs(300);

    fn expired_cache() -> (Arc<TtlCache>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let cache = Arc::new(TtlCache::with_clock(clock.clone(), TTL));
        cache.set("stale", 1_u8);
        clock.advance(TTL + Duration::from_secs(1));
        (cache, clock)
    }

    #[rstest]
    fn spawning_outside_a_runtime_fails() {
        let cache = Arc::new(TtlCache::new());
        let err = spawn_sweeper(&cache, SWEEP).expect_err("no runtime");
        assert!(matches!(err, CacheError::NoRuntime));
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_evicts_after_one_interval() {
        let (cache, _clock) = expired_cache();
        let _sweeper = spawn_sweeper(&cache, SWEEP).expect("runtime is running");

        tokio::time::sleep(SWEEP / 2).await;
        assert_eq!(cache.len(), 1, "no sweep before the first interval");

        tokio::time::sleep(SWEEP).await;
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_sweeper_no_longer_evicts() {
        let (cache, _clock) = expired_cache();
        let sweeper = spawn_sweeper(&cache, SWEEP).expect("runtime is running");
        sweeper.stop();

        tokio::time::sleep(SWEEP * 3).await;
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_exits_when_cache_is_dropped() {
        let (cache, _clock) = expired_cache();
        let sweeper = spawn_sweeper(&cache, SWEEP).expect("runtime is running");
        drop(cache);

        tokio::time::sleep(SWEEP * 2).await;
        assert!(sweeper.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_is_clamped() {
        let (cache, _clock) = expired_cache();
        let _sweeper = spawn_sweeper(&cache, Duration::ZERO).expect("runtime is running");
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn huge_interval_keeps_the_sweeper_alive() {
        let (cache, _clock) = expired_cache();
        let sweeper = spawn_sweeper(&cache, Duration::MAX).expect("runtime is running");
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!sweeper.is_finished());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn configured_interval_drives_eviction() {
        let (cache, _clock) = expired_cache();
        let config = CacheConfig {
            cleanup_interval: Duration::from_secs(10),
            ..CacheConfig::default()
        };
        let _sweeper = spawn_sweeper_with_config(&cache, &config).expect("runtime is running");

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(cache.len(), 1, "no sweep before the configured interval");

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(cache.len(), 0);
    }
}
