//! Cache tuning knobs and their defaults.

use std::time::Duration;

/// Lifetime applied by [`TtlCache::set`](crate::TtlCache::set).
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Period between sweeps started by [`spawn_sweeper`](crate::spawn_sweeper).
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Configuration for [`TtlCache`](crate::TtlCache) and its sweeper.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use lovetrip_cache::{CacheConfig, DEFAULT_TTL};
///
/// let config = CacheConfig::default();
/// assert_eq!(config.default_ttl, DEFAULT_TTL);
///
/// let short = CacheConfig {
///     default_ttl: Duration::from_secs(30),
///     ..CacheConfig::default()
/// };
/// assert_eq!(short.default_ttl.as_secs(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Lifetime of entries stored without an explicit TTL.
    pub default_ttl: Duration,
    /// Period between sweeps started by
    /// [`spawn_sweeper_with_config`](crate::spawn_sweeper_with_config).
    pub cleanup_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}
