//! In-memory key/value cache with per-entry time-to-live.

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::{DateTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use regex::Regex;

use crate::{CacheConfig, CacheError, DEFAULT_TTL};

/// Shared clock handle used to timestamp entries.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    stored_at: DateTime<Utc>,
    ttl: Duration,
}

impl CacheEntry {
    /// An entry is stale once strictly more than its TTL has elapsed.
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let ttl = TimeDelta::from_std(self.ttl).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(self.stored_at) > ttl
    }
}

/// Thread-safe cache mapping string keys to values of any type.
///
/// Every entry carries its own TTL. Expired entries are never returned:
/// [`get`](Self::get) evicts them lazily and [`cleanup`](Self::cleanup)
/// sweeps them in bulk. Values are stored type-erased, so one cache can hold
/// search results next to single places; reading a key with the wrong type is
/// treated as a miss.
///
/// Share a cache between components by wrapping it in an [`Arc`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use lovetrip_cache::TtlCache;
///
/// let cache = TtlCache::new();
/// cache.set("course:1", vec!["cafe", "museum"]);
/// cache.set_with_ttl("weather", 21_u8, Duration::from_secs(60));
///
/// assert_eq!(cache.get::<Vec<&str>>("course:1"), Some(vec!["cafe", "museum"]));
/// assert_eq!(cache.get::<String>("weather"), None);
/// assert_eq!(cache.len(), 2);
/// ```
pub struct TtlCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: SharedClock,
    default_ttl: Duration,
}

impl fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.len())
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TtlCache {
    /// Construct an empty cache using the system clock and [`DEFAULT_TTL`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock), DEFAULT_TTL)
    }

    /// Construct an empty cache from configuration.
    #[must_use]
    pub fn with_config(config: &CacheConfig) -> Self {
        Self::with_clock(Arc::new(DefaultClock), config.default_ttl)
    }

    /// Construct an empty cache reading time from `clock`.
    #[must_use]
    pub fn with_clock(clock: SharedClock, default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            default_ttl,
        }
    }

    /// TTL applied by [`set`](Self::set).
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `value` under `key` with the default TTL.
    ///
    /// An existing entry for `key` is replaced and its TTL restarts.
    pub fn set<T>(&self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Store `value` under `key`, expiring once more than `ttl` has elapsed.
    ///
    /// A zero TTL keeps the entry readable only until the clock moves on.
    pub fn set_with_ttl<T>(&self, key: impl Into<String>, value: T, ttl: Duration)
    where
        T: Any + Send + Sync,
    {
        let entry = CacheEntry {
            value: Arc::new(value),
            stored_at: self.clock.utc(),
            ttl,
        };
        self.entries().insert(key.into(), entry);
    }

    /// Read a clone of the value stored under `key`.
    ///
    /// Returns `None` when the key is absent, expired or holds a value of a
    /// different type. Expired entries are removed as a side effect.
    #[must_use]
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Any + Clone,
    {
        let now = self.clock.utc();
        let mut entries = self.entries();
        let Some(entry) = entries.get(key) else {
            log::debug!("cache miss for {key}");
            return None;
        };
        if entry.is_expired(now) {
            entries.remove(key);
            log::debug!("cache entry {key} expired");
            return None;
        }
        let value = entry.value.downcast_ref::<T>().cloned();
        if value.is_some() {
            log::debug!("cache hit for {key}");
        } else {
            log::debug!("cache entry {key} holds a different type");
        }
        value
    }

    /// Remove `key`, reporting whether an entry was present.
    pub fn delete(&self, key: &str) -> bool {
        self.entries().remove(key).is_some()
    }

    /// Remove every key fully matched by the regular expression `pattern`.
    ///
    /// The pattern is anchored at both ends, so `place:.*` removes
    /// `place:1` but not `my-place:1`. Returns the number of removed keys.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidPattern`] when `pattern` does not
    /// compile; the cache is left untouched.
    ///
    /// # Examples
    /// ```
    /// use lovetrip_cache::TtlCache;
    ///
    /// let cache = TtlCache::new();
    /// cache.set("place-search:seoul:20", 1);
    /// cache.set("place-search:seoul:10", 2);
    /// cache.set("place:1", 3);
    ///
    /// let removed = cache.delete_pattern("place-search:seoul:.*").expect("valid pattern");
    /// assert_eq!(removed, 2);
    /// assert_eq!(cache.get::<i32>("place:1"), Some(3));
    /// assert!(cache.delete_pattern("(").is_err());
    /// ```
    pub fn delete_pattern(&self, pattern: &str) -> Result<usize, CacheError> {
        let invalid = |source| CacheError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        };
        // Validate the raw pattern first so unbalanced groups cannot escape
        // the anchoring wrapper.
        Regex::new(pattern).map_err(invalid)?;
        let matcher = Regex::new(&format!("^(?:{pattern})$")).map_err(invalid)?;
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|key, _| !matcher.is_match(key));
        let removed = before.saturating_sub(entries.len());
        log::debug!("removed {removed} cache entries matching {pattern}");
        Ok(removed)
    }

    /// Remove every expired entry, returning how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = self.clock.utc();
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(entries.len());
        if removed > 0 {
            log::debug!("evicted {removed} expired cache entries");
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Number of stored entries, including expired ones not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the cache holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
