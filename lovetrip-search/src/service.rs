//! Cache-first hybrid place search.

use std::{collections::HashSet, sync::Arc, time::Duration};

use lovetrip_cache::{CacheError, TtlCache};
use lovetrip_core::{Place, PlaceStore};

use crate::SearchProvider;

/// Lifetime of cached search results and place lookups.
pub const SEARCH_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Result count used when a search does not ask for one.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Result count used by [`PlaceSearchService::popular_places`] callers that
/// have no preference.
pub const DEFAULT_POPULAR_LIMIT: usize = 50;

/// Configuration for [`PlaceSearchService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Limit applied when [`SearchOptions::limit`] is unset or zero.
    pub default_limit: usize,
    /// Lifetime of cached results.
    pub cache_ttl: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_SEARCH_LIMIT,
            cache_ttl: SEARCH_CACHE_TTL,
        }
    }
}

/// Per-call search options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of places to return.
    pub limit: Option<usize>,
    /// Ask the external provider before falling back to stored places.
    pub prefer_external: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: None,
            prefer_external: true,
        }
    }
}

impl SearchOptions {
    /// Options requesting at most `limit` places.
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            prefer_external: true,
        }
    }

    /// Options that skip the external provider.
    #[must_use]
    pub const fn stored_only(self) -> Self {
        Self {
            prefer_external: false,
            ..self
        }
    }
}

/// Cache key for a search of `query` limited to `limit` places.
#[must_use]
pub fn search_cache_key(query: &str, limit: usize) -> String {
    format!("place-search:{query}:{limit}")
}

/// Cache key for a single place lookup.
#[must_use]
pub fn place_cache_key(id: &str) -> String {
    format!("place:{id}")
}

/// Drop places that repeat an earlier place's name and position.
///
/// Positions are compared after rounding to four decimal places (about
/// eleven metres), so the same venue reported by two sources collapses to
/// its first occurrence.
///
/// # Examples
/// ```
/// use lovetrip_core::{Coordinate, Place};
/// use lovetrip_search::dedupe_places;
///
/// let places = vec![
///     Place::new("naver_1", "Cafe Onion", Coordinate::new(37.544_51, 127.055_81)),
///     Place::new("stored_9", "Cafe Onion", Coordinate::new(37.544_49, 127.055_79)),
///     Place::new("naver_2", "Cafe Onion", Coordinate::new(37.6, 127.1)),
/// ];
/// let unique: Vec<_> = dedupe_places(places).into_iter().map(|p| p.id).collect();
/// assert_eq!(unique, ["naver_1", "naver_2"]);
/// ```
#[must_use]
pub fn dedupe_places(places: Vec<Place>) -> Vec<Place> {
    let mut seen = HashSet::with_capacity(places.len());
    places
        .into_iter()
        .filter(|place| {
            seen.insert(format!(
                "{}_{:.4}_{:.4}",
                place.name, place.location.latitude, place.location.longitude
            ))
        })
        .collect()
}

/// Place search combining an external provider, a place store and a cache.
///
/// Searches are answered from the cache when possible. On a miss the
/// provider is asked first, the store tops up any shortfall, and the
/// de-duplicated result is cached, even when empty. Provider and store
/// failures never surface to the caller: they are logged and the search
/// continues with whatever was found.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use lovetrip_cache::TtlCache;
/// use lovetrip_core::{Coordinate, Place, PlaceStore};
/// use lovetrip_search::{DisabledProvider, PlaceSearchService, SearchOptions};
/// # use std::convert::Infallible;
/// # struct Stored(Vec<Place>);
/// # impl PlaceStore for Stored {
/// #     type Error = Infallible;
/// #     fn search(&self, q: &str, limit: usize) -> Result<Vec<Place>, Infallible> {
/// #         Ok(self.0.iter().filter(|p| p.name.contains(q)).take(limit).cloned().collect())
/// #     }
/// #     fn place(&self, id: &str) -> Result<Option<Place>, Infallible> {
/// #         Ok(self.0.iter().find(|p| p.id == id).cloned())
/// #     }
/// #     fn popular(&self, limit: usize) -> Result<Vec<Place>, Infallible> {
/// #         Ok(self.0.iter().take(limit).cloned().collect())
/// #     }
/// # }
///
/// let store = Stored(vec![Place::new("p1", "Namsan Tower", Coordinate::new(37.55, 126.99))]);
/// let cache = Arc::new(TtlCache::new());
/// let service = PlaceSearchService::new(DisabledProvider, store, Arc::clone(&cache));
///
/// let found = service.search_places("Namsan", &SearchOptions::default());
/// assert_eq!(found.len(), 1);
/// assert_eq!(cache.len(), 1);
/// ```
pub struct PlaceSearchService<P, S>
where
    P: SearchProvider,
    S: PlaceStore,
{
    provider: P,
    store: S,
    cache: Arc<TtlCache>,
    config: SearchConfig,
}

impl<P, S> PlaceSearchService<P, S>
where
    P: SearchProvider,
    S: PlaceStore,
{
    /// Construct a service using default configuration.
    pub fn new(provider: P, store: S, cache: Arc<TtlCache>) -> Self {
        Self::with_config(provider, store, cache, SearchConfig::default())
    }

    /// Construct a service with explicit configuration.
    pub const fn with_config(
        provider: P,
        store: S,
        cache: Arc<TtlCache>,
        config: SearchConfig,
    ) -> Self {
        Self {
            provider,
            store,
            cache,
            config,
        }
    }

    /// The cache shared by this service.
    #[must_use]
    pub const fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    /// Search for places matching `query`.
    #[must_use]
    pub fn search_places(&self, query: &str, options: &SearchOptions) -> Vec<Place> {
        let limit = options
            .limit
            .filter(|limit| *limit > 0)
            .unwrap_or(self.config.default_limit);
        let key = search_cache_key(query, limit);
        if let Some(cached) = self.cache.get::<Vec<Place>>(&key) {
            return cached;
        }

        let mut results = if options.prefer_external {
            self.external_places(query, limit)
        } else {
            Vec::new()
        };

        let shortfall = limit.saturating_sub(results.len());
        if shortfall > 0 {
            match self.store.search(query, shortfall) {
                Ok(stored) => results.extend(dedupe_places(stored)),
                Err(err) => log::warn!("stored place search for {query:?} failed: {err}"),
            }
        }

        results.truncate(limit);
        let unique = dedupe_places(results);
        log::debug!("search for {query:?} found {} place(s)", unique.len());
        self.cache
            .set_with_ttl(key, unique.clone(), self.config.cache_ttl);
        unique
    }

    fn external_places(&self, query: &str, limit: usize) -> Vec<Place> {
        match self.provider.search_places(query, limit) {
            Ok(found) => found.into_iter().map(Place::from).collect(),
            Err(err) => {
                log::warn!("external place search for {query:?} failed: {err}");
                Vec::new()
            }
        }
    }

    /// Look up a stored place by id.
    ///
    /// Found places are cached; misses and store failures are not.
    #[must_use]
    pub fn place(&self, id: &str) -> Option<Place> {
        let key = place_cache_key(id);
        if let Some(cached) = self.cache.get::<Place>(&key) {
            return Some(cached);
        }
        match self.store.place(id) {
            Ok(Some(place)) => {
                self.cache
                    .set_with_ttl(key, place.clone(), self.config.cache_ttl);
                Some(place)
            }
            Ok(None) => None,
            Err(err) => {
                log::warn!("stored place lookup for {id:?} failed: {err}");
                None
            }
        }
    }

    /// Return up to `limit` of the most used stored places, de-duplicated.
    ///
    /// Popular places are read from the store on every call.
    #[must_use]
    pub fn popular_places(&self, limit: usize) -> Vec<Place> {
        match self.store.popular(limit) {
            Ok(places) => dedupe_places(places),
            Err(err) => {
                log::warn!("popular place lookup failed: {err}");
                Vec::new()
            }
        }
    }

    /// Drop every cached search for `query`, whatever its limit.
    ///
    /// Returns the number of evicted cache entries.
    ///
    /// # Errors
    /// Propagates [`CacheError`] from pattern deletion. The query is escaped
    /// before use, so this only fails if the cache rejects the pattern.
    pub fn invalidate_search(&self, query: &str) -> Result<usize, CacheError> {
        let pattern = format!("place-search:{}:[0-9]+", regex::escape(query));
        self.cache.delete_pattern(&pattern)
    }
}
