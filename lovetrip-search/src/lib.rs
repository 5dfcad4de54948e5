//! Cached place search for the LoveTrip engine.
//!
//! [`PlaceSearchService`] answers place queries by asking an external
//! [`SearchProvider`] first and topping up from a
//! [`PlaceStore`](lovetrip_core::PlaceStore) of places earlier courses
//! recorded. Results are de-duplicated by name and position and kept in a
//! shared [`TtlCache`](lovetrip_cache::TtlCache).
//!
//! Concrete providers live outside this crate; [`DisabledProvider`] serves
//! offline deployments.

#![forbid(unsafe_code)]

mod provider;
mod service;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use provider::{DisabledProvider, ProviderPlace, SearchProvider};
pub use service::{
    DEFAULT_POPULAR_LIMIT, DEFAULT_SEARCH_LIMIT, PlaceSearchService, SEARCH_CACHE_TTL,
    SearchConfig, SearchOptions, dedupe_places, place_cache_key, search_cache_key,
};
