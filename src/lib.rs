//! Facade crate for the LoveTrip engine.
//!
//! This crate re-exports the core domain types, the TTL cache and, behind the
//! `search` feature, the cache-first place search service.

#![forbid(unsafe_code)]

pub use lovetrip_core::{
    ALL_REGIONS, Coordinate, EARTH_RADIUS_KM, Located, NearestNeighbourPlanner, Place,
    PlaceCategory, PlaceStore, PlanError, PlanRequest, PlanRequestValidationError, PlanResponse,
    RegionKey, RegionRoute, Route, RoutePlanner, UNCLASSIFIED_REGION, centroid, distance,
    haversine_km, optimize_from_first, optimize_route, optimize_routes_by_region, total_distance,
};

#[cfg(feature = "store-sqlite")]
pub use lovetrip_core::{SqlitePlaceStore, SqlitePlaceStoreError};

pub use lovetrip_cache::{
    CacheConfig, CacheError, DEFAULT_CLEANUP_INTERVAL, DEFAULT_TTL, SharedClock, SweeperHandle,
    TtlCache, spawn_sweeper, spawn_sweeper_with_config,
};

#[cfg(feature = "search")]
pub use lovetrip_search::{
    DEFAULT_POPULAR_LIMIT, DEFAULT_SEARCH_LIMIT, DisabledProvider, PlaceSearchService,
    ProviderPlace, SEARCH_CACHE_TTL, SearchConfig, SearchOptions, SearchProvider,
};
