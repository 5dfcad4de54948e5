//! Core domain types and planning algorithms for the LoveTrip engine.
//!
//! The crate covers geographic [`Coordinate`]s and [`Place`]s, haversine
//! distances, the greedy nearest-neighbour route planner with per-region
//! grouping, the plan request/response boundary and the read-only
//! [`PlaceStore`] abstraction.
//!
//! Planning functions are pure: they never mutate their input and never
//! fail. Validation happens at the [`PlanRequest`] boundary.

#![forbid(unsafe_code)]

pub mod distance;
pub mod place;
pub mod plan;
pub mod planner;
pub mod route;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::{EARTH_RADIUS_KM, Located, distance, haversine_km};
pub use place::{Coordinate, Place, PlaceCategory, RegionKey, UNCLASSIFIED_REGION};
pub use plan::{
    ALL_REGIONS, NearestNeighbourPlanner, PlanError, PlanRequest, PlanRequestValidationError,
    PlanResponse, RegionRoute, RoutePlanner,
};
pub use planner::{
    centroid, optimize_from_first, optimize_route, optimize_routes_by_region, total_distance,
};
pub use route::Route;
pub use store::PlaceStore;
#[cfg(feature = "store-sqlite")]
pub use store::{SqlitePlaceStore, SqlitePlaceStoreError};
