//! Plan requests, responses and the planner seam.
//!
//! A [`PlanRequest`] carries the places a caller wants to visit. A
//! [`RoutePlanner`] turns it into a [`PlanResponse`] holding one ordered route
//! per region (or a single route keyed [`ALL_REGIONS`]).

use std::collections::HashSet;

use thiserror::Error;

use crate::{
    Coordinate, Place, Route, optimize_from_first, optimize_route, optimize_routes_by_region,
};

/// Region key used when a request is planned as a single route.
pub const ALL_REGIONS: &str = "all";

/// Parameters for a plan request.
///
/// # Examples
/// ```rust
/// use lovetrip_core::{Coordinate, Place, PlanRequest};
///
/// let request = PlanRequest {
///     start: Some(Coordinate::new(37.5665, 126.978)),
///     places: vec![Place::new("p1", "Cafe", Coordinate::new(37.56, 126.99))],
///     by_region: false,
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Optional reference point the route departs from.
    ///
    /// The start point is never part of the planned route.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<Coordinate>,
    /// Places to visit.
    pub places: Vec<Place>,
    /// Plan one route per region instead of a single route.
    #[cfg_attr(feature = "serde", serde(default))]
    pub by_region: bool,
}

/// Errors returned by [`PlanRequest::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanRequestValidationError {
    /// Two places share the same identifier.
    #[error("place id {id} appears more than once")]
    DuplicatePlaceId {
        /// The repeated identifier.
        id: String,
    },
    /// A place or the start point has a NaN or infinite coordinate.
    #[error("coordinate for {subject} is not finite: ({latitude}, {longitude})")]
    NonFiniteCoordinate {
        /// The place id, or `"start"` for the start point.
        subject: String,
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },
}

impl PlanRequest {
    /// Check the request for duplicate ids and non-finite coordinates.
    ///
    /// Planning itself tolerates both, so validation is an explicit step
    /// taken at input boundaries such as the CLI.
    pub fn validate(&self) -> Result<(), PlanRequestValidationError> {
        if let Some(start) = self.start {
            ensure_finite("start", start)?;
        }
        let mut seen = HashSet::with_capacity(self.places.len());
        for place in &self.places {
            ensure_finite(&place.id, place.location)?;
            if !seen.insert(place.id.as_str()) {
                return Err(PlanRequestValidationError::DuplicatePlaceId {
                    id: place.id.clone(),
                });
            }
        }
        Ok(())
    }
}

fn ensure_finite(subject: &str, coordinate: Coordinate) -> Result<(), PlanRequestValidationError> {
    if coordinate.is_finite() {
        Ok(())
    } else {
        Err(PlanRequestValidationError::NonFiniteCoordinate {
            subject: subject.to_owned(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
    }
}

/// One planned route and its derived distances.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionRoute {
    /// Region key the route belongs to.
    pub region: String,
    /// Places in visiting order.
    pub places: Vec<Place>,
    /// Sum of consecutive leg distances in kilometres.
    pub total_distance_km: f64,
    /// Longest single leg in kilometres.
    pub max_leg_km: f64,
}

impl RegionRoute {
    /// Build a region route, deriving its distances from `route`.
    #[must_use]
    pub fn new(region: impl Into<String>, route: Route) -> Self {
        let total_distance_km = route.total_distance_km();
        let max_leg_km = route.max_leg_km();
        Self {
            region: region.into(),
            places: route.into_places(),
            total_distance_km,
            max_leg_km,
        }
    }
}

/// Response from a successful plan.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResponse {
    /// Planned routes, ordered by region key.
    pub routes: Vec<RegionRoute>,
    /// Sum of every route's total distance in kilometres.
    pub total_distance_km: f64,
}

impl PlanResponse {
    /// Assemble a response, summing route distances.
    #[must_use]
    pub fn new(routes: Vec<RegionRoute>) -> Self {
        let total_distance_km = routes.iter().map(|r| r.total_distance_km).sum();
        Self {
            routes,
            total_distance_km,
        }
    }
}

/// Errors returned by [`RoutePlanner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The request failed validation.
    #[error("invalid plan request: {0}")]
    InvalidRequest(#[from] PlanRequestValidationError),
}

/// Order the places of a request into routes.
///
/// Planners must be `Send + Sync` so they can be shared across threads.
pub trait RoutePlanner: Send + Sync {
    /// Plan a request, producing routes or an error.
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError>;
}

/// [`RoutePlanner`] backed by the greedy nearest-neighbour heuristic.
///
/// The request is validated before planning.
///
/// # Examples
/// ```rust
/// use lovetrip_core::{Coordinate, NearestNeighbourPlanner, Place, PlanRequest, RoutePlanner};
///
/// let request = PlanRequest {
///     start: None,
///     places: vec![
///         Place::new("hotel", "Hotel", Coordinate::new(37.5665, 126.978)),
///         Place::new("far", "Far", Coordinate::new(37.5, 127.0)),
///         Place::new("near", "Near", Coordinate::new(37.5651, 126.9895)),
///     ],
///     by_region: false,
/// };
/// let response = NearestNeighbourPlanner.plan(&request).expect("valid request");
/// let ids: Vec<_> = response.routes[0].places.iter().map(|p| p.id.as_str()).collect();
/// assert_eq!(ids, ["hotel", "near", "far"]);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestNeighbourPlanner;

impl RoutePlanner for NearestNeighbourPlanner {
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError> {
        request.validate()?;

        let routes = if request.by_region {
            optimize_routes_by_region(&request.places)
                .into_iter()
                .map(|(region, places)| RegionRoute::new(region, Route::new(places)))
                .collect()
        } else if request.places.is_empty() {
            Vec::new()
        } else {
            let ordered = match request.start {
                Some(start) => optimize_route(&start, &request.places),
                None => optimize_from_first(&request.places),
            };
            vec![RegionRoute::new(ALL_REGIONS, Route::new(ordered))]
        };

        log::debug!(
            "planned {} route(s) over {} place(s)",
            routes.len(),
            request.places.len()
        );
        Ok(PlanResponse::new(routes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UNCLASSIFIED_REGION;
    use rstest::{fixture, rstest};

    fn place(id: &str, lat: f64, lng: f64) -> Place {
        Place::new(id, id, Coordinate::new(lat, lng))
    }

    #[fixture]
    fn request() -> PlanRequest {
        PlanRequest {
            start: Some(Coordinate::new(37.5665, 126.978)),
            places: vec![
                place("far", 37.5, 127.0),
                place("near", 37.5651, 126.9895),
                place("mid", 37.56, 126.99),
            ],
            by_region: false,
        }
    }

    #[rstest]
    fn plans_single_route_from_start(request: PlanRequest) {
        let response = NearestNeighbourPlanner.plan(&request).expect("valid request");
        assert_eq!(response.routes.len(), 1);
        let route = &response.routes[0];
        assert_eq!(route.region, ALL_REGIONS);
        let ids: Vec<_> = route.places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["near", "mid", "far"]);
        assert_eq!(response.total_distance_km, route.total_distance_km);
    }

    #[rstest]
    fn empty_request_has_no_routes() {
        let response = NearestNeighbourPlanner
            .plan(&PlanRequest::default())
            .expect("empty request is valid");
        assert!(response.routes.is_empty());
        assert_eq!(response.total_distance_km, 0.0);
    }

    #[rstest]
    fn by_region_plans_each_region(mut request: PlanRequest) {
        request.by_region = true;
        request.places[0].area_code = Some(2);
        request.places[1].area_code = Some(1);
        let response = NearestNeighbourPlanner.plan(&request).expect("valid request");
        let regions: Vec<_> = response.routes.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, ["1", "2", UNCLASSIFIED_REGION]);
        let sum: f64 = response.routes.iter().map(|r| r.total_distance_km).sum();
        assert_eq!(response.total_distance_km, sum);
    }

    #[rstest]
    fn rejects_duplicate_ids(mut request: PlanRequest) {
        request.places.push(place("near", 37.0, 127.0));
        let err = NearestNeighbourPlanner
            .plan(&request)
            .expect_err("duplicate id");
        assert_eq!(
            err,
            PlanError::InvalidRequest(PlanRequestValidationError::DuplicatePlaceId {
                id: "near".into()
            })
        );
    }

    #[rstest]
    #[case(Some(Coordinate::new(f64::NAN, 0.0)), "start")]
    #[case(None, "far")]
    fn rejects_non_finite_coordinates(
        mut request: PlanRequest,
        #[case] start: Option<Coordinate>,
        #[case] subject: &str,
    ) {
        request.start = start;
        if start.is_none() {
            request.places[0].location.longitude = f64::INFINITY;
        }
        let err = request.validate().expect_err("non-finite coordinate");
        assert!(matches!(
            err,
            PlanRequestValidationError::NonFiniteCoordinate { subject: ref s, .. } if s == subject
        ));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn request_deserialises_with_defaults() {
        let json = r#"{"places": [{"id": "a", "name": "A", "lat": 1.0, "lng": 2.0}]}"#;
        let request: PlanRequest = serde_json::from_str(json).expect("request should parse");
        assert!(request.start.is_none());
        assert!(!request.by_region);
        assert_eq!(request.places.len(), 1);
    }
}
