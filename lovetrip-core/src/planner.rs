//! Nearest-neighbour route planning.
//!
//! The planner is the classic greedy heuristic: from the current position,
//! always visit the closest unvisited place next. It runs in `O(n²)` and is
//! not globally optimal; on adversarial layouts it can be noticeably longer
//! than the best tour.

use std::collections::BTreeMap;

use crate::{Coordinate, Located, Place, distance};

/// Order `candidates` by repeatedly visiting the nearest unvisited one.
///
/// `start` is only the initial reference point and never appears in the
/// output. Ties go to the candidate that comes first in the remaining pool,
/// and the pool keeps its original relative order as places are removed.
/// The input slice is left untouched.
///
/// # Examples
/// ```
/// use lovetrip_core::{Coordinate, Place, optimize_route};
///
/// let start = Coordinate::new(37.5665, 126.978);
/// let places = vec![
///     Place::new("far", "Far", Coordinate::new(37.5, 127.0)),
///     Place::new("near", "Near", Coordinate::new(37.5651, 126.9895)),
/// ];
///
/// let route = optimize_route(&start, &places);
/// assert_eq!(route[0].id, "near");
/// assert_eq!(route[1].id, "far");
/// ```
#[must_use]
pub fn optimize_route<S, T>(start: &S, candidates: &[T]) -> Vec<T>
where
    S: Located + ?Sized,
    T: Located + Clone,
{
    let mut unvisited: Vec<&T> = candidates.iter().collect();
    let mut route = Vec::with_capacity(candidates.len());
    let mut current = start.coordinate();

    while let Some(index) = nearest_index(current, &unvisited) {
        let next = unvisited.remove(index);
        current = next.coordinate();
        route.push(next.clone());
    }

    route
}

/// Index of the closest entry in `pool`, or `None` when the pool is empty.
///
/// The first entry seeds the comparison and only a strictly smaller distance
/// replaces it, so a NaN distance in the first slot is never displaced.
fn nearest_index<T: Located>(from: Coordinate, pool: &[&T]) -> Option<usize> {
    let mut iter = pool.iter().enumerate();
    let (_, first) = iter.next()?;
    let mut best = (0, distance(&from, *first));
    for (index, candidate) in iter {
        let d = distance(&from, *candidate);
        if d < best.1 {
            best = (index, d);
        }
    }
    Some(best.0)
}

/// Sum of distances between consecutive places, in kilometres.
///
/// Sequences with fewer than two places have a total of `0.0`.
///
/// # Examples
/// ```
/// use lovetrip_core::{Coordinate, Place, total_distance};
///
/// assert_eq!(total_distance::<Place>(&[]), 0.0);
/// let one = Place::new("a", "A", Coordinate::new(37.5, 127.0));
/// assert_eq!(total_distance(&[one]), 0.0);
/// ```
#[must_use]
pub fn total_distance<T: Located>(places: &[T]) -> f64 {
    places
        .windows(2)
        .map(|pair| match pair {
            [from, to] => distance(from, to),
            _ => 0.0,
        })
        .sum()
}

/// Order `places` keeping the first one fixed as the anchor.
///
/// The remaining places are ordered with [`optimize_route`] starting from the
/// anchor. This is how courses are laid out when the caller has chosen where
/// the day begins.
///
/// # Examples
/// ```
/// use lovetrip_core::{Coordinate, Place, optimize_from_first};
///
/// let places = vec![
///     Place::new("hotel", "Hotel", Coordinate::new(37.5665, 126.978)),
///     Place::new("far", "Far", Coordinate::new(37.5, 127.0)),
///     Place::new("near", "Near", Coordinate::new(37.5651, 126.9895)),
/// ];
/// let ordered: Vec<_> = optimize_from_first(&places)
///     .into_iter()
///     .map(|p| p.id)
///     .collect();
/// assert_eq!(ordered, ["hotel", "near", "far"]);
/// ```
#[must_use]
pub fn optimize_from_first(places: &[Place]) -> Vec<Place> {
    match places {
        [] => Vec::new(),
        [anchor, rest @ ..] => {
            let mut route = Vec::with_capacity(places.len());
            route.push(anchor.clone());
            route.extend(optimize_route(anchor, rest));
            route
        }
    }
}

/// Arithmetic mean of the coordinates of `places`.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn centroid<T: Located>(places: &[T]) -> Option<Coordinate> {
    if places.is_empty() {
        return None;
    }
    let (lat_sum, lng_sum) = places.iter().fold((0.0, 0.0), |(lat, lng), place| {
        let c = place.coordinate();
        (lat + c.latitude, lng + c.longitude)
    });
    let count = places.len() as f64;
    Some(Coordinate::new(lat_sum / count, lng_sum / count))
}

/// Group `places` by region and order each group from its centroid.
///
/// Places without an area code are grouped under
/// [`UNCLASSIFIED_REGION`](crate::UNCLASSIFIED_REGION). Within a group the
/// input order is preserved before planning, and the centroid is only a
/// reference point: it never appears in the output. Regions with no places
/// are absent from the map.
///
/// # Examples
/// ```
/// use lovetrip_core::{Coordinate, Place, UNCLASSIFIED_REGION, optimize_routes_by_region};
///
/// let places = vec![
///     Place::new("a", "A", Coordinate::new(37.56, 126.97)).with_area_code(1),
///     Place::new("b", "B", Coordinate::new(35.18, 129.07)).with_area_code(6),
///     Place::new("c", "C", Coordinate::new(37.57, 126.98)),
/// ];
///
/// let routes = optimize_routes_by_region(&places);
/// assert_eq!(routes.len(), 3);
/// assert_eq!(routes["1"].len(), 1);
/// assert!(routes.contains_key(UNCLASSIFIED_REGION));
/// ```
#[must_use]
pub fn optimize_routes_by_region(places: &[Place]) -> BTreeMap<String, Vec<Place>> {
    group_by_region(places)
        .into_iter()
        .filter_map(|(region, group)| {
            let reference = centroid(&group)?;
            let ordered = optimize_route(&reference, &group);
            log::debug!(
                "planned {} place(s) for region {region} from centroid ({}, {})",
                ordered.len(),
                reference.latitude,
                reference.longitude
            );
            Some((region, ordered))
        })
        .collect()
}

fn group_by_region(places: &[Place]) -> BTreeMap<String, Vec<Place>> {
    let mut groups: BTreeMap<String, Vec<Place>> = BTreeMap::new();
    for place in places {
        groups
            .entry(place.region().as_key())
            .or_default()
            .push(place.clone());
    }
    groups
}
