//! Routes through places.
//!
//! A route is an ordered visit sequence with distances derived on demand.

use geo::{Coord, Rect};

use crate::{Place, planner::total_distance};

/// An ordered path through places.
///
/// # Examples
/// ```
/// use lovetrip_core::{Coordinate, Place, Route};
///
/// let a = Place::new("a", "A", Coordinate::new(37.5665, 126.978));
/// let b = Place::new("b", "B", Coordinate::new(37.5651, 126.9895));
/// let route = Route::new(vec![a, b]);
///
/// assert_eq!(route.len(), 2);
/// assert!(route.total_distance_km() > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Route {
    places: Vec<Place>,
}

impl Route {
    /// Construct a route that visits `places` in order.
    #[must_use]
    pub const fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// Construct an empty route.
    ///
    /// # Examples
    /// ```
    /// use lovetrip_core::Route;
    ///
    /// let route = Route::empty();
    /// assert!(route.is_empty());
    /// assert_eq!(route.total_distance_km(), 0.0);
    /// ```
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Places in visiting order.
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Consume the route and return its places.
    #[must_use]
    pub fn into_places(self) -> Vec<Place> {
        self.places
    }

    /// Number of places on the route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the route visits no places.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Sum of consecutive leg distances in kilometres.
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        total_distance(&self.places)
    }

    /// Longest single leg in kilometres, or `0.0` with fewer than two places.
    ///
    /// # Examples
    /// ```
    /// use lovetrip_core::{Coordinate, Place, Route};
    ///
    /// let route = Route::new(vec![
    ///     Place::new("a", "A", Coordinate::new(0.0, 0.0)),
    ///     Place::new("b", "B", Coordinate::new(0.0, 1.0)),
    ///     Place::new("c", "C", Coordinate::new(0.0, 3.0)),
    /// ]);
    /// assert!(route.max_leg_km() > 200.0);
    /// ```
    #[must_use]
    pub fn max_leg_km(&self) -> f64 {
        self.places
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some(from.location.distance_to(&to.location)),
                _ => None,
            })
            .fold(0.0, f64::max)
    }

    /// Bounding rectangle around every place, for fitting a map viewport.
    ///
    /// Corners use `x = longitude` and `y = latitude`. Returns `None` for an
    /// empty route.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let mut coords = self.places.iter().map(|p| Coord::from(p.location));
        let first = coords.next()?;
        let (min, max) = coords.fold((first, first), |(min, max), c| {
            (
                Coord {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coord {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        });
        Some(Rect::new(min, max))
    }
}

impl From<Vec<Place>> for Route {
    fn from(places: Vec<Place>) -> Self {
        Self::new(places)
    }
}

impl IntoIterator for Route {
    type Item = Place;
    type IntoIter = std::vec::IntoIter<Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;
    use rstest::rstest;

    fn place(id: &str, lat: f64, lng: f64) -> Place {
        Place::new(id, id, Coordinate::new(lat, lng))
    }

    #[rstest]
    fn route_preserves_order() {
        let a = place("a", 0.0, 0.0);
        let b = place("b", 1.0, 1.0);
        let route = Route::new(vec![a.clone(), b.clone()]);
        assert_eq!(route.places(), &[a, b]);
    }

    #[rstest]
    fn single_place_route_has_no_distance() {
        let route = Route::new(vec![place("a", 37.5, 127.0)]);
        assert_eq!(route.total_distance_km(), 0.0);
        assert_eq!(route.max_leg_km(), 0.0);
    }

    #[rstest]
    fn max_leg_is_the_longest_consecutive_hop() {
        let a = place("a", 0.0, 0.0);
        let b = place("b", 0.0, 1.0);
        let c = place("c", 0.0, 3.0);
        let route = Route::new(vec![a.clone(), b.clone(), c.clone()]);
        let expected = b.location.distance_to(&c.location);
        assert_eq!(route.max_leg_km(), expected);
    }

    #[rstest]
    fn bounds_cover_every_place() {
        let route = Route::new(vec![
            place("a", 37.5, 127.0),
            place("b", 37.6, 126.9),
            place("c", 37.4, 127.1),
        ]);
        let rect = route.bounds().expect("non-empty route has bounds");
        assert_eq!(rect.min(), Coord { x: 126.9, y: 37.4 });
        assert_eq!(rect.max(), Coord { x: 127.1, y: 37.6 });
    }

    #[rstest]
    fn empty_route_has_no_bounds() {
        assert!(Route::empty().bounds().is_none());
    }
}
