//! Great-circle distance between coordinates.
//!
//! Distances use the haversine formula on a spherical Earth of radius
//! [`EARTH_RADIUS_KM`]. Inputs are never range-checked: out-of-range degrees
//! give meaningless but finite results, and NaN propagates.

use crate::{Coordinate, Place};

/// Mean Earth radius used by [`haversine_km`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Anything that sits at a single geographic coordinate.
///
/// The planner functions are generic over this trait so that a bare
/// [`Coordinate`] can serve as a reference point next to full [`Place`]
/// values.
pub trait Located {
    /// Return the position of `self`.
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl Located for Place {
    fn coordinate(&self) -> Coordinate {
        self.location
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn coordinate(&self) -> Coordinate {
        (**self).coordinate()
    }
}

/// Haversine distance between `a` and `b` in kilometres.
///
/// The result is symmetric and exactly `0.0` for identical inputs.
///
/// # Examples
/// ```
/// use lovetrip_core::{Coordinate, haversine_km};
///
/// let seoul = Coordinate::new(37.5665, 126.978);
/// let busan = Coordinate::new(35.1796, 129.0756);
/// let km = haversine_km(seoul, busan);
/// assert!(km > 300.0 && km < 350.0);
/// assert_eq!(haversine_km(seoul, seoul), 0.0);
/// ```
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let half_lat = (d_lat / 2.0).sin();
    let half_lng = (d_lng / 2.0).sin();

    let h = half_lat * half_lat
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * half_lng
            * half_lng;
    // Rounding can push `h` just past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Distance between two located values in kilometres.
#[must_use]
pub fn distance<A, B>(a: &A, b: &B) -> f64
where
    A: Located + ?Sized,
    B: Located + ?Sized,
{
    haversine_km(a.coordinate(), b.coordinate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SEOUL: Coordinate = Coordinate::new(37.5665, 126.978);
    const BUSAN: Coordinate = Coordinate::new(35.1796, 129.0756);

    #[rstest]
    fn seoul_to_busan_is_roughly_325_km() {
        let km = haversine_km(SEOUL, BUSAN);
        assert!(km > 300.0, "got {km}");
        assert!(km < 350.0, "got {km}");
    }

    #[rstest]
    fn distance_is_symmetric() {
        assert_eq!(haversine_km(SEOUL, BUSAN), haversine_km(BUSAN, SEOUL));
    }

    #[rstest]
    #[case(SEOUL)]
    #[case(BUSAN)]
    #[case(Coordinate::new(0.0, 0.0))]
    #[case(Coordinate::new(-89.9, 179.9))]
    fn distance_to_self_is_zero(#[case] point: Coordinate) {
        assert_eq!(haversine_km(point, point), 0.0);
    }

    #[rstest]
    fn nearby_points_are_under_two_km() {
        let city_hall = Coordinate::new(37.5665, 126.978);
        let cheonggye = Coordinate::new(37.5651, 126.9895);
        let km = haversine_km(city_hall, cheonggye);
        assert!(km > 0.0);
        assert!(km < 2.0);
    }

    #[rstest]
    fn one_degree_of_latitude_matches_arc_length() {
        let km = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        assert!((km - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(Coordinate::new(37.5665, 126.978), Coordinate::new(-37.5665, -53.022))]
    #[case(Coordinate::new(-79.84, -169.66), Coordinate::new(79.84, 10.34))]
    #[case(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0))]
    fn antipodal_points_are_half_a_circumference_apart(
        #[case] a: Coordinate,
        #[case] b: Coordinate,
    ) {
        let km = haversine_km(a, b);
        assert!(km.is_finite(), "got {km}");
        assert!((km - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-3, "got {km}");
        assert_eq!(km, haversine_km(b, a));
    }

    #[rstest]
    fn nan_input_propagates() {
        let km = haversine_km(Coordinate::new(f64::NAN, 0.0), SEOUL);
        assert!(km.is_nan());
    }

    #[rstest]
    fn located_places_use_their_location() {
        let place = Place::new("city-hall", "City Hall", SEOUL);
        assert_eq!(distance(&place, &BUSAN), haversine_km(SEOUL, BUSAN));
    }
}
