//! Test-only, in-memory `PlaceStore` implementation and fixture helpers used
//! by unit and behaviour tests.

use std::convert::Infallible;

use crate::{Coordinate, Place, PlaceCategory, PlaceStore};

/// In-memory `PlaceStore` implementation used in tests.
///
/// The store performs a linear scan and is intended only for small datasets.
/// Ordering matches [`SqlitePlaceStore`](crate::SqlitePlaceStore): usage
/// count descending, then id.
#[derive(Default, Debug, Clone)]
pub struct MemoryPlaceStore {
    places: Vec<(Place, u32)>,
}

impl MemoryPlaceStore {
    /// Create a store from places that have never been used.
    pub fn with_places<I>(places: I) -> Self
    where
        I: IntoIterator<Item = Place>,
    {
        Self {
            places: places.into_iter().map(|p| (p, 0)).collect(),
        }
    }

    /// Add `place` with the given usage count, returning `self` for chaining.
    #[must_use]
    pub fn with_usage(mut self, place: Place, usage_count: u32) -> Self {
        self.places.push((place, usage_count));
        self
    }

    fn ranked<'a>(&'a self, filter: impl Fn(&Place) -> bool + 'a) -> Vec<&'a (Place, u32)> {
        let mut ranked: Vec<_> = self.places.iter().filter(|(p, _)| filter(p)).collect();
        ranked.sort_by(|(a, a_uses), (b, b_uses)| b_uses.cmp(a_uses).then_with(|| a.id.cmp(&b.id)));
        ranked
    }
}

fn contains_ascii_case_insensitive(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

impl PlaceStore for MemoryPlaceStore {
    type Error = Infallible;

    fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>, Self::Error> {
        let matches = |place: &Place| {
            contains_ascii_case_insensitive(&place.name, query)
                || place
                    .address
                    .as_deref()
                    .is_some_and(|a| contains_ascii_case_insensitive(a, query))
        };
        Ok(self
            .ranked(matches)
            .into_iter()
            .take(limit)
            .map(|(p, _)| p.clone())
            .collect())
    }

    fn place(&self, id: &str) -> Result<Option<Place>, Self::Error> {
        Ok(self
            .places
            .iter()
            .find(|(p, _)| p.id == id)
            .map(|(p, _)| p.clone()))
    }

    fn popular(&self, limit: usize) -> Result<Vec<Place>, Self::Error> {
        Ok(self
            .ranked(|_| true)
            .into_iter()
            .take(limit)
            .map(|(p, _)| p.clone())
            .collect())
    }
}

/// Places around central Seoul used across the test suites.
///
/// The first entry is City Hall; the others sit at increasing distances from
/// it in the order `near`, `mid`, `far`.
#[must_use]
pub fn seoul_places() -> Vec<Place> {
    vec![
        Place::new("city-hall", "Seoul City Hall", Coordinate::new(37.5665, 126.978))
            .with_category(PlaceCategory::View)
            .with_address("110 Sejong-daero, Jung-gu, Seoul")
            .with_area_code(1),
        Place::new("far", "Gangnam Cafe", Coordinate::new(37.5, 127.0))
            .with_category(PlaceCategory::Cafe)
            .with_area_code(1),
        Place::new("near", "Cheonggyecheon", Coordinate::new(37.5651, 126.9895))
            .with_category(PlaceCategory::View)
            .with_area_code(1),
        Place::new("mid", "Myeongdong Kitchen", Coordinate::new(37.56, 126.99))
            .with_category(PlaceCategory::Food)
            .with_area_code(1),
    ]
}

/// Write `places` with their usage counts into a fresh SQLite database.
///
/// The database uses [`PLACES_SCHEMA`](crate::store::PLACES_SCHEMA) and can be
/// opened with [`SqlitePlaceStore::open`](crate::SqlitePlaceStore::open).
#[cfg(feature = "store-sqlite")]
pub fn write_places_database(
    path: &std::path::Path,
    places: &[(Place, u32)],
) -> Result<(), rusqlite::Error> {
    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute_batch(crate::store::PLACES_SCHEMA)?;
    let tx = connection.transaction()?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO places (id, name, address, lat, lng, type, rating, price_level, \
             description, image_url, area_code, usage_count) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )?;
        for (place, usage_count) in places {
            insert.execute(rusqlite::params![
                place.id,
                place.name,
                place.address,
                place.location.latitude,
                place.location.longitude,
                place.category.as_str(),
                place.rating,
                place.price_level,
                place.description,
                place.image_url,
                place.area_code,
                usage_count,
            ])?;
        }
    }
    tx.commit()
}
