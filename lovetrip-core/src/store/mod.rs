//! Data access traits for persisted places.
//!
//! The `PlaceStore` trait defines a read-only interface for retrieving
//! [`Place`] values that earlier courses have already recorded. The search
//! service uses it as the fallback behind an external provider.

use crate::Place;

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqlitePlaceStore, SqlitePlaceStoreError};

/// SQLite schema read by [`SqlitePlaceStore`].
///
/// `usage_count` records how many courses reference a place and drives
/// [`PlaceStore::popular`].
pub const PLACES_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS places (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    address TEXT,
    lat REAL NOT NULL,
    lng REAL NOT NULL,
    type TEXT NOT NULL DEFAULT 'ETC',
    rating REAL,
    price_level INTEGER,
    description TEXT,
    image_url TEXT,
    area_code INTEGER,
    usage_count INTEGER NOT NULL DEFAULT 0
)";

/// Read-only access to persisted places.
///
/// Result ordering is part of the contract: both [`search`](Self::search)
/// and [`popular`](Self::popular) return places by descending usage count,
/// then by id.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use lovetrip_core::{Coordinate, Place, PlaceStore};
///
/// struct OnePlace(Place);
///
/// impl PlaceStore for OnePlace {
///     type Error = Infallible;
///
///     fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>, Self::Error> {
///         let hit = self.0.name.contains(query) && limit > 0;
///         Ok(hit.then(|| self.0.clone()).into_iter().collect())
///     }
///
///     fn place(&self, id: &str) -> Result<Option<Place>, Self::Error> {
///         Ok((self.0.id == id).then(|| self.0.clone()))
///     }
///
///     fn popular(&self, limit: usize) -> Result<Vec<Place>, Self::Error> {
///         Ok(std::iter::once(self.0.clone()).take(limit).collect())
///     }
/// }
///
/// let store = OnePlace(Place::new("p1", "Namsan Tower", Coordinate::new(37.55, 126.99)));
/// assert_eq!(store.search("Namsan", 5).unwrap().len(), 1);
/// assert!(store.place("missing").unwrap().is_none());
/// ```
pub trait PlaceStore {
    /// Failure raised by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return up to `limit` places whose name or address contains `query`.
    ///
    /// Matching is case-insensitive for ASCII letters. An empty query
    /// matches every place.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>, Self::Error>;

    /// Look up a place by id.
    fn place(&self, id: &str) -> Result<Option<Place>, Self::Error>;

    /// Return up to `limit` of the most used places.
    fn popular(&self, limit: usize) -> Result<Vec<Place>, Self::Error>;
}
