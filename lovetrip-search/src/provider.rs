//! External place-search providers.

use std::convert::Infallible;

use lovetrip_core::{Coordinate, Place, PlaceCategory};

/// A place as reported by an external search provider.
///
/// Providers describe categories with free-form labels such as
/// `"음식점>한식"`; converting into a [`Place`] classifies the label with
/// [`PlaceCategory::infer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPlace {
    /// Provider-specific identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Street address, if reported.
    pub address: Option<String>,
    /// Geographic position.
    pub location: Coordinate,
    /// Provider category label.
    pub category: String,
}

impl From<ProviderPlace> for Place {
    fn from(value: ProviderPlace) -> Self {
        let category = PlaceCategory::infer(&value.category);
        let place = Self::new(value.id, value.name, value.location).with_category(category);
        match value.address {
            Some(address) => place.with_address(address),
            None => place,
        }
    }
}

/// Search an external place directory.
///
/// Implementations wrap a remote API. Failures are reported through the
/// associated error type; [`PlaceSearchService`](crate::PlaceSearchService)
/// logs them and falls back to stored places.
pub trait SearchProvider {
    /// Failure raised by the provider.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return up to `limit` places matching `query`.
    fn search_places(&self, query: &str, limit: usize) -> Result<Vec<ProviderPlace>, Self::Error>;
}

/// Provider that never finds anything.
///
/// Used when no external directory is configured, so searches are answered
/// from stored places alone.
///
/// # Examples
/// ```
/// use lovetrip_search::{DisabledProvider, SearchProvider};
///
/// let Ok(found) = DisabledProvider.search_places("cafe", 10);
/// assert!(found.is_empty());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledProvider;

impl SearchProvider for DisabledProvider {
    type Error = Infallible;

    fn search_places(&self, _query: &str, _limit: usize) -> Result<Vec<ProviderPlace>, Self::Error> {
        Ok(Vec::new())
    }
}
