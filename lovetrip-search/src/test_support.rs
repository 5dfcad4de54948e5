//! Provider doubles for exercising the search service.

use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use crate::{ProviderPlace, SearchProvider};

/// Provider that returns a fixed list and counts how often it was asked.
#[derive(Debug, Default)]
pub struct StaticProvider {
    places: Vec<ProviderPlace>,
    calls: AtomicUsize,
}

impl StaticProvider {
    /// Create a provider answering every query with `places`.
    #[must_use]
    pub const fn new(places: Vec<ProviderPlace>) -> Self {
        Self {
            places,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of searches served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

/// Error reported by [`FailingProvider`].
#[derive(Debug, Error)]
#[error("place provider is unavailable")]
pub struct ProviderUnavailable;

impl SearchProvider for StaticProvider {
    type Error = ProviderUnavailable;

    fn search_places(&self, _query: &str, limit: usize) -> Result<Vec<ProviderPlace>, Self::Error> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.places.iter().take(limit).cloned().collect())
    }
}

/// Provider whose every search fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingProvider;

impl SearchProvider for FailingProvider {
    type Error = ProviderUnavailable;

    fn search_places(&self, _query: &str, _limit: usize) -> Result<Vec<ProviderPlace>, Self::Error> {
        Err(ProviderUnavailable)
    }
}
