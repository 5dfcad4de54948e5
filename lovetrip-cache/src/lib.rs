//! In-memory TTL cache for the LoveTrip engine.
//!
//! [`TtlCache`] keeps results of expensive lookups (place searches, planned
//! courses) for a bounded time. Entries expire individually; expired entries
//! are evicted lazily on read, in bulk by [`TtlCache::cleanup`], or
//! periodically by a sweeper started with [`spawn_sweeper`].
//!
//! Time is read through [`mockable::Clock`] so expiry can be tested without
//! sleeping.

#![forbid(unsafe_code)]

mod cache;
mod config;
mod error;
mod sweeper;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cache::{SharedClock, TtlCache};
pub use config::{CacheConfig, DEFAULT_CLEANUP_INTERVAL, DEFAULT_TTL};
pub use error::CacheError;
pub use sweeper::{SweeperHandle, spawn_sweeper, spawn_sweeper_with_config};
