//! Errors raised by the cache.

use thiserror::Error;

/// Errors returned by [`TtlCache`](crate::TtlCache) and the sweeper.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A key pattern passed to
    /// [`delete_pattern`](crate::TtlCache::delete_pattern) is not a valid
    /// regular expression.
    #[error("invalid cache key pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Compilation failure reported by `regex`.
        #[source]
        source: regex::Error,
    },
    /// [`spawn_sweeper`](crate::spawn_sweeper) was called outside a Tokio
    /// runtime.
    #[error("the cache sweeper requires a running Tokio runtime")]
    NoRuntime,
}
