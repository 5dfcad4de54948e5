//! Error types emitted by the LoveTrip CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use lovetrip_core::{PlanError, PlanRequestValidationError};
use thiserror::Error;

/// Errors emitted by the LoveTrip CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the affected option.
        field: &'static str,
        /// Environment variable that supplies the option.
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Name of the missing Cargo feature.
        feature: &'static str,
        /// Operation that needed the feature.
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Name of the affected option.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Name of the affected option.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the affected option.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
        #[source]
        /// Underlying error.
        source: std::io::Error,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        #[source]
        /// Underlying error.
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        #[source]
        /// Underlying error.
        source: serde_json::Error,
    },
    /// The plan request payload failed validation.
    #[error("plan request in {path:?} failed validation: {source}")]
    InvalidPlanRequest {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        #[source]
        /// Underlying error.
        source: PlanRequestValidationError,
    },
    /// The planner rejected the request.
    #[error("planner failed: {source}")]
    Plan {
        #[source]
        /// Underlying error.
        source: PlanError,
    },
    /// Opening the places database failed.
    #[cfg(feature = "store-sqlite")]
    #[error(transparent)]
    OpenPlaceStore(#[from] lovetrip_core::SqlitePlaceStoreError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
