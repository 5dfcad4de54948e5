//! Plan command implementation for the LoveTrip CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use lovetrip_core::{NearestNeighbourPlanner, PlanRequest, PlanResponse, RoutePlanner};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_PLAN_REQUEST, CliError, ENV_PLAN_REQUEST,
    fs::{open_utf8_file, require_existing_file},
    write_json,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order the places of a JSON-encoded PlanRequest into \
                 nearest-neighbour routes. Set by_region in the request to \
                 plan one route per region.",
    about = "Plan visiting routes for a set of places"
)]
#[ortho_config(prefix = "LOVETRIP")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a PlanRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        Ok(Self { request_path })
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &NearestNeighbourPlanner, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    planner: &dyn RoutePlanner,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let response = execute_plan(&config, planner)?;
    write_json(writer, &response)
}

pub(crate) fn execute_plan(
    config: &PlanConfig,
    planner: &dyn RoutePlanner,
) -> Result<PlanResponse, CliError> {
    require_existing_file(&config.request_path, ARG_PLAN_REQUEST)?;
    let request = load_plan_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidPlanRequest {
            path: config.request_path.clone(),
            source,
        })?;
    planner
        .plan(&request)
        .map_err(|source| CliError::Plan { source })
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(crate) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}
