//! Command-line interface for the LoveTrip engine.
//!
//! `lovetrip plan` orders the places of a JSON plan request into routes and
//! `lovetrip search` looks places up in a prepared SQLite database. Both write
//! JSON to standard output.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod fs;
mod plan;
mod search;

pub use error::CliError;

use plan::{PlanArgs, run_plan};
use search::{SearchArgs, run_search};

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ENV_PLAN_REQUEST: &str = "LOVETRIP_CMDS_PLAN_REQUEST_PATH";
pub(crate) const ARG_SEARCH_QUERY: &str = "query";
pub(crate) const ENV_SEARCH_QUERY: &str = "LOVETRIP_CMDS_SEARCH_QUERY";
pub(crate) const ARG_SEARCH_PLACES_DB: &str = "places-db";
pub(crate) const ENV_SEARCH_PLACES_DB: &str = "LOVETRIP_CMDS_SEARCH_PLACES_DB";
pub(crate) const ARG_SEARCH_LIMIT: &str = "limit";

/// Run the LoveTrip CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Search(args) => run_search(args),
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "lovetrip",
    about = "Route planning and place search for the LoveTrip engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order the places of a plan request into visiting routes.
    Plan(PlanArgs),
    /// Search a places database by name.
    Search(SearchArgs),
}

#[cfg(test)]
mod tests;
