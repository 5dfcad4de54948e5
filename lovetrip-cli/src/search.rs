//! Search command implementation for the LoveTrip CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use lovetrip_core::Place;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_SEARCH_LIMIT, ARG_SEARCH_PLACES_DB, ARG_SEARCH_QUERY, CliError, ENV_SEARCH_PLACES_DB,
    ENV_SEARCH_QUERY, fs::require_existing_file, write_json,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search a prepared places database for names or addresses \
                 containing the query. Results are cached for the lifetime \
                 of the command and written as a JSON array.",
    about = "Search stored places"
)]
#[ortho_config(prefix = "LOVETRIP")]
pub(crate) struct SearchArgs {
    /// Text to look for in place names and addresses.
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Path to the SQLite places database.
    #[arg(long = ARG_SEARCH_PLACES_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) places_db: Option<Utf8PathBuf>,
    /// Maximum number of places to return (defaults to 20).
    #[arg(long = ARG_SEARCH_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchCommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchCommandConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchCommandConfig {
    pub(crate) query: String,
    pub(crate) places_db: Utf8PathBuf,
    pub(crate) limit: Option<usize>,
}

impl TryFrom<SearchArgs> for SearchCommandConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_SEARCH_QUERY,
            env: ENV_SEARCH_QUERY,
        })?;
        let places_db = args.places_db.ok_or(CliError::MissingArgument {
            field: ARG_SEARCH_PLACES_DB,
            env: ENV_SEARCH_PLACES_DB,
        })?;
        Ok(Self {
            query,
            places_db,
            limit: args.limit,
        })
    }
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_search_with(args, &mut stdout)
}

pub(crate) fn run_search_with(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let places = execute_search(&config)?;
    write_json(writer, &places)
}

#[cfg(feature = "store-sqlite")]
pub(crate) fn execute_search(config: &SearchCommandConfig) -> Result<Vec<Place>, CliError> {
    use std::sync::Arc;

    use lovetrip_cache::TtlCache;
    use lovetrip_core::SqlitePlaceStore;
    use lovetrip_search::{DisabledProvider, PlaceSearchService, SearchOptions};

    require_existing_file(&config.places_db, ARG_SEARCH_PLACES_DB)?;
    let store = SqlitePlaceStore::open(config.places_db.as_std_path())?;
    let service = PlaceSearchService::new(DisabledProvider, store, Arc::new(TtlCache::new()));
    let options = SearchOptions {
        limit: config.limit,
        prefer_external: false,
    };
    Ok(service.search_places(&config.query, &options))
}

#[cfg(not(feature = "store-sqlite"))]
pub(crate) fn execute_search(config: &SearchCommandConfig) -> Result<Vec<Place>, CliError> {
    require_existing_file(&config.places_db, ARG_SEARCH_PLACES_DB)?;
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "searching a places database",
    })
}
