//! SQLite-backed store implementation for persisted places.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use rusqlite::{Connection, OpenFlags, Row, params};
use thiserror::Error;

use crate::{Coordinate, Place};

use super::PlaceStore;

const PLACE_COLUMNS: &str = "id, name, address, lat, lng, type, rating, price_level, \
                             description, image_url, area_code";

/// Error raised when reading persisted places.
#[derive(Debug, Error)]
pub enum SqlitePlaceStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Generic SQLite error when reading place rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only place store backed by an SQLite `places` table.
///
/// The table layout is [`PLACES_SCHEMA`](super::PLACES_SCHEMA). The
/// connection is guarded by a mutex so the store can be shared across
/// threads.
pub struct SqlitePlaceStore {
    path: PathBuf,
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqlitePlaceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlitePlaceStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqlitePlaceStore {
    /// Open the database at `database_path` read-only.
    pub fn open<P: AsRef<Path>>(database_path: P) -> Result<Self, SqlitePlaceStoreError> {
        let path = database_path.as_ref().to_path_buf();
        let connection = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqlitePlaceStoreError::OpenDatabase {
                path: path.clone(),
                source,
            })?;
        log::debug!("opened place store at {}", path.display());
        Ok(Self {
            path,
            connection: Mutex::new(connection),
        })
    }

    /// Location of the backing database.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PlaceStore for SqlitePlaceStore {
    type Error = SqlitePlaceStoreError;

    fn search(&self, query: &str, limit: usize) -> Result<Vec<Place>, Self::Error> {
        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            "SELECT {PLACE_COLUMNS} FROM places \
             WHERE name LIKE ?1 ESCAPE '\\' OR address LIKE ?1 ESCAPE '\\' \
             ORDER BY usage_count DESC, id LIMIT ?2"
        );
        let connection = self.connection();
        let mut statement = connection.prepare(&sql)?;
        let rows = statement.query_map(params![pattern, sql_limit(limit)], place_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn place(&self, id: &str) -> Result<Option<Place>, Self::Error> {
        let sql = format!("SELECT {PLACE_COLUMNS} FROM places WHERE id = ?1");
        let connection = self.connection();
        let mut statement = connection.prepare(&sql)?;
        let mut rows = statement.query_map(params![id], place_from_row)?;
        Ok(rows.next().transpose()?)
    }

    fn popular(&self, limit: usize) -> Result<Vec<Place>, Self::Error> {
        let sql = format!(
            "SELECT {PLACE_COLUMNS} FROM places ORDER BY usage_count DESC, id LIMIT ?1"
        );
        let connection = self.connection();
        let mut statement = connection.prepare(&sql)?;
        let rows = statement.query_map(params![sql_limit(limit)], place_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn place_from_row(row: &Row<'_>) -> rusqlite::Result<Place> {
    let category: String = row.get(5)?;
    Ok(Place {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        location: Coordinate::new(row.get(3)?, row.get(4)?),
        category: category.parse().unwrap_or_default(),
        rating: row.get(6)?,
        price_level: row.get(7)?,
        description: row.get(8)?,
        image_url: row.get(9)?,
        area_code: row.get(10)?,
    })
}
