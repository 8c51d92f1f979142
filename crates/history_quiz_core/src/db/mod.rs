//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the main store and topic stores.
//! - Apply the schema migrations that belong to each store kind.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write quiz data before migrations succeed.
//! - A main store and a topic store never share a schema.

use std::path::PathBuf;
use thiserror::Error;

pub mod migrations;
mod open;

pub use migrations::StoreSchema;
pub use open::{open_db, open_db_in_memory, open_existing_db};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to create store directory `{}`: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file is not a {schema} store")]
    NotAStore { schema: StoreSchema },
    #[error("{schema} store schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        schema: StoreSchema,
        db_version: u32,
        latest_supported: u32,
    },
}
