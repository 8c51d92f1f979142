//! SQLite migration registries and executor.
//!
//! # Responsibility
//! - Register schema migrations per store kind in strictly increasing order.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic within one registry.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MAIN_MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("main/0001_init.sql"),
}];

const TOPIC_MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("topic/0001_init.sql"),
}];

/// Which kind of store a connection holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSchema {
    /// Shared store: users, answer history, per-topic RAG stats.
    Main,
    /// Per-topic store: questions, answers, per-user question counters.
    Topic,
}

impl StoreSchema {
    fn migrations(self) -> &'static [Migration] {
        match self {
            Self::Main => MAIN_MIGRATIONS,
            Self::Topic => TOPIC_MIGRATIONS,
        }
    }

    /// Returns the latest migration version known by this binary.
    pub fn latest_version(self) -> u32 {
        self.migrations()
            .last()
            .map_or(0, |migration| migration.version)
    }

    /// Table whose presence identifies a migrated store of this kind.
    fn marker_table(self) -> &'static str {
        match self {
            Self::Main => "users",
            Self::Topic => "questions",
        }
    }
}

impl Display for StoreSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Topic => f.write_str("topic"),
        }
    }
}

/// Applies all pending migrations for `schema` on the provided connection.
pub fn apply_migrations(conn: &mut Connection, schema: StoreSchema) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = schema.latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            schema,
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in schema.migrations() {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok schema={} from_version={} to_version={}",
        schema, current_version, latest
    );
    Ok(())
}

/// Fails with `NotAStore` unless `conn` was already migrated as `schema`.
///
/// A store at an older version still passes; `apply_migrations` upgrades it.
pub fn ensure_store_schema(conn: &Connection, schema: StoreSchema) -> DbResult<()> {
    let version = current_user_version(conn)?;
    let has_marker: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [schema.marker_table()],
        |row| row.get(0),
    )?;
    if version == 0 || !has_marker {
        return Err(DbError::NotAStore { schema });
    }
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
