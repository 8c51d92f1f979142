//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for either store kind.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.
//! - `open_existing_db` never creates a file and never initializes a schema in
//!   a file that does not already hold one.

use super::migrations::{apply_migrations, ensure_store_schema, StoreSchema};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite store file and applies all pending migrations for `schema`.
///
/// Missing parent directories are created first.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>, schema: StoreSchema) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file schema={schema}");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(path).map_err(|err| {
        error!(
            "event=db_open module=db status=error mode=file schema={} duration_ms={} error_code=db_open_failed error={}",
            schema,
            started_at.elapsed().as_millis(),
            err
        );
        DbError::from(err)
    })?;

    finish_open(conn, schema, Bootstrap::Initialize, "file", started_at)
}

/// Opens a store file that must already exist and hold `schema`.
///
/// Older store versions are upgraded. Empty or foreign files are rejected
/// with [`DbError::NotAStore`] and left untouched.
pub fn open_existing_db(path: impl AsRef<Path>, schema: StoreSchema) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=existing schema={schema}");

    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).map_err(|err| {
        error!(
            "event=db_open module=db status=error mode=existing schema={} duration_ms={} error_code=db_open_failed error={}",
            schema,
            started_at.elapsed().as_millis(),
            err
        );
        DbError::from(err)
    })?;

    finish_open(conn, schema, Bootstrap::RequireExisting, "existing", started_at)
}

/// Opens an in-memory SQLite store and applies all pending migrations.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory(schema: StoreSchema) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory schema={schema}");

    let conn = Connection::open_in_memory().map_err(|err| {
        error!(
            "event=db_open module=db status=error mode=memory schema={} duration_ms={} error_code=db_open_failed error={}",
            schema,
            started_at.elapsed().as_millis(),
            err
        );
        DbError::from(err)
    })?;

    finish_open(conn, schema, Bootstrap::Initialize, "memory", started_at)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bootstrap {
    Initialize,
    RequireExisting,
}

fn finish_open(
    mut conn: Connection,
    schema: StoreSchema,
    bootstrap: Bootstrap,
    mode: &str,
    started_at: Instant,
) -> DbResult<Connection> {
    match bootstrap_connection(&mut conn, schema, bootstrap) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} schema={} duration_ms={}",
                mode,
                schema,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} schema={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                schema,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(
    conn: &mut Connection,
    schema: StoreSchema,
    bootstrap: Bootstrap,
) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    if bootstrap == Bootstrap::RequireExisting {
        ensure_store_schema(conn, schema)?;
    }
    apply_migrations(conn, schema)?;
    Ok(())
}
