//! User repository contracts and SQLite implementation (main store).
//!
//! # Invariants
//! - Usernames are unique; a duplicate insert maps to `RepoError::Conflict`.
//! - Callers pass already-normalized usernames.

use super::{RepoError, RepoResult};
use crate::model::user::UserId;
use rusqlite::{Connection, ErrorCode, OptionalExtension};

/// Repository interface for user identity.
pub trait UserRepository {
    /// Inserts a user and returns its new id.
    fn create_user(&self, username: &str) -> RepoResult<UserId>;
    /// Looks up a user id by exact username.
    fn find_user_id(&self, username: &str) -> RepoResult<Option<UserId>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, username: &str) -> RepoResult<UserId> {
        match self
            .conn
            .execute("INSERT INTO users (username) VALUES (?1);", [username])
        {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::Conflict(format!("user `{username}`")))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn find_user_id(&self, username: &str) -> RepoResult<Option<UserId>> {
        let id = self
            .conn
            .query_row(
                "SELECT user_id FROM users WHERE username = ?1;",
                [username],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }
}
