//! Use-case level error for quiz operations.
//!
//! Wraps lower-layer failures and adds the semantic outcomes callers branch
//! on (unknown user, missing topic store, duplicate registration).

use crate::config::ConfigError;
use crate::db::DbError;
use crate::model::ValidationError;
use crate::repo::RepoError;
use std::path::PathBuf;
use thiserror::Error;

pub type QuizResult<T> = Result<T, QuizError>;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User '{0}' already exists.")]
    UserExists(String),
    #[error("User '{0}' not found. Please register first.")]
    UserNotFound(String),
    #[error("Topic database not found: {}", .0.display())]
    TopicNotFound(PathBuf),
    #[error("Not a topic database: {}", .0.display())]
    InvalidTopicStore(PathBuf),
    #[error("CSV not found: {}", .0.display())]
    CsvNotFound(PathBuf),
    #[error("CSV must have headers: {}", .missing.join(", "))]
    MissingHeaders { missing: Vec<&'static str> },
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("quiz session is already finished")]
    SessionFinished,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<DbError> for QuizError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}
