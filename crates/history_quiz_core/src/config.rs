//! Data directory resolution.
//!
//! # Responsibility
//! - Resolve where the main store, topic stores and logs live.
//! - Apply environment overrides on top of per-platform defaults.
//!
//! # Invariants
//! - `main_db`, `topics_dir` and `log_dir` default to children of `data_root`.
//! - Empty environment values are treated as unset.

use crate::model::topic::TopicName;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Overrides the data root directory.
pub const DATA_ROOT_ENV: &str = "HQ_DATA_ROOT";
/// Overrides the main store file path.
pub const MAIN_DB_ENV: &str = "MAIN_DB_PATH";
/// Overrides the topic store directory.
pub const TOPICS_DIR_ENV: &str = "TOPICS_DIR";

const APP_DIR_NAME: &str = "history_quiz";
const WINDOWS_ORG_DIR_NAME: &str = "ForbesComputing";
const MAIN_DB_FILE_NAME: &str = "main.db";
const TOPICS_DIR_NAME: &str = "topics";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot resolve a per-user data directory; set HQ_DATA_ROOT")]
    NoDataDir,
    #[error("failed to create directory `{}`: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolved on-disk locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub main_db: PathBuf,
    pub topics_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    /// Resolves paths from the process environment and platform defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(None)
    }

    /// Resolves paths, preferring `data_root` over `HQ_DATA_ROOT` when given.
    ///
    /// `MAIN_DB_PATH` and `TOPICS_DIR` still apply on top of either root.
    pub fn resolve(data_root: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::resolve_with(data_root, |key| std::env::var_os(key))
    }

    fn resolve_with<F>(data_root: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let env_path = |key: &str| env(key).filter(|value| !value.is_empty()).map(PathBuf::from);
        let data_root = match data_root.or_else(|| env_path(DATA_ROOT_ENV)) {
            Some(root) => root,
            None => default_data_root().ok_or(ConfigError::NoDataDir)?,
        };
        Ok(Self::from_parts(
            data_root,
            env_path(MAIN_DB_ENV),
            env_path(TOPICS_DIR_ENV),
        ))
    }

    /// Derives every location from a single root directory.
    pub fn with_data_root(data_root: impl Into<PathBuf>) -> Self {
        Self::from_parts(data_root.into(), None, None)
    }

    fn from_parts(data_root: PathBuf, main_db: Option<PathBuf>, topics_dir: Option<PathBuf>) -> Self {
        Self {
            main_db: main_db.unwrap_or_else(|| data_root.join(MAIN_DB_FILE_NAME)),
            topics_dir: topics_dir.unwrap_or_else(|| data_root.join(TOPICS_DIR_NAME)),
            log_dir: data_root.join(LOG_DIR_NAME),
            data_root,
        }
    }

    /// Creates the data root, topics and log directories if missing.
    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        for dir in [&self.data_root, &self.topics_dir, &self.log_dir] {
            create_dir(dir)?;
        }
        if let Some(parent) = self.main_db.parent() {
            create_dir(parent)?;
        }
        Ok(())
    }

    /// Path of the store holding `topic`'s question bank.
    pub fn topic_db_path(&self, topic: &TopicName) -> PathBuf {
        self.topics_dir.join(topic.file_name())
    }
}

/// Per-user, writable default location for application data.
///
/// - Windows: `%LOCALAPPDATA%\ForbesComputing\history_quiz`
/// - macOS: `~/Library/Application Support/history_quiz`
/// - Linux/other: `$XDG_DATA_HOME/history_quiz` (or `~/.local/share/history_quiz`)
pub fn default_data_root() -> Option<PathBuf> {
    if cfg!(windows) {
        dirs::data_local_dir().map(|base| base.join(WINDOWS_ORG_DIR_NAME).join(APP_DIR_NAME))
    } else {
        dirs::data_dir().map(|base| base.join(APP_DIR_NAME))
    }
}

fn create_dir(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|source| ConfigError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
