//! Core domain logic for History Quiz.
//! This crate is the single source of truth for quiz rules and storage.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use app::{QuizApp, QuizOutcome};
pub use config::{AppPaths, ConfigError};
pub use error::{QuizError, QuizResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::question::{AnswerOption, Question, QuestionId};
pub use model::stats::{Attempt, HistoryEntry, RagBand, RagSummary, TopicStats};
pub use model::topic::TopicName;
pub use model::user::{User, UserId};
pub use model::ValidationError;
pub use repo::{RepoError, RepoResult};
pub use service::import_service::ImportReport;
pub use service::selection::QuizMode;
pub use session::QuizSession;

