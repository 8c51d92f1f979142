//! Use-case facade over the main store and topic stores.
//!
//! # Responsibility
//! - Map usernames and topic names onto store files and row ids.
//! - Open a fresh connection per use-case and wire repositories to services.
//!
//! # Invariants
//! - The main store is created (and migrated) on first use.
//! - Topic stores are only created and initialized by imports; quiz, stats and
//!   listing paths require an existing, already initialized topic store file.

use crate::config::AppPaths;
use crate::db::{open_db, open_existing_db, DbError, StoreSchema};
use crate::error::{QuizError, QuizResult};
use crate::model::stats::{Attempt, HistoryEntry, RagSummary, TopicStats};
use crate::model::topic::TopicName;
use crate::model::user::{normalize_username, User, UserId};
use crate::repo::question_repo::{QuestionRepository, SqliteQuestionRepository};
use crate::repo::stats_repo::SqliteStatsRepository;
use crate::repo::user_repo::SqliteUserRepository;
use crate::service::import_service::{parse_questions_csv, ImportReport};
use crate::service::selection::{select_questions, QuizMode};
use crate::service::stats_service::StatsService;
use crate::service::user_service::UserService;
use crate::session::QuizSession;
use log::{info, warn};
use rand::Rng;
use rusqlite::Connection;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Outcome of a recorded quiz session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizOutcome {
    pub correct: usize,
    pub total: usize,
    pub summary: RagSummary,
}

/// Entry point for every quiz use-case.
#[derive(Debug, Clone)]
pub struct QuizApp {
    paths: AppPaths,
}

impl QuizApp {
    pub fn new(paths: AppPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Registers a new user in the main store.
    pub fn register_user(&self, username: &str) -> QuizResult<User> {
        let conn = self.open_main()?;
        let user = UserService::new(SqliteUserRepository::new(&conn)).register(username)?;
        info!("event=user_register module=app status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Returns the user's per-topic RAG summaries, possibly empty.
    pub fn summary(&self, username: &str) -> QuizResult<Vec<TopicStats>> {
        let mut conn = self.open_main()?;
        let user_id = UserService::new(SqliteUserRepository::new(&conn)).require_user_id(username)?;
        let stats = StatsService::new(SqliteStatsRepository::new(&mut conn));
        Ok(stats.topic_summaries(user_id)?)
    }

    /// Returns the user's most recent answers across all topics.
    pub fn history(&self, username: &str, limit: u32) -> QuizResult<Vec<HistoryEntry>> {
        let mut conn = self.open_main()?;
        let user_id = UserService::new(SqliteUserRepository::new(&conn)).require_user_id(username)?;
        let stats = StatsService::new(SqliteStatsRepository::new(&mut conn));
        Ok(stats.recent_history(user_id, limit)?)
    }

    /// Lists topic names that have a store in the topics directory.
    pub fn list_topics(&self) -> QuizResult<Vec<String>> {
        self.paths.ensure_dirs()?;
        let entries = match std::fs::read_dir(&self.paths.topics_dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "event=topic_list module=app status=error error_code=read_dir_failed error={}",
                    err
                );
                return Ok(Vec::new());
            }
        };

        let mut topics: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "db"))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .filter(|stem| TopicName::parse(stem).is_ok())
            .collect();
        topics.sort();
        Ok(topics)
    }

    /// Builds a quiz session for `username` on `topic`.
    ///
    /// An empty question bank yields an empty session.
    pub fn start_quiz<G: Rng + ?Sized>(
        &self,
        username: &str,
        topic: &str,
        mode: QuizMode,
        rng: &mut G,
    ) -> QuizResult<QuizSession> {
        let topic = TopicName::parse(topic)?;
        let username = normalize_username(username)?;
        let user_id = {
            let conn = self.open_main()?;
            let users = UserService::new(SqliteUserRepository::new(&conn));
            users.require_user_id(&username)?
        };

        let mut topic_conn = self.open_existing_topic(&topic)?;
        let repo = SqliteQuestionRepository::new(&mut topic_conn);
        let questions = select_questions(&repo, user_id, mode, rng)?;

        info!(
            "event=quiz_start module=app status=ok topic={} mode={:?} questions={}",
            topic,
            mode,
            questions.len()
        );
        Ok(QuizSession::new(username, user_id, topic, questions))
    }

    /// Records a finished (or abandoned) session's answers.
    pub fn finish_quiz(&self, session: &QuizSession) -> QuizResult<QuizOutcome> {
        let mut main_conn = self.open_main()?;
        let summary = self.record_attempts(
            &mut main_conn,
            session.user_id(),
            session.topic(),
            session.results(),
        )?;
        Ok(QuizOutcome {
            correct: session.correct_count(),
            total: session.results().len(),
            summary,
        })
    }

    /// Applies answer outcomes to topic counters, history and the RAG summary.
    pub fn update_stats(
        &self,
        username: &str,
        topic: &str,
        attempts: &[Attempt],
    ) -> QuizResult<RagSummary> {
        let topic = TopicName::parse(topic)?;
        let mut main_conn = self.open_main()?;
        let user_id =
            UserService::new(SqliteUserRepository::new(&main_conn)).require_user_id(username)?;
        self.record_attempts(&mut main_conn, user_id, &topic, attempts)
    }

    /// Imports questions from a CSV file, creating the topic store if needed.
    pub fn import_csv(&self, topic: &str, csv_path: &Path) -> QuizResult<ImportReport> {
        let topic = TopicName::parse(topic)?;
        if !csv_path.is_file() {
            return Err(QuizError::CsvNotFound(csv_path.to_path_buf()));
        }

        let file = File::open(csv_path).map_err(csv::Error::from)?;
        let parsed = parse_questions_csv(file)?;

        self.paths.ensure_dirs()?;
        let db_path = self.paths.topic_db_path(&topic);
        let mut conn = open_db(&db_path, StoreSchema::Topic)?;
        let mut repo = SqliteQuestionRepository::new(&mut conn);
        let inserted = repo.insert_questions(&parsed.questions)?.len();

        info!(
            "event=csv_import module=app status=ok topic={} inserted={} skipped={}",
            topic, inserted, parsed.skipped
        );
        Ok(ImportReport {
            topic: topic.to_string(),
            db_path,
            inserted,
            skipped: parsed.skipped,
        })
    }

    /// Number of questions in an existing topic store.
    pub fn question_count(&self, topic: &str) -> QuizResult<u32> {
        let topic = TopicName::parse(topic)?;
        let mut conn = self.open_existing_topic(&topic)?;
        Ok(SqliteQuestionRepository::new(&mut conn).count_questions()?)
    }

    fn record_attempts(
        &self,
        main_conn: &mut Connection,
        user_id: UserId,
        topic: &TopicName,
        attempts: &[Attempt],
    ) -> QuizResult<RagSummary> {
        let mut topic_conn = self.open_existing_topic(topic)?;
        let mut questions = SqliteQuestionRepository::new(&mut topic_conn);
        let mut stats = StatsService::new(SqliteStatsRepository::new(main_conn));
        Ok(stats.record_session(&mut questions, user_id, topic, attempts)?)
    }

    fn open_main(&self) -> QuizResult<Connection> {
        self.paths.ensure_dirs()?;
        Ok(open_db(&self.paths.main_db, StoreSchema::Main)?)
    }

    fn open_existing_topic(&self, topic: &TopicName) -> QuizResult<Connection> {
        let path: PathBuf = self.paths.topic_db_path(topic);
        if !path.is_file() {
            return Err(QuizError::TopicNotFound(path));
        }
        open_existing_db(&path, StoreSchema::Topic).map_err(|err| match err {
            DbError::NotAStore { .. } => QuizError::InvalidTopicStore(path),
            other => QuizError::from(other),
        })
    }
}
