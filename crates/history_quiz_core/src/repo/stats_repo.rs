//! Answer history and RAG summary repository (main store).
//!
//! # Invariants
//! - History rows are append-only.
//! - There is at most one summary row per (user, topic); writes replace it.

use super::{bool_to_int, int_to_bool, RepoResult};
use crate::model::stats::{Attempt, HistoryEntry, RagSummary, TopicStats};
use crate::model::user::UserId;
use rusqlite::{params, Connection, TransactionBehavior};

/// Repository interface for cross-topic answer history and topic summaries.
pub trait StatsRepository {
    /// Appends one history row per attempt.
    fn append_history(&mut self, user_id: UserId, topic: &str, attempts: &[Attempt])
        -> RepoResult<()>;
    /// Inserts or replaces the user's RAG summary for `topic`.
    fn upsert_topic_stats(&self, user_id: UserId, topic: &str, summary: &RagSummary)
        -> RepoResult<()>;
    /// Lists the user's topic summaries ordered by topic.
    fn list_topic_stats(&self, user_id: UserId) -> RepoResult<Vec<TopicStats>>;
    /// Lists the user's most recent answers, newest first.
    fn recent_history(&self, user_id: UserId, limit: u32) -> RepoResult<Vec<HistoryEntry>>;
}

/// SQLite-backed stats repository.
pub struct SqliteStatsRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteStatsRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl StatsRepository for SqliteStatsRepository<'_> {
    fn append_history(
        &mut self,
        user_id: UserId,
        topic: &str,
        attempts: &[Attempt],
    ) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO answer_history (user_id, topic, question_id, was_correct)
                 VALUES (?1, ?2, ?3, ?4);",
            )?;
            for attempt in attempts {
                stmt.execute(params![
                    user_id,
                    topic,
                    attempt.question_id,
                    bool_to_int(attempt.correct)
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn upsert_topic_stats(
        &self,
        user_id: UserId,
        topic: &str,
        summary: &RagSummary,
    ) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO user_topic_stats (user_id, topic, pct_green, pct_amber, pct_red)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (user_id, topic) DO UPDATE SET
                pct_green = excluded.pct_green,
                pct_amber = excluded.pct_amber,
                pct_red = excluded.pct_red,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                user_id,
                topic,
                summary.pct_green,
                summary.pct_amber,
                summary.pct_red
            ],
        )?;
        Ok(())
    }

    fn list_topic_stats(&self, user_id: UserId) -> RepoResult<Vec<TopicStats>> {
        let mut stmt = self.conn.prepare(
            "SELECT topic, pct_green, pct_amber, pct_red, updated_at
             FROM user_topic_stats
             WHERE user_id = ?1
             ORDER BY topic ASC;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(TopicStats {
                topic: row.get("topic")?,
                summary: RagSummary {
                    pct_green: row.get("pct_green")?,
                    pct_amber: row.get("pct_amber")?,
                    pct_red: row.get("pct_red")?,
                },
                updated_at: row.get("updated_at")?,
            });
        }
        Ok(items)
    }

    fn recent_history(&self, user_id: UserId, limit: u32) -> RepoResult<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT topic, question_id, was_correct, created_at
             FROM answer_history
             WHERE user_id = ?1
             ORDER BY id DESC
             LIMIT ?2;",
        )?;
        let mut rows = stmt.query(params![user_id, i64::from(limit)])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(HistoryEntry {
                topic: row.get("topic")?,
                question_id: row.get("question_id")?,
                was_correct: int_to_bool(row.get("was_correct")?, "answer_history.was_correct")?,
                created_at: row.get("created_at")?,
            });
        }
        Ok(items)
    }
}
