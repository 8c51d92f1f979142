//! Question bank repository contracts and SQLite implementation (topic store).
//!
//! # Responsibility
//! - Persist questions with their answer options.
//! - Maintain per-user per-question correct/attempt counters.
//!
//! # Invariants
//! - A question and its answers are written in one transaction.
//! - Counter updates for one quiz session are applied in one transaction.
//! - Counters only ever grow; `correct_count <= attempt_count`.

use super::{bool_to_int, int_to_bool, RepoError, RepoResult};
use crate::model::question::{AnswerOption, NewQuestion, QuestionId, QuestionPerformance};
use crate::model::stats::{Attempt, QuestionStat};
use crate::model::user::UserId;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

/// Repository interface for one topic's question bank.
pub trait QuestionRepository {
    /// Inserts questions with their options and returns their ids in input order.
    fn insert_questions(&mut self, questions: &[NewQuestion]) -> RepoResult<Vec<QuestionId>>;
    /// Lists every question joined with the user's counters (zero when unseen).
    fn list_performance(&self, user_id: UserId) -> RepoResult<Vec<QuestionPerformance>>;
    /// Lists answer options of one question ordered by id.
    fn list_answers(&self, question_id: QuestionId) -> RepoResult<Vec<AnswerOption>>;
    /// Applies one session's attempts to the user's counters.
    fn record_attempts(&mut self, user_id: UserId, attempts: &[Attempt]) -> RepoResult<()>;
    /// Lists the user's counters for every question they attempted.
    fn list_user_stats(&self, user_id: UserId) -> RepoResult<Vec<QuestionStat>>;
    /// Returns the number of questions in the bank.
    fn count_questions(&self) -> RepoResult<u32>;
}

/// SQLite-backed question bank repository.
pub struct SqliteQuestionRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteQuestionRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl QuestionRepository for SqliteQuestionRepository<'_> {
    fn insert_questions(&mut self, questions: &[NewQuestion]) -> RepoResult<Vec<QuestionId>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut ids = Vec::with_capacity(questions.len());

        for question in questions {
            tx.execute(
                "INSERT INTO questions (prompt) VALUES (?1);",
                [question.prompt.as_str()],
            )?;
            let question_id = tx.last_insert_rowid();
            for answer in &question.answers {
                tx.execute(
                    "INSERT INTO answers (question_id, text, is_correct) VALUES (?1, ?2, ?3);",
                    params![question_id, answer.text.as_str(), bool_to_int(answer.is_correct)],
                )?;
            }
            ids.push(question_id);
        }

        tx.commit()?;
        Ok(ids)
    }

    fn list_performance(&self, user_id: UserId) -> RepoResult<Vec<QuestionPerformance>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                q.question_id,
                q.prompt,
                COALESCE(s.correct_count, 0) AS correct_count,
                COALESCE(s.attempt_count, 0) AS attempt_count
             FROM questions q
             LEFT JOIN question_stats s
               ON s.question_id = q.question_id
              AND s.user_id = ?1
             ORDER BY q.question_id ASC;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(QuestionPerformance {
                question_id: row.get("question_id")?,
                prompt: row.get("prompt")?,
                correct_count: row.get("correct_count")?,
                attempt_count: row.get("attempt_count")?,
            });
        }
        Ok(items)
    }

    fn list_answers(&self, question_id: QuestionId) -> RepoResult<Vec<AnswerOption>> {
        let mut stmt = self.conn.prepare(
            "SELECT answer_id, text, is_correct
             FROM answers
             WHERE question_id = ?1
             ORDER BY answer_id ASC;",
        )?;
        let mut rows = stmt.query([question_id])?;
        let mut answers = Vec::new();
        while let Some(row) = rows.next()? {
            answers.push(AnswerOption {
                id: row.get("answer_id")?,
                text: row.get("text")?,
                is_correct: int_to_bool(row.get("is_correct")?, "answers.is_correct")?,
            });
        }
        Ok(answers)
    }

    fn record_attempts(&mut self, user_id: UserId, attempts: &[Attempt]) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        for attempt in attempts {
            if !question_exists_in_tx(&tx, attempt.question_id)? {
                return Err(RepoError::NotFound(format!(
                    "question {}",
                    attempt.question_id
                )));
            }

            tx.execute(
                "INSERT INTO question_stats (user_id, question_id, correct_count, attempt_count)
                 VALUES (?1, ?2, ?3, 1)
                 ON CONFLICT (user_id, question_id) DO UPDATE SET
                    correct_count = correct_count + excluded.correct_count,
                    attempt_count = attempt_count + 1,
                    last_updated = (strftime('%s', 'now') * 1000);",
                params![user_id, attempt.question_id, bool_to_int(attempt.correct)],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn list_user_stats(&self, user_id: UserId) -> RepoResult<Vec<QuestionStat>> {
        let mut stmt = self.conn.prepare(
            "SELECT question_id, correct_count, attempt_count
             FROM question_stats
             WHERE user_id = ?1
             ORDER BY question_id ASC;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut stats = Vec::new();
        while let Some(row) = rows.next()? {
            stats.push(QuestionStat {
                question_id: row.get("question_id")?,
                correct_count: row.get("correct_count")?,
                attempt_count: row.get("attempt_count")?,
            });
        }
        Ok(stats)
    }

    fn count_questions(&self) -> RepoResult<u32> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM questions;", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn question_exists_in_tx(tx: &Transaction<'_>, question_id: QuestionId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM questions WHERE question_id = ?1);",
        [question_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
