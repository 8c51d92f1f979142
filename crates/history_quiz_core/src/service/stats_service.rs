//! Session recording and RAG aggregation.
//!
//! # Invariants
//! - A recorded session updates topic counters before the main store.
//! - The topic summary is recomputed from all of the user's counters in the
//!   topic, not only from the session just recorded.

use crate::model::stats::{Attempt, HistoryEntry, RagSummary, TopicStats};
use crate::model::topic::TopicName;
use crate::model::user::UserId;
use crate::repo::question_repo::QuestionRepository;
use crate::repo::stats_repo::StatsRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service over the main store's stats tables.
pub struct StatsService<S: StatsRepository> {
    repo: S,
}

impl<S: StatsRepository> StatsService<S> {
    pub fn new(repo: S) -> Self {
        Self { repo }
    }

    /// Applies a finished session and returns the refreshed topic summary.
    pub fn record_session<Q>(
        &mut self,
        questions: &mut Q,
        user_id: UserId,
        topic: &TopicName,
        attempts: &[Attempt],
    ) -> RepoResult<RagSummary>
    where
        Q: QuestionRepository + ?Sized,
    {
        questions.record_attempts(user_id, attempts)?;
        self.repo.append_history(user_id, topic.as_str(), attempts)?;

        let stats = questions.list_user_stats(user_id)?;
        let summary = RagSummary::from_stats(&stats);
        self.repo
            .upsert_topic_stats(user_id, topic.as_str(), &summary)?;

        info!(
            "event=stats_update module=service status=ok topic={} attempts={} tracked_questions={} pct_green={:.1} pct_amber={:.1} pct_red={:.1}",
            topic,
            attempts.len(),
            stats.len(),
            summary.pct_green,
            summary.pct_amber,
            summary.pct_red
        );
        Ok(summary)
    }

    /// Lists the user's per-topic summaries.
    pub fn topic_summaries(&self, user_id: UserId) -> RepoResult<Vec<TopicStats>> {
        self.repo.list_topic_stats(user_id)
    }

    /// Lists the user's most recent answers across topics.
    pub fn recent_history(&self, user_id: UserId, limit: u32) -> RepoResult<Vec<HistoryEntry>> {
        self.repo.recent_history(user_id, limit)
    }
}
