//! Answer events and red/amber/green mastery model.
//!
//! # Invariants
//! - `accuracy >= GREEN_THRESHOLD` is green, `>= AMBER_THRESHOLD` is amber,
//!   anything lower (including never answered correctly) is red.
//! - `RagSummary` percentages sum to 100 when at least one question was
//!   attempted, and are all zero otherwise.

use super::question::{accuracy, QuestionId};
use serde::Serialize;

/// Minimum accuracy for a question to count as mastered.
pub const GREEN_THRESHOLD: f64 = 0.8;
/// Minimum accuracy for a question to count as partially known.
pub const AMBER_THRESHOLD: f64 = 0.5;

/// Outcome of answering one question once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub question_id: QuestionId,
    pub correct: bool,
}

/// One user's accumulated counters for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionStat {
    pub question_id: QuestionId,
    pub correct_count: u32,
    pub attempt_count: u32,
}

impl QuestionStat {
    pub fn accuracy(&self) -> f64 {
        accuracy(self.correct_count, self.attempt_count)
    }

    pub fn band(&self) -> RagBand {
        RagBand::classify(self.accuracy())
    }
}

/// Mastery bucket for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RagBand {
    Green,
    Amber,
    Red,
}

impl RagBand {
    /// Buckets an accuracy ratio in `0.0..=1.0`.
    pub fn classify(accuracy: f64) -> Self {
        if accuracy >= GREEN_THRESHOLD {
            Self::Green
        } else if accuracy >= AMBER_THRESHOLD {
            Self::Amber
        } else {
            Self::Red
        }
    }
}

/// Share of a topic's attempted questions in each band, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RagSummary {
    pub pct_green: f64,
    pub pct_amber: f64,
    pub pct_red: f64,
}

impl RagSummary {
    /// Folds per-question counters into band percentages.
    pub fn from_stats(stats: &[QuestionStat]) -> Self {
        let (mut green, mut amber, mut red) = (0u32, 0u32, 0u32);
        for stat in stats {
            match stat.band() {
                RagBand::Green => green += 1,
                RagBand::Amber => amber += 1,
                RagBand::Red => red += 1,
            }
        }

        let total = green + amber + red;
        if total == 0 {
            return Self::default();
        }

        let pct = |count: u32| f64::from(count) / f64::from(total) * 100.0;
        Self {
            pct_green: pct(green),
            pct_amber: pct(amber),
            pct_red: pct(red),
        }
    }
}

/// Persisted RAG summary of one user in one topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicStats {
    pub topic: String,
    #[serde(flatten)]
    pub summary: RagSummary,
    /// Epoch milliseconds of the last recompute.
    pub updated_at: i64,
}

/// One row of the cross-topic answer log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub topic: String,
    pub question_id: QuestionId,
    pub was_correct: bool,
    /// Epoch milliseconds.
    pub created_at: i64,
}
