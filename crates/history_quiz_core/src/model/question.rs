//! Question bank model.
//!
//! # Invariants
//! - A question's answers belong to that question only.
//! - Exactly one option of an imported question is marked correct, but reads
//!   do not enforce it.

use serde::Serialize;

/// Row id of a question inside one topic store.
pub type QuestionId = i64;
/// Row id of an answer option inside one topic store.
pub type AnswerId = i64;

/// One selectable answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub id: AnswerId,
    pub text: String,
    pub is_correct: bool,
}

/// Answer option before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub text: String,
    pub is_correct: bool,
}

/// Question with its options before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub prompt: String,
    pub answers: Vec<NewAnswer>,
}

/// Question with its answer options in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub answers: Vec<AnswerOption>,
}

impl Question {
    /// Returns whether `choice_index` points at a correct option.
    ///
    /// Out-of-range indices are treated as wrong answers.
    pub fn is_correct_choice(&self, choice_index: usize) -> bool {
        self.answers
            .get(choice_index)
            .is_some_and(|answer| answer.is_correct)
    }
}

/// A question joined with one user's counters for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPerformance {
    pub question_id: QuestionId,
    pub prompt: String,
    pub correct_count: u32,
    pub attempt_count: u32,
}

impl QuestionPerformance {
    /// Fraction of correct attempts; `0.0` when never attempted.
    pub fn accuracy(&self) -> f64 {
        accuracy(self.correct_count, self.attempt_count)
    }
}

pub(crate) fn accuracy(correct_count: u32, attempt_count: u32) -> f64 {
    if attempt_count == 0 {
        0.0
    } else {
        f64::from(correct_count) / f64::from(attempt_count)
    }
}
