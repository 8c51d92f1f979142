//! In-progress quiz session.
//!
//! # Responsibility
//! - Walk a fixed question list one answer at a time.
//! - Collect per-question outcomes for later stats recording.
//!
//! # Invariants
//! - `results().len()` always equals the number of answered questions.
//! - A finished session rejects further answers.

use crate::error::{QuizError, QuizResult};
use crate::model::question::Question;
use crate::model::stats::Attempt;
use crate::model::topic::TopicName;
use crate::model::user::UserId;

/// Quiz state for one user working through one topic.
#[derive(Debug, Clone)]
pub struct QuizSession {
    username: String,
    user_id: UserId,
    topic: TopicName,
    questions: Vec<Question>,
    index: usize,
    results: Vec<Attempt>,
}

impl QuizSession {
    pub fn new(
        username: impl Into<String>,
        user_id: UserId,
        topic: TopicName,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            username: username.into(),
            user_id,
            topic,
            results: Vec::with_capacity(questions.len()),
            questions,
            index: 0,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn topic(&self) -> &TopicName {
        &self.topic
    }

    /// Total number of questions in this session, repeats included.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Zero-based index of the question awaiting an answer.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn is_done(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// Returns the question awaiting an answer, or `None` when finished.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Records the answer to the current question and advances.
    ///
    /// Returns whether the choice was correct. An out-of-range choice counts
    /// as a wrong answer.
    pub fn answer(&mut self, choice_index: usize) -> QuizResult<bool> {
        let question = self.current().ok_or(QuizError::SessionFinished)?;
        let attempt = Attempt {
            question_id: question.id,
            correct: question.is_correct_choice(choice_index),
        };
        self.record(attempt);
        Ok(attempt.correct)
    }

    /// Records a wrong answer for the current question (unparsable input,
    /// skipped question) and advances.
    pub fn answer_wrong(&mut self) -> QuizResult<()> {
        let question = self.current().ok_or(QuizError::SessionFinished)?;
        let attempt = Attempt {
            question_id: question.id,
            correct: false,
        };
        self.record(attempt);
        Ok(())
    }

    fn record(&mut self, attempt: Attempt) {
        self.results.push(attempt);
        self.index += 1;
    }

    pub fn results(&self) -> &[Attempt] {
        &self.results
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|attempt| attempt.correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::QuizSession;
    use crate::error::QuizError;
    use crate::model::question::{AnswerOption, Question};
    use crate::model::topic::TopicName;

    fn question(id: i64, correct_index: usize) -> Question {
        Question {
            id,
            prompt: format!("question {id}"),
            answers: (0..4)
                .map(|i| AnswerOption {
                    id: id * 10 + i as i64,
                    text: format!("option {i}"),
                    is_correct: i == correct_index,
                })
                .collect(),
        }
    }

    fn session(questions: Vec<Question>) -> QuizSession {
        QuizSession::new("ada", 1, TopicName::parse("tudors").unwrap(), questions)
    }

    #[test]
    fn answering_advances_and_records_outcomes() {
        let mut s = session(vec![question(1, 2), question(2, 0)]);
        assert_eq!(s.current().map(|q| q.id), Some(1));

        assert!(s.answer(2).unwrap());
        assert_eq!(s.position(), 1);
        assert!(!s.answer(3).unwrap());

        assert!(s.is_done());
        assert!(s.current().is_none());
        assert_eq!(s.correct_count(), 1);
        let ids: Vec<_> = s.results().iter().map(|a| a.question_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn out_of_range_choice_is_wrong_but_advances() {
        let mut s = session(vec![question(1, 0)]);
        assert!(!s.answer(99).unwrap());
        assert!(s.is_done());
        assert_eq!(s.results().len(), 1);
    }

    #[test]
    fn answer_wrong_records_incorrect_attempt() {
        let mut s = session(vec![question(5, 0)]);
        s.answer_wrong().unwrap();
        assert!(!s.results()[0].correct);
        assert_eq!(s.results()[0].question_id, 5);
    }

    #[test]
    fn finished_session_rejects_answers() {
        let mut s = session(vec![]);
        assert!(s.is_done());
        assert!(matches!(s.answer(0), Err(QuizError::SessionFinished)));
    }
}
