//! Adaptive question selection.
//!
//! # Responsibility
//! - Order a topic's questions so the user's weakest come first.
//! - Expand or truncate that order to the requested session length.
//! - Attach answer options in random order.
//!
//! # Invariants
//! - Ordering is by (accuracy ascending, question id ascending); questions the
//!   user never attempted have accuracy `0.0` and therefore lead.
//! - `QuizMode::Count(n)` always yields exactly `n` questions for a non-empty
//!   bank, cycling through the ordered list when `n` exceeds its size.
//! - An empty bank yields an empty selection in every mode.

use crate::model::question::{AnswerOption, Question, QuestionId, QuestionPerformance};
use crate::model::user::UserId;
use crate::repo::question_repo::QuestionRepository;
use crate::repo::RepoResult;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// How many questions a session asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    /// Exactly this many questions, repeating weakest-first when needed.
    Count(u32),
    /// Every question in the bank once.
    All,
}

/// Sorts questions weakest-first; ties break on question id.
pub fn order_by_weakness(mut items: Vec<QuestionPerformance>) -> Vec<QuestionPerformance> {
    items.sort_by(|a, b| {
        a.accuracy()
            .total_cmp(&b.accuracy())
            .then_with(|| a.question_id.cmp(&b.question_id))
    });
    items
}

/// Applies `mode` to an already ordered list.
pub fn fill_to_count<T: Clone>(ordered: &[T], mode: QuizMode) -> Vec<T> {
    match mode {
        QuizMode::All => ordered.to_vec(),
        QuizMode::Count(_) if ordered.is_empty() => Vec::new(),
        QuizMode::Count(count) => ordered.iter().cycle().take(count as usize).cloned().collect(),
    }
}

/// Builds the question list for one session.
///
/// Each occurrence of a question gets its own shuffle of the answer options.
pub fn select_questions<R, G>(
    repo: &R,
    user_id: UserId,
    mode: QuizMode,
    rng: &mut G,
) -> RepoResult<Vec<Question>>
where
    R: QuestionRepository + ?Sized,
    G: Rng + ?Sized,
{
    let ordered = order_by_weakness(repo.list_performance(user_id)?);
    let selected = fill_to_count(&ordered, mode);

    let mut answers_by_id: HashMap<QuestionId, Vec<AnswerOption>> = HashMap::new();
    let mut questions = Vec::with_capacity(selected.len());
    for perf in selected {
        let mut answers = match answers_by_id.entry(perf.question_id) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(repo.list_answers(perf.question_id)?).clone(),
        };
        answers.shuffle(rng);
        questions.push(Question {
            id: perf.question_id,
            prompt: perf.prompt,
            answers,
        });
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::{fill_to_count, order_by_weakness, QuizMode};
    use crate::model::question::QuestionPerformance;

    fn perf(question_id: i64, correct_count: u32, attempt_count: u32) -> QuestionPerformance {
        QuestionPerformance {
            question_id,
            prompt: format!("q{question_id}"),
            correct_count,
            attempt_count,
        }
    }

    fn ids(items: &[QuestionPerformance]) -> Vec<i64> {
        items.iter().map(|p| p.question_id).collect()
    }

    #[test]
    fn weakest_and_unseen_questions_come_first() {
        let ordered = order_by_weakness(vec![
            perf(1, 5, 5),
            perf(2, 1, 2),
            perf(3, 0, 0),
            perf(4, 0, 3),
            perf(5, 3, 4),
        ]);
        assert_eq!(ids(&ordered), vec![3, 4, 2, 5, 1]);
    }

    #[test]
    fn equal_accuracy_breaks_ties_by_id() {
        let ordered = order_by_weakness(vec![perf(9, 1, 2), perf(2, 2, 4), perf(5, 0, 0)]);
        assert_eq!(ids(&ordered), vec![5, 2, 9]);
    }

    #[test]
    fn count_smaller_than_bank_truncates() {
        assert_eq!(fill_to_count(&[1, 2, 3], QuizMode::Count(2)), vec![1, 2]);
    }

    #[test]
    fn count_larger_than_bank_cycles() {
        assert_eq!(
            fill_to_count(&[1, 2], QuizMode::Count(5)),
            vec![1, 2, 1, 2, 1]
        );
    }

    #[test]
    fn count_zero_and_empty_bank_yield_nothing() {
        assert!(fill_to_count(&[1, 2], QuizMode::Count(0)).is_empty());
        assert!(fill_to_count::<i32>(&[], QuizMode::Count(3)).is_empty());
        assert!(fill_to_count::<i32>(&[], QuizMode::All).is_empty());
    }

    #[test]
    fn all_returns_each_question_once() {
        assert_eq!(fill_to_count(&[3, 1, 2], QuizMode::All), vec![3, 1, 2]);
    }
}
