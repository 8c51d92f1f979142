//! The `history-quiz quiz` command: a terminal quiz loop over stdin.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use history_quiz_core::{QuizApp, QuizMode};

use crate::format::percent;

pub fn execute(
    app: &QuizApp,
    username: &str,
    topic: &str,
    count: Option<u32>,
    all: bool,
) -> Result<()> {
    let mode = if all {
        QuizMode::All
    } else {
        QuizMode::Count(count.unwrap_or(0))
    };

    let mut session = app.start_quiz(username, topic, mode, &mut rand::thread_rng())?;
    if session.is_empty() {
        println!("No questions found in topic '{}'.", topic.trim());
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut line = Vec::new();

    while let Some(question) = session.current() {
        println!("Q{}: {}", session.position() + 1, question.prompt);
        for (index, answer) in question.answers.iter().enumerate() {
            println!("  {}) {}", index + 1, answer.text);
        }
        print!("Your answer (number): ");
        stdout.flush()?;

        line.clear();
        let choice = match input.read_until(b'\n', &mut line)? {
            0 => None,
            _ => parse_choice(&String::from_utf8_lossy(&line)),
        };
        let correct = match choice {
            Some(choice) => session.answer(choice)?,
            None => {
                session.answer_wrong()?;
                false
            }
        };
        println!("{}", if correct { "Correct!" } else { "Wrong." });
        println!();
    }

    let outcome = app.finish_quiz(&session)?;
    println!(
        "Quiz complete: you answered {}/{} correctly.",
        outcome.correct, outcome.total
    );
    println!(
        "Topic mastery: G={}  A={}  R={}",
        percent(outcome.summary.pct_green),
        percent(outcome.summary.pct_amber),
        percent(outcome.summary.pct_red)
    );
    Ok(())
}

/// Maps a 1-based option number to an index; anything else is no choice.
fn parse_choice(input: &str) -> Option<usize> {
    input.trim().parse::<usize>().ok()?.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::parse_choice;

    #[test]
    fn parse_choice_is_one_based() {
        assert_eq!(parse_choice("1"), Some(0));
        assert_eq!(parse_choice(" 4 \n"), Some(3));
    }

    #[test]
    fn parse_choice_rejects_zero_and_garbage() {
        assert_eq!(parse_choice("0"), None);
        assert_eq!(parse_choice("-1"), None);
        assert_eq!(parse_choice("b"), None);
        assert_eq!(parse_choice(""), None);
    }
}
