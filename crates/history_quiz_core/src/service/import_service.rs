//! CSV question bank intake.
//!
//! # Responsibility
//! - Parse `question,a,b,c,d,correct` CSV files into new questions.
//! - Skip malformed rows instead of failing the whole import.
//!
//! # Invariants
//! - Every accepted row yields exactly four options, one of them correct.
//! - `correct` is a 1-based option number in `1..=4`.
//! - Text fields are trimmed before persistence.

use crate::error::{QuizError, QuizResult};
use crate::model::question::{NewAnswer, NewQuestion};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

/// Header names every import file must carry.
pub const REQUIRED_HEADERS: [&str; 6] = ["question", "a", "b", "c", "d", "correct"];
const OPTION_HEADERS: [&str; 4] = ["a", "b", "c", "d"];

/// Rows accepted and rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestions {
    pub questions: Vec<NewQuestion>,
    pub skipped: usize,
}

/// Result of importing a CSV file into a topic store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub topic: String,
    pub db_path: PathBuf,
    pub inserted: usize,
    pub skipped: usize,
}

/// Parses question rows from CSV input.
///
/// Fails only when headers are missing or the input is not readable CSV.
pub fn parse_questions_csv<R: Read>(reader: R) -> QuizResult<ParsedQuestions> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    let columns = HeaderColumns::locate(&headers)?;

    let mut parsed = ParsedQuestions {
        questions: Vec::new(),
        skipped: 0,
    };
    for record in reader.records() {
        match columns.to_question(&record?) {
            Some(question) => parsed.questions.push(question),
            None => parsed.skipped += 1,
        }
    }
    Ok(parsed)
}

struct HeaderColumns {
    question: usize,
    options: [usize; 4],
    correct: usize,
}

impl HeaderColumns {
    fn locate(headers: &StringRecord) -> QuizResult<Self> {
        let names: Vec<&str> = headers
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').trim())
            .collect();
        let position = |wanted: &str| names.iter().position(|name| *name == wanted);

        let missing: Vec<&'static str> = REQUIRED_HEADERS
            .into_iter()
            .filter(|header| position(*header).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(QuizError::MissingHeaders { missing });
        }

        let mut options = [0usize; 4];
        for (slot, header) in options.iter_mut().zip(OPTION_HEADERS) {
            *slot = position(header).unwrap_or_default();
        }
        Ok(Self {
            question: position("question").unwrap_or_default(),
            options,
            correct: position("correct").unwrap_or_default(),
        })
    }

    fn to_question(&self, record: &StringRecord) -> Option<NewQuestion> {
        let field = |index: usize| record.get(index).map(str::trim).unwrap_or_default();

        let prompt = field(self.question);
        if prompt.is_empty() {
            return None;
        }

        let texts = self.options.map(field);
        if texts.iter().any(|text| text.is_empty()) {
            return None;
        }

        let correct = field(self.correct).parse::<usize>().ok()?;
        if !(1..=texts.len()).contains(&correct) {
            return None;
        }

        Some(NewQuestion {
            prompt: prompt.to_string(),
            answers: texts
                .iter()
                .enumerate()
                .map(|(index, text)| NewAnswer {
                    text: (*text).to_string(),
                    is_correct: index + 1 == correct,
                })
                .collect(),
        })
    }
}
