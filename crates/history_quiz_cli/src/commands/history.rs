//! The `history-quiz history` command.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use history_quiz_core::QuizApp;

use crate::format::timestamp;

pub fn execute(app: &QuizApp, username: &str, limit: u32, json: bool) -> Result<()> {
    let entries = app.history(username, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No answers recorded yet. Try taking a quiz first.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["When", "Topic", "Question", "Result"]);
    for entry in &entries {
        table.add_row(vec![
            timestamp(entry.created_at),
            entry.topic.clone(),
            entry.question_id.to_string(),
            if entry.was_correct { "correct" } else { "wrong" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
