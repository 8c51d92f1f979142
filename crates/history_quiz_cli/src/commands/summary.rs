//! The `history-quiz summary` command.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, CellAlignment, Table};
use history_quiz_core::{QuizApp, TopicStats};
use serde::Serialize;

use crate::format::{percent, timestamp};

#[derive(Serialize)]
struct SummaryJson<'a> {
    username: &'a str,
    topics: &'a [TopicStats],
}

pub fn execute(app: &QuizApp, username: &str, json: bool) -> Result<()> {
    let username = username.trim();
    let topics = app.summary(username)?;

    if json {
        let body = SummaryJson {
            username,
            topics: &topics,
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if topics.is_empty() {
        println!("No summary data found. Try taking a quiz first.");
        return Ok(());
    }

    println!("RAG Summary for {username}:");
    println!("{}", render_table(&topics));
    Ok(())
}

fn render_table(topics: &[TopicStats]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Topic", "G", "A", "R", "Updated"]);

    for stats in topics {
        table.add_row(vec![
            stats.topic.clone(),
            percent(stats.summary.pct_green),
            percent(stats.summary.pct_amber),
            percent(stats.summary.pct_red),
            timestamp(stats.updated_at),
        ]);
    }

    for index in 1..=3 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}
