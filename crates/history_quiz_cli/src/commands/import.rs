//! The `history-quiz import` command.

use std::path::Path;

use anyhow::Result;
use history_quiz_core::QuizApp;

pub fn execute(app: &QuizApp, topic: &str, csv: &Path) -> Result<()> {
    let report = app.import_csv(topic, csv)?;
    println!(
        "Imported {} questions into {}",
        report.inserted,
        report.db_path.display()
    );
    if report.skipped > 0 {
        println!("Skipped {} malformed row(s).", report.skipped);
    }
    Ok(())
}
