//! The `history-quiz topics` command.

use anyhow::Result;
use history_quiz_core::QuizApp;

pub fn execute(app: &QuizApp) -> Result<()> {
    let topics = app.list_topics()?;
    if topics.is_empty() {
        println!(
            "No topics found in {}. Import one with `history-quiz import`.",
            app.paths().topics_dir.display()
        );
        return Ok(());
    }

    println!("Available topics:");
    for topic in &topics {
        match app.question_count(topic) {
            Ok(count) => println!("  • {topic} ({count} questions)"),
            Err(err) => println!("  • {topic} (unreadable: {err})"),
        }
    }
    Ok(())
}
