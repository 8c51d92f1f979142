//! The `history-quiz register` command.

use anyhow::Result;
use history_quiz_core::QuizApp;

pub fn execute(app: &QuizApp, username: &str) -> Result<()> {
    let user = app.register_user(username)?;
    println!("Registered new user: {}", user.username);
    Ok(())
}
