//! history-quiz CLI: register, take quizzes, import question banks and
//! view red/amber/green mastery summaries.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use history_quiz_core::{
    default_log_level, init_logging, AppPaths, QuizApp, QuizError, ValidationError,
};
use log::info;

mod commands;
mod format;

#[derive(Parser)]
#[command(name = "history-quiz", version, about = "History Quiz CLI")]
struct Cli {
    /// Directory holding main.db, topics/ and logs/
    #[arg(long, global = true, env = "HQ_DATA_ROOT")]
    data_root: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "HQ_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user
    Register {
        /// Username to register
        username: String,
    },

    /// View your RAG summary
    Summary {
        /// Your username
        username: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Take a quiz on a topic
    Quiz {
        /// Your username
        username: String,

        /// Topic name (file name without .db)
        topic: String,

        #[command(flatten)]
        size: QuizSize,
    },

    /// Import topic questions from a CSV file
    Import {
        /// Topic name (the store is named <topic>.db)
        #[arg(long)]
        topic: String,

        /// CSV with headers question,a,b,c,d,correct
        #[arg(long)]
        csv: PathBuf,
    },

    /// List available topics
    Topics,

    /// Show your most recent answers
    History {
        /// Your username
        username: String,

        /// Number of answers to show
        #[arg(long, default_value = "20")]
        limit: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Upper bound for `quiz --count`; questions repeat to fill a session.
const MAX_QUIZ_QUESTIONS: i64 = 1000;

#[derive(Args)]
#[group(required = true, multiple = false)]
struct QuizSize {
    /// Number of questions to ask
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_QUIZ_QUESTIONS))]
    count: Option<u32>,

    /// Ask all questions
    #[arg(long)]
    all: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = AppPaths::resolve(cli.data_root)?;
    paths.ensure_dirs()?;

    let level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &paths.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let app = QuizApp::new(paths);
    match cli.command {
        Commands::Register { username } => {
            info!("event=cli_command module=cli status=start command=register");
            commands::register::execute(&app, &username)
        }
        Commands::Summary { username, json } => {
            info!("event=cli_command module=cli status=start command=summary");
            commands::summary::execute(&app, &username, json)
        }
        Commands::Quiz {
            username,
            topic,
            size,
        } => {
            info!("event=cli_command module=cli status=start command=quiz");
            commands::quiz::execute(&app, &username, &topic, size.count, size.all)
        }
        Commands::Import { topic, csv } => {
            info!("event=cli_command module=cli status=start command=import");
            commands::import::execute(&app, &topic, &csv)
        }
        Commands::Topics => {
            info!("event=cli_command module=cli status=start command=topics");
            commands::topics::execute(&app)
        }
        Commands::History {
            username,
            limit,
            json,
        } => {
            info!("event=cli_command module=cli status=start command=history");
            commands::history::execute(&app, &username, limit, json)
        }
    }
}

/// 2 for missing required input, 1 for every other failure.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<QuizError>() {
        Some(QuizError::Validation(ValidationError::EmptyUsername)) => 2,
        _ => 1,
    }
}
