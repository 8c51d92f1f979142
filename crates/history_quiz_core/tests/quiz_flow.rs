use history_quiz_core::{AppPaths, Attempt, QuizApp, QuizError, QuizMode, ValidationError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HASTINGS_CSV: &str = "question,a,b,c,d,correct\n\
    Who won at Hastings?,Harold,William,Cnut,Edgar,2\n\
    Magna Carta year?,1066,1215,1485,1603,2\n\
    First Tudor king?,Henry VII,Henry VIII,Edward VI,Richard III,1\n\
    Broken row,,b,c,d,1\n";

fn app() -> (TempDir, QuizApp) {
    let dir = tempfile::tempdir().unwrap();
    let app = QuizApp::new(AppPaths::with_data_root(dir.path().join("data")));
    (dir, app)
}

fn write_csv(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("questions.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn register_rejects_blank_and_duplicate_usernames() {
    let (_dir, app) = app();

    let user = app.register_user("  ada  ").unwrap();
    assert_eq!(user.username, "ada");

    let err = app.register_user("ada").unwrap_err();
    assert!(matches!(err, QuizError::UserExists(name) if name == "ada"));

    let err = app.register_user("   ").unwrap_err();
    assert!(matches!(
        err,
        QuizError::Validation(ValidationError::EmptyUsername)
    ));
}

#[test]
fn summary_requires_registered_user() {
    let (_dir, app) = app();

    let err = app.summary("ghost").unwrap_err();
    assert!(matches!(err, QuizError::UserNotFound(name) if name == "ghost"));

    app.register_user("ada").unwrap();
    assert!(app.summary("ada").unwrap().is_empty());
}

#[test]
fn import_creates_topic_store_and_skips_bad_rows() {
    let (dir, app) = app();
    let csv = write_csv(dir.path(), HASTINGS_CSV);

    let report = app.import_csv("medieval", &csv).unwrap();
    assert_eq!(report.inserted, 3);
    assert_eq!(report.skipped, 1);
    assert!(report.db_path.is_file());
    assert_eq!(app.question_count("medieval").unwrap(), 3);
    assert_eq!(app.list_topics().unwrap(), vec!["medieval".to_string()]);
}

#[test]
fn import_reports_missing_file_and_headers() {
    let (dir, app) = app();

    let err = app
        .import_csv("medieval", &dir.path().join("nope.csv"))
        .unwrap_err();
    assert!(matches!(err, QuizError::CsvNotFound(_)));

    let csv = write_csv(dir.path(), "prompt,a,b\nx,y,z\n");
    let err = app.import_csv("medieval", &csv).unwrap_err();
    assert!(matches!(err, QuizError::MissingHeaders { .. }));
}

#[test]
fn start_quiz_checks_user_and_topic() {
    let (_dir, app) = app();

    let err = app
        .start_quiz("ada", "medieval", QuizMode::All, &mut rng())
        .unwrap_err();
    assert!(matches!(err, QuizError::UserNotFound(_)));

    app.register_user("ada").unwrap();
    let err = app
        .start_quiz("ada", "medieval", QuizMode::All, &mut rng())
        .unwrap_err();
    assert!(matches!(err, QuizError::TopicNotFound(_)));

    let err = app
        .start_quiz("ada", "../main", QuizMode::All, &mut rng())
        .unwrap_err();
    assert!(matches!(
        err,
        QuizError::Validation(ValidationError::InvalidTopicName(_))
    ));
}

#[test]
fn full_session_updates_summary_and_history() {
    let (dir, app) = app();
    let csv = write_csv(dir.path(), HASTINGS_CSV);
    app.import_csv("medieval", &csv).unwrap();
    app.register_user("ada").unwrap();

    let user = app.register_user("grace").unwrap();
    let mut session = app
        .start_quiz("ada", "medieval", QuizMode::All, &mut rng())
        .unwrap();
    assert_eq!(session.len(), 3);
    assert_ne!(session.user_id(), user.id);

    // First question right, the rest wrong.
    let first = session.current().unwrap().clone();
    let right = first.answers.iter().position(|a| a.is_correct).unwrap();
    assert!(session.answer(right).unwrap());
    while !session.is_done() {
        session.answer_wrong().unwrap();
    }

    let outcome = app.finish_quiz(&session).unwrap();
    assert_eq!(outcome.correct, 1);
    assert_eq!(outcome.total, 3);

    let summary = app.summary("ada").unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].topic, "medieval");
    let rag = summary[0].summary;
    assert!((rag.pct_green - 100.0 / 3.0).abs() < 1e-9);
    assert!(rag.pct_amber.abs() < 1e-9);
    assert!((rag.pct_red - 200.0 / 3.0).abs() < 1e-9);

    assert!(app.summary("grace").unwrap().is_empty());

    let history = app.history("ada", 10).unwrap();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|entry| entry.topic == "medieval"));
    assert_eq!(history.iter().filter(|entry| entry.was_correct).count(), 1);
    // Newest first: the last answered question is at the top.
    assert_eq!(history[0].question_id, session.results()[2].question_id);
}

#[test]
fn missed_questions_lead_the_next_session() {
    let (dir, app) = app();
    let csv = write_csv(dir.path(), HASTINGS_CSV);
    app.import_csv("medieval", &csv).unwrap();
    app.register_user("ada").unwrap();

    let mut session = app
        .start_quiz("ada", "medieval", QuizMode::All, &mut rng())
        .unwrap();
    let ids: Vec<_> = (0..session.len())
        .map(|_| {
            let question = session.current().unwrap().clone();
            let right = question.answers.iter().position(|a| a.is_correct).unwrap();
            // Miss only the second question.
            if session.position() == 1 {
                session.answer_wrong().unwrap();
            } else {
                session.answer(right).unwrap();
            }
            question.id
        })
        .collect();
    app.finish_quiz(&session).unwrap();

    let next = app
        .start_quiz("ada", "medieval", QuizMode::Count(1), &mut rng())
        .unwrap();
    assert_eq!(next.len(), 1);
    assert_eq!(next.current().unwrap().id, ids[1]);
}

#[test]
fn repeated_sessions_recompute_bands_from_all_counters() {
    let (dir, app) = app();
    let csv = write_csv(dir.path(), HASTINGS_CSV);
    app.import_csv("medieval", &csv).unwrap();
    app.register_user("ada").unwrap();

    let session = app
        .start_quiz("ada", "medieval", QuizMode::Count(1), &mut rng())
        .unwrap();
    let question_id = session.current().unwrap().id;

    let wrong = Attempt {
        question_id,
        correct: false,
    };
    let right = Attempt {
        question_id,
        correct: true,
    };

    let summary = app.update_stats("ada", "medieval", &[wrong]).unwrap();
    assert!((summary.pct_red - 100.0).abs() < 1e-9);

    let summary = app.update_stats("ada", "medieval", &[right]).unwrap();
    assert!((summary.pct_amber - 100.0).abs() < 1e-9);

    let summary = app
        .update_stats("ada", "medieval", &[right, right, right])
        .unwrap();
    assert!((summary.pct_green - 100.0).abs() < 1e-9);

    let stored = app.summary("ada").unwrap();
    assert_eq!(stored.len(), 1);
    assert!((stored[0].summary.pct_green - 100.0).abs() < 1e-9);
}

#[test]
fn update_stats_requires_existing_user() {
    let (dir, app) = app();
    let csv = write_csv(dir.path(), HASTINGS_CSV);
    app.import_csv("medieval", &csv).unwrap();

    let err = app.update_stats("ghost", "medieval", &[]).unwrap_err();
    assert!(matches!(err, QuizError::UserNotFound(_)));
}

#[test]
fn list_topics_ignores_non_store_files() {
    let (_dir, app) = app();
    let topics_dir = &app.paths().topics_dir;
    fs::create_dir_all(topics_dir).unwrap();
    fs::write(topics_dir.join("notes.txt"), "x").unwrap();
    fs::write(topics_dir.join("romans.db"), "").unwrap();
    fs::write(topics_dir.join("greeks.db"), "").unwrap();

    assert_eq!(
        app.list_topics().unwrap(),
        vec!["greeks".to_string(), "romans".to_string()]
    );
}

#[test]
fn reads_do_not_initialize_unknown_topic_files() {
    let (_dir, app) = app();
    app.register_user("ada").unwrap();
    let topics_dir = &app.paths().topics_dir;
    fs::create_dir_all(topics_dir).unwrap();
    let path = topics_dir.join("notes.db");
    fs::write(&path, "").unwrap();

    let err = app.question_count("notes").unwrap_err();
    assert!(matches!(err, QuizError::InvalidTopicStore(_)));
    let err = app
        .start_quiz("ada", "notes", QuizMode::All, &mut rng())
        .unwrap_err();
    assert!(matches!(err, QuizError::InvalidTopicStore(_)));
    let err = app
        .update_stats("ada", "notes", &[Attempt {
            question_id: 1,
            correct: true,
        }])
        .unwrap_err();
    assert!(matches!(err, QuizError::InvalidTopicStore(_)));

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn main_store_is_not_taken_for_a_topic() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("data");
    let paths = AppPaths {
        topics_dir: root.clone(),
        ..AppPaths::with_data_root(&root)
    };
    let app = QuizApp::new(paths);
    app.register_user("ada").unwrap();

    assert!(app.list_topics().unwrap().contains(&"main".to_string()));
    let err = app
        .start_quiz("ada", "main", QuizMode::All, &mut rng())
        .unwrap_err();
    assert!(matches!(err, QuizError::InvalidTopicStore(_)));
}
