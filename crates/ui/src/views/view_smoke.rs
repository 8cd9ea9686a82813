use std::io::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{AnswerWrite, QuestionIndex, ResultRecord};
use storage::repository::{InMemoryRepository, ResultRepository, StorageError};
use tempfile::NamedTempFile;

use super::QuizIntent;
use super::test_harness::{
    Questions, TWO_QUESTIONS, ViewHarness, ViewKind, setup_view_harness,
    setup_view_harness_with_results,
};

struct UnavailableRepository;

#[async_trait]
impl ResultRepository for UnavailableRepository {
    async fn get_result(&self, _index: QuestionIndex) -> Result<Option<ResultRecord>, StorageError> {
        Err(StorageError::Connection("store offline".into()))
    }

    async fn list_results(&self) -> Result<Vec<ResultRecord>, StorageError> {
        Err(StorageError::Connection("store offline".into()))
    }

    async fn record_answer(&self, _write: AnswerWrite) -> Result<ResultRecord, StorageError> {
        Err(StorageError::Connection("store offline".into()))
    }

    async fn clear_results(&self) -> Result<(), StorageError> {
        Err(StorageError::Connection("store offline".into()))
    }
}

const THREE_QUESTIONS: &str = r#"{"questions": [
    {"question": "Capital of France?", "options": ["Paris", "Rome"], "correct": 0},
    {"question": "Largest planet?", "options": ["Mars", "Jupiter"], "correct": 1},
    {"question": "Boiling point of water in C?", "options": ["90", "100"], "answer": "100"}
]}"#;

fn questions_file(raw: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(raw.as_bytes()).expect("write questions");
    file
}

fn import_intent(file: &NamedTempFile) -> QuizIntent {
    QuizIntent::Import(file.path().display().to_string())
}

async fn loaded_quiz(mut harness: ViewHarness) -> ViewHarness {
    harness.rebuild();
    let html = harness.drive_until("Question 1 / 2").await;
    assert!(html.contains("Question 1 / 2"), "quiz did not load: {html}");
    harness
}

async fn wait_for_record(harness: &mut ViewHarness, index: u32) -> Option<ResultRecord> {
    for _ in 0..40 {
        let record = harness
            .results
            .get_result(QuestionIndex::new(index))
            .await
            .expect("read result");
        if record.is_some() {
            return record;
        }
        harness.drive_async().await;
    }
    None
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let harness = setup_view_harness(ViewKind::Quiz, Questions::Json(TWO_QUESTIONS));
    let harness = loaded_quiz(harness).await;

    let html = harness.render();
    assert!(html.contains("What is 2 + 2?"), "missing prompt in {html}");
    assert!(html.contains("Section: Math"), "missing section in {html}");
    assert!(html.contains("Correct: 0 / 0"), "missing score in {html}");
    assert!(!html.contains("Confirm"), "confirm shown before selecting: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_confirm_reveals_and_persists() {
    let harness = setup_view_harness(ViewKind::Quiz, Questions::Json(TWO_QUESTIONS));
    let mut harness = loaded_quiz(harness).await;

    harness.dispatch(QuizIntent::Select(0));
    assert!(harness.render().contains("Confirm"));
    harness.dispatch(QuizIntent::Confirm);

    let html = harness.render();
    assert!(html.contains("Incorrect"), "missing verdict in {html}");
    assert!(html.contains("Answer: 4"), "missing answer in {html}");
    assert!(html.contains("Correct: 0 / 1"), "score not updated in {html}");
    assert!(html.contains("Next question"), "missing next in {html}");

    let record = wait_for_record(&mut harness, 0).await.expect("answer persisted");
    assert_eq!(record.correct_count, 0);
    assert_eq!(record.incorrect_count, 1);

    harness.dispatch(QuizIntent::Next);
    let html = harness.render();
    assert!(html.contains("Question 2 / 2"), "did not advance: {html}");
    assert!(html.contains("What is 3 * 3?"), "missing second prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_finishes_and_starts_over() {
    let harness = setup_view_harness(ViewKind::Quiz, Questions::Json(TWO_QUESTIONS));
    let mut harness = loaded_quiz(harness).await;

    harness.dispatch(QuizIntent::Select(1));
    harness.dispatch(QuizIntent::Confirm);
    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::Select(1));
    harness.dispatch(QuizIntent::Confirm);

    let html = harness.render();
    assert!(html.contains("Quiz complete!"), "missing finish panel in {html}");
    assert!(html.contains("Final score: 2 / 2"), "wrong final score in {html}");

    harness.dispatch(QuizIntent::StartOver);
    let html = harness.render();
    assert!(html.contains("Question 1 / 2"), "did not restart: {html}");
    assert!(html.contains("Correct: 0 / 0"), "score not reset in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_wrong_only_without_misses_shows_notice() {
    let harness = setup_view_harness(ViewKind::Quiz, Questions::Json(TWO_QUESTIONS));
    let mut harness = loaded_quiz(harness).await;

    harness.dispatch(QuizIntent::WrongOnly);
    let html = harness.render();
    assert!(
        html.contains("There are no wrong answers to review."),
        "missing notice in {html}"
    );
    assert!(html.contains("Question 1 / 2"), "session changed: {html}");

    harness.dispatch(QuizIntent::DismissNotice);
    assert!(!harness.render().contains("There are no wrong answers to review."));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_wrong_only_replays_missed_questions() {
    let harness = setup_view_harness(ViewKind::Quiz, Questions::Json(TWO_QUESTIONS));
    let mut harness = loaded_quiz(harness).await;

    harness.dispatch(QuizIntent::Select(1));
    harness.dispatch(QuizIntent::Confirm);
    harness.dispatch(QuizIntent::Next);
    harness.dispatch(QuizIntent::Select(0));
    harness.dispatch(QuizIntent::Confirm);
    harness.dispatch(QuizIntent::WrongOnly);

    let html = harness.render();
    assert!(html.contains("Question 1 / 1"), "not restricted: {html}");
    assert!(html.contains("What is 3 * 3?"), "wrong question replayed: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_failed_import_keeps_session() {
    let harness = setup_view_harness(ViewKind::Quiz, Questions::Json(TWO_QUESTIONS));
    let mut harness = loaded_quiz(harness).await;

    harness.dispatch(QuizIntent::Select(1));
    harness.dispatch(QuizIntent::Import("/nonexistent/import.json".into()));

    let html = harness.drive_until("Could not import questions").await;
    assert!(html.contains("Could not import questions"), "missing error in {html}");
    assert!(html.contains("Question 1 / 2"), "session replaced: {html}");
    assert!(html.contains("Confirm"), "selection lost: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_failed_write_warns_but_keeps_verdict() {
    let harness = setup_view_harness_with_results(
        ViewKind::Quiz,
        Questions::Json(TWO_QUESTIONS),
        Arc::new(UnavailableRepository),
    );
    let mut harness = loaded_quiz(harness).await;

    harness.dispatch(QuizIntent::Select(1));
    harness.dispatch(QuizIntent::Confirm);

    let html = harness.drive_until("could not be saved").await;
    assert!(html.contains("could not be saved"), "missing warning in {html}");
    assert!(html.contains("Correct!"), "verdict lost: {html}");
    assert!(html.contains("Correct: 1 / 1"), "score lost: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_without_source_is_empty() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Questions::None);
    harness.rebuild();
    let html = harness.drive_until("No questions available.").await;
    assert!(html.contains("No questions available."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_load_failure_shows_error() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Questions::Missing);
    harness.rebuild();
    let html = harness.drive_until("Failed to load questions.").await;
    assert!(html.contains("Failed to load questions."), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn stats_view_smoke_renders_rows() {
    let repo = Arc::new(InMemoryRepository::new());
    for correct in [true, true, true, false] {
        repo.record_answer(AnswerWrite::new(QuestionIndex::new(0), correct))
            .await
            .expect("record");
    }
    repo.record_answer(AnswerWrite::new(QuestionIndex::new(4), false))
        .await
        .expect("record");

    let mut harness = setup_view_harness_with_results(ViewKind::Stats, Questions::None, repo);
    harness.rebuild();
    let html = harness.drive_until("Question 5").await;

    assert!(html.contains("Question 1"), "missing first row in {html}");
    assert!(html.contains("75%"), "missing row accuracy in {html}");
    assert!(html.contains("tier--medium"), "missing tier class in {html}");
    assert!(html.contains("Question 5"), "missing second row in {html}");
    assert!(html.contains("60%"), "missing overall accuracy in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn stats_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Stats, Questions::None);
    harness.rebuild();
    let html = harness.drive_until("No statistics yet.").await;
    assert!(html.contains("No statistics yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn stats_view_smoke_offers_retry_on_failure() {
    let mut harness = setup_view_harness_with_results(
        ViewKind::Stats,
        Questions::None,
        Arc::new(UnavailableRepository),
    );
    harness.rebuild();
    let html = harness.drive_until("Retry").await;
    assert!(html.contains("Could not read saved results."), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_import_recovers_from_failed_load() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Questions::Missing);
    harness.rebuild();
    let html = harness.drive_until("Failed to load questions.").await;
    assert!(html.contains("Failed to load questions."), "missing error in {html}");

    let file = questions_file(TWO_QUESTIONS);
    harness.dispatch(import_intent(&file));

    let html = harness.drive_until("Question 1 / 2").await;
    assert!(html.contains("Question 1 / 2"), "import did not load: {html}");
    assert!(html.contains("What is 2 + 2?"), "missing prompt in {html}");
    assert!(!html.contains("Failed to load questions."), "stale error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_import_replaces_session() {
    let harness = setup_view_harness(ViewKind::Quiz, Questions::Json(TWO_QUESTIONS));
    let mut harness = loaded_quiz(harness).await;

    harness.dispatch(QuizIntent::Select(1));
    harness.dispatch(QuizIntent::Confirm);
    assert!(harness.render().contains("Correct: 1 / 1"));

    let file = questions_file(THREE_QUESTIONS);
    harness.dispatch(import_intent(&file));

    let html = harness.drive_until("Question 1 / 3").await;
    assert!(html.contains("Question 1 / 3"), "session not replaced: {html}");
    assert!(html.contains("Capital of France?"), "missing imported prompt in {html}");
    assert!(html.contains("Section: Custom"), "missing default section in {html}");
    assert!(html.contains("Correct: 0 / 0"), "score not reset in {html}");
    assert!(html.contains("Imported 3 questions."), "missing notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_reset_clears_results_and_restarts() {
    let harness = setup_view_harness(ViewKind::Quiz, Questions::Json(TWO_QUESTIONS));
    let mut harness = loaded_quiz(harness).await;

    harness.dispatch(QuizIntent::Select(1));
    harness.dispatch(QuizIntent::Confirm);
    wait_for_record(&mut harness, 0).await.expect("answer persisted");
    harness.dispatch(QuizIntent::Next);
    assert!(harness.render().contains("Question 2 / 2"));

    harness.dispatch(QuizIntent::ResetResults);
    let html = harness.drive_until("All saved results were cleared.").await;
    assert!(
        html.contains("All saved results were cleared."),
        "missing notice in {html}"
    );
    assert!(html.contains("Question 1 / 2"), "did not restart: {html}");
    assert!(html.contains("Correct: 0 / 0"), "score not reset in {html}");

    let remaining = harness.results.list_results().await.expect("list results");
    assert!(remaining.is_empty(), "records left after reset: {remaining:?}");
}
