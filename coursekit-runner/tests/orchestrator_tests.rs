//! End-to-end orchestrator scenarios over the in-memory store and a
//! scripted model. Time is paused so retry backoff costs nothing.

use std::sync::Arc;

use coursekit_content::ContentGenerators;
use coursekit_core::{CourseError, CourseRecord, CourseRequest, CourseStatus, TextModel};
use coursekit_model::{GenerationClient, MockTextModel};
use coursekit_runner::{CourseOrchestrator, CourseStore, InMemoryCourseStore};
use coursekit_telemetry::NoopTelemetry;

fn harness(model: MockTextModel) -> (Arc<InMemoryCourseStore>, CourseOrchestrator) {
    let client = GenerationClient::new(
        Arc::new(model) as Arc<dyn TextModel>,
        Arc::new(NoopTelemetry),
    );
    let generators = ContentGenerators::new(Arc::new(client), Arc::new(NoopTelemetry));
    let store = Arc::new(InMemoryCourseStore::new());
    let orchestrator = CourseOrchestrator::new(
        Arc::new(generators),
        Arc::clone(&store) as Arc<dyn CourseStore>,
        Arc::new(NoopTelemetry),
    );
    (store, orchestrator)
}

fn request(course_id: &str) -> CourseRequest {
    CourseRequest {
        course_id: course_id.to_string(),
        user_id: "user-1".to_string(),
        topic: "Recursion".to_string(),
        study_type: "practice".to_string(),
        difficulty_level: "beginner".to_string(),
    }
}

fn outline_json(chapter_count: usize) -> String {
    let chapters: Vec<_> = (1..=chapter_count)
        .map(|n| {
            serde_json::json!({
                "title": format!("Chapter {n}"),
                "summary": format!("What chapter {n} covers")
            })
        })
        .collect();
    serde_json::json!({
        "title": "Recursion",
        "summary": "Self-reference in programs",
        "chapters": chapters
    })
    .to_string()
}

fn notes_json() -> String {
    serde_json::json!({
        "summary": "Notes summary",
        "keyPoints": [
            {"point": "Base cases stop recursion", "explanation": "Without one, calls never return"},
            {"point": "Each call shrinks the problem", "explanation": "Progress toward the base case"}
        ],
        "difficultyGuidance": {"general": "Trace small examples by hand"}
    })
    .to_string()
}

fn flashcards_json() -> String {
    serde_json::json!([
        {"front": "What is a base case?", "back": "The input that stops recursing"},
        {"front": "What grows with each call?", "back": "The call stack"}
    ])
    .to_string()
}

fn quiz_json() -> String {
    serde_json::json!([{
        "prompt": "What happens without a base case?",
        "options": ["Nothing", "Infinite recursion", "Faster execution", "A compile error"],
        "correctAnswer": "Infinite recursion",
        "explanation": "The calls never stop"
    }])
    .to_string()
}

const SUMMARY_JSON: &str = r#"{"summary": "A complete tour of recursion."}"#;

// Flashcard policy allows 2 retries, quiz 2, notes 3, outline 3,
// summary 2: a "real" failure needs retries+1 scripted errors.

#[tokio::test(start_paused = true)]
async fn partial_failures_become_warnings_and_the_course_still_ships() {
    // 2 chapters; chapter 1's flashcards fail, chapter 2's quiz fails.
    // The failure messages carry no fallback trigger, so nothing is
    // substituted and only the successful sets are persisted.
    let model = MockTextModel::new("mock")
        .with_response("outline", outline_json(2))
        .with_response("notes", notes_json())
        .with_response("notes", notes_json())
        .with_error("flashcards", "flashcard model glitch")
        .with_error("flashcards", "flashcard model glitch")
        .with_error("flashcards", "flashcard model glitch")
        .with_response("flashcards", flashcards_json())
        .with_response("quiz", quiz_json())
        .with_error("quiz", "quiz model glitch")
        .with_error("quiz", "quiz model glitch")
        .with_error("quiz", "quiz model glitch")
        .with_response("summary", SUMMARY_JSON);
    let (store, orchestrator) = harness(model);

    let stats = orchestrator.generate_course_content(request("c1")).await.unwrap();

    assert_eq!(stats.warnings, 2);
    assert_eq!(stats.errors, 0);
    assert_eq!(stats.chapters_generated, 2);
    assert_eq!(stats.notes_generated, 2);
    assert_eq!(stats.flashcards_generated, 2);
    assert_eq!(stats.quizzes_generated, 1);

    let course = store.course("c1").unwrap();
    assert_eq!(course.status, CourseStatus::Ready);

    // Only chapter 2's flashcards and chapter 1's quiz made it through.
    let chapters = store.chapters_for("c1");
    let flashcards = store.flashcards_for("c1");
    let quizzes = store.quizzes_for("c1");
    assert_eq!(flashcards.len(), 2);
    assert!(flashcards.iter().all(|f| f.chapter_id == chapters[1].id));
    assert_eq!(quizzes.len(), 1);
    assert_eq!(quizzes[0].chapter_id, chapters[0].id);
}

#[tokio::test(start_paused = true)]
async fn outline_failure_marks_the_course_failed_with_nothing_persisted() {
    let model = MockTextModel::new("mock")
        .with_error("outline", "model glitch")
        .with_error("outline", "model glitch")
        .with_error("outline", "model glitch")
        .with_error("outline", "model glitch");
    let (store, orchestrator) = harness(model);

    // The caller creates the course row before the run starts.
    store
        .insert_course(CourseRecord {
            id: "c2".to_string(),
            user_id: "user-1".to_string(),
            topic: "Recursion".to_string(),
            study_type: "practice".to_string(),
            difficulty_level: "beginner".to_string(),
            title: "Recursion".to_string(),
            summary: String::new(),
            status: CourseStatus::Draft,
        })
        .await
        .unwrap();

    let err = orchestrator.generate_course_content(request("c2")).await.unwrap_err();
    assert!(matches!(err, CourseError::Generation { attempts: 4, .. }));

    assert_eq!(store.course("c2").unwrap().status, CourseStatus::Failed);
    assert!(store.course_error("c2").is_some());
    assert!(store.chapters_for("c2").is_empty());
    assert!(store.notes_for("c2").is_empty());
    assert!(store.flashcards_for("c2").is_empty());
    assert!(store.quizzes_for("c2").is_empty());
}

#[tokio::test(start_paused = true)]
async fn beginner_run_ends_terminal_with_valid_notes() {
    let model = MockTextModel::new("mock")
        .with_response("outline", outline_json(2))
        .with_response("notes", notes_json())
        .with_response("notes", notes_json())
        .with_response("flashcards", flashcards_json())
        .with_response("flashcards", flashcards_json())
        .with_response("quiz", quiz_json())
        .with_response("quiz", quiz_json())
        .with_response("summary", SUMMARY_JSON);
    let (store, orchestrator) = harness(model);

    let stats = orchestrator.generate_course_content(request("c3")).await.unwrap();

    let course = store.course("c3").unwrap();
    assert!(course.status.is_terminal());
    assert_eq!(course.status, CourseStatus::Ready);
    assert_eq!(course.summary, "A complete tour of recursion.");

    let chapters = store.chapters_for("c3");
    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[0].order, 1);
    assert_eq!(chapters[1].order, 2);

    for note in store.notes_for("c3") {
        assert!(note.notes.key_points.len() >= 2);
    }
    assert_eq!(stats.chapters_generated, 2);
    assert_eq!(stats.warnings, 0);
}

#[tokio::test(start_paused = true)]
async fn summary_failure_keeps_the_outline_summary() {
    let model = MockTextModel::new("mock")
        .with_response("outline", outline_json(1))
        .with_response("notes", notes_json())
        .with_response("flashcards", flashcards_json())
        .with_response("quiz", quiz_json())
        .with_error("summary", "summary glitch")
        .with_error("summary", "summary glitch")
        .with_error("summary", "summary glitch");
    let (store, orchestrator) = harness(model);

    let stats = orchestrator.generate_course_content(request("c4")).await.unwrap();

    assert_eq!(stats.warnings, 1);
    let course = store.course("c4").unwrap();
    assert_eq!(course.status, CourseStatus::Ready);
    assert_eq!(course.summary, "Self-reference in programs");
}

#[tokio::test(start_paused = true)]
async fn notes_exhausting_retries_get_fallback_notes() {
    // Notes allow 3 retries; exhausting them means retry_count == 3,
    // which passes the fallback gate regardless of the message.
    let model = MockTextModel::new("mock")
        .with_response("outline", outline_json(1))
        .with_error("notes", "notes glitch")
        .with_error("notes", "notes glitch")
        .with_error("notes", "notes glitch")
        .with_error("notes", "notes glitch")
        .with_response("flashcards", flashcards_json())
        .with_response("quiz", quiz_json())
        .with_response("summary", SUMMARY_JSON);
    let (store, orchestrator) = harness(model);

    let stats = orchestrator.generate_course_content(request("c5")).await.unwrap();

    assert_eq!(stats.warnings, 1);
    assert_eq!(stats.notes_generated, 1);
    let notes = store.notes_for("c5");
    assert_eq!(notes.len(), 1);
    assert!(notes[0].notes.key_points.len() >= 2);
    assert!(!notes[0].notes.difficulty_guidance.general.is_empty());
}

#[tokio::test(start_paused = true)]
async fn rate_limited_flashcards_get_fallback_cards() {
    // "rate limit" in the failure message qualifies for substitution
    // even though only 2 retries were spent.
    let model = MockTextModel::new("mock")
        .with_response("outline", outline_json(1))
        .with_response("notes", notes_json())
        .with_error("flashcards", "429 rate limit exceeded")
        .with_error("flashcards", "429 rate limit exceeded")
        .with_error("flashcards", "429 rate limit exceeded")
        .with_response("quiz", quiz_json())
        .with_response("summary", SUMMARY_JSON);
    let (store, orchestrator) = harness(model);
    let orchestrator = orchestrator.with_flashcard_count(4);

    let stats = orchestrator.generate_course_content(request("c6")).await.unwrap();

    assert_eq!(stats.warnings, 1);
    assert_eq!(stats.flashcards_generated, 4);
    let flashcards = store.flashcards_for("c6");
    assert_eq!(flashcards.len(), 4);
    assert!(flashcards.iter().all(|f| !f.front.is_empty() && !f.back.is_empty()));
}
