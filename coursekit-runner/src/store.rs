//! The persistence collaborator consumed by the orchestrator.

use async_trait::async_trait;
use coursekit_core::{
    ChapterRecord, CourseRecord, CourseStatus, ErrorMetadata, FlashcardRecord, NoteRecord,
    QuizRecord, Result,
};

/// Storage operations the orchestrator needs. Implementations report
/// failures as [`CourseError::Persistence`](coursekit_core::CourseError);
/// the orchestrator treats any persistence failure as fatal to the run.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Upsert by course id: a second insert with the same id replaces
    /// the row.
    async fn insert_course(&self, record: CourseRecord) -> Result<()>;

    /// Insert-or-ignore bulk; a chapter id already present is skipped.
    /// No-op on empty input.
    async fn insert_chapters(&self, chapters: Vec<ChapterRecord>) -> Result<()>;

    /// Insert-or-ignore bulk, no-op on empty input.
    async fn insert_notes(&self, notes: Vec<NoteRecord>) -> Result<()>;

    /// Insert-or-ignore bulk, no-op on empty input.
    async fn insert_flashcards(&self, flashcards: Vec<FlashcardRecord>) -> Result<()>;

    /// Insert-or-ignore bulk, no-op on empty input.
    async fn insert_quizzes(&self, quizzes: Vec<QuizRecord>) -> Result<()>;

    async fn update_course_status(&self, course_id: &str, status: CourseStatus) -> Result<()>;

    async fn update_course_summary(&self, course_id: &str, summary: &str) -> Result<()>;

    /// Attach structured error metadata to a course row on failure.
    async fn update_course_error(&self, course_id: &str, metadata: ErrorMetadata) -> Result<()>;
}
