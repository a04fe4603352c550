//! In-memory [`CourseStore`] backed by `RwLock`'d maps. The default
//! store for tests and local development.

use crate::store::CourseStore;
use async_trait::async_trait;
use coursekit_core::{
    ChapterRecord, CourseError, CourseRecord, CourseStatus, ErrorMetadata, FlashcardRecord,
    NoteRecord, QuizRecord, Result,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
pub struct InMemoryCourseStore {
    courses: Arc<RwLock<HashMap<String, CourseRecord>>>,
    course_errors: Arc<RwLock<HashMap<String, ErrorMetadata>>>,
    chapters: Arc<RwLock<HashMap<String, ChapterRecord>>>,
    notes: Arc<RwLock<HashMap<String, NoteRecord>>>,
    flashcards: Arc<RwLock<HashMap<String, FlashcardRecord>>>,
    quizzes: Arc<RwLock<HashMap<String, QuizRecord>>>,
}

impl InMemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn course(&self, course_id: &str) -> Option<CourseRecord> {
        self.courses.read().unwrap().get(course_id).cloned()
    }

    pub fn course_error(&self, course_id: &str) -> Option<ErrorMetadata> {
        self.course_errors.read().unwrap().get(course_id).cloned()
    }

    /// Chapters for a course, sorted by their 1-based order.
    pub fn chapters_for(&self, course_id: &str) -> Vec<ChapterRecord> {
        let mut chapters: Vec<_> = self
            .chapters
            .read()
            .unwrap()
            .values()
            .filter(|c| c.course_id == course_id)
            .cloned()
            .collect();
        chapters.sort_by_key(|c| c.order);
        chapters
    }

    pub fn notes_for(&self, course_id: &str) -> Vec<NoteRecord> {
        self.notes
            .read()
            .unwrap()
            .values()
            .filter(|n| n.course_id == course_id)
            .cloned()
            .collect()
    }

    pub fn flashcards_for(&self, course_id: &str) -> Vec<FlashcardRecord> {
        self.flashcards
            .read()
            .unwrap()
            .values()
            .filter(|f| f.course_id == course_id)
            .cloned()
            .collect()
    }

    pub fn quizzes_for(&self, course_id: &str) -> Vec<QuizRecord> {
        self.quizzes
            .read()
            .unwrap()
            .values()
            .filter(|q| q.course_id == course_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn insert_course(&self, record: CourseRecord) -> Result<()> {
        self.courses.write().unwrap().insert(record.id.clone(), record);
        Ok(())
    }

    async fn insert_chapters(&self, chapters: Vec<ChapterRecord>) -> Result<()> {
        let mut map = self.chapters.write().unwrap();
        for chapter in chapters {
            map.entry(chapter.id.clone()).or_insert(chapter);
        }
        Ok(())
    }

    async fn insert_notes(&self, notes: Vec<NoteRecord>) -> Result<()> {
        let mut map = self.notes.write().unwrap();
        for note in notes {
            map.entry(note.id.clone()).or_insert(note);
        }
        Ok(())
    }

    async fn insert_flashcards(&self, flashcards: Vec<FlashcardRecord>) -> Result<()> {
        let mut map = self.flashcards.write().unwrap();
        for card in flashcards {
            map.entry(card.id.clone()).or_insert(card);
        }
        Ok(())
    }

    async fn insert_quizzes(&self, quizzes: Vec<QuizRecord>) -> Result<()> {
        let mut map = self.quizzes.write().unwrap();
        for quiz in quizzes {
            map.entry(quiz.id.clone()).or_insert(quiz);
        }
        Ok(())
    }

    async fn update_course_status(&self, course_id: &str, status: CourseStatus) -> Result<()> {
        let mut courses = self.courses.write().unwrap();
        let course = courses
            .get_mut(course_id)
            .ok_or_else(|| CourseError::Persistence(format!("course not found: {course_id}")))?;
        course.status = status;
        Ok(())
    }

    async fn update_course_summary(&self, course_id: &str, summary: &str) -> Result<()> {
        let mut courses = self.courses.write().unwrap();
        let course = courses
            .get_mut(course_id)
            .ok_or_else(|| CourseError::Persistence(format!("course not found: {course_id}")))?;
        course.summary = summary.to_string();
        Ok(())
    }

    async fn update_course_error(&self, course_id: &str, metadata: ErrorMetadata) -> Result<()> {
        if !self.courses.read().unwrap().contains_key(course_id) {
            return Err(CourseError::Persistence(format!("course not found: {course_id}")));
        }
        self.course_errors.write().unwrap().insert(course_id.to_string(), metadata);
        Ok(())
    }
}
