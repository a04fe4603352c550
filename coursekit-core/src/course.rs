//! Persisted course/chapter records, run statistics, and failure
//! classification metadata.

use crate::content::{ChapterNotes, QuizQuestion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Course lifecycle. `Ready` and `Failed` are terminal; the orchestrator
/// guarantees every run ends in one of them, never at `Generating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Draft,
    Generating,
    Ready,
    Failed,
}

impl CourseStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CourseStatus::Ready | CourseStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::Generating => "generating",
            CourseStatus::Ready => "ready",
            CourseStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One course-generation request, as handed to the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRequest {
    pub course_id: String,
    pub user_id: String,
    pub topic: String,
    pub study_type: String,
    pub difficulty_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub user_id: String,
    pub topic: String,
    pub study_type: String,
    pub difficulty_level: String,
    pub title: String,
    pub summary: String,
    pub status: CourseStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterRecord {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub summary: String,
    /// 1-based, stable, derived from the outline index.
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    pub course_id: String,
    pub chapter_id: String,
    pub notes: ChapterNotes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardRecord {
    pub id: String,
    pub course_id: String,
    pub chapter_id: String,
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRecord {
    pub id: String,
    pub course_id: String,
    pub chapter_id: String,
    pub question: QuizQuestion,
}

/// Counters for one course-generation run. Created at run start,
/// finalized at run end, never mutated after.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub chapters_generated: u32,
    pub notes_generated: u32,
    pub flashcards_generated: u32,
    pub quizzes_generated: u32,
    pub errors: u32,
    pub warnings: u32,
}

/// Failure classes attached to a failed course row, derived from the
/// error message by case-insensitive substring match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    ApiDisabled,
    InvalidApiKey,
    QuotaExceeded,
    Timeout,
    NetworkError,
    ParsingError,
    Unknown,
}

impl ErrorType {
    pub fn classify(message: &str) -> Self {
        let normalized = message.to_ascii_lowercase();
        let contains_any =
            |needles: &[&str]| needles.iter().any(|needle| normalized.contains(needle));

        if contains_any(&["api disabled", "service_disabled", "has not been used"]) {
            ErrorType::ApiDisabled
        } else if contains_any(&["invalid api key", "api_key_invalid", "api key not valid"]) {
            ErrorType::InvalidApiKey
        } else if contains_any(&["quota", "rate limit", "resource_exhausted"]) {
            ErrorType::QuotaExceeded
        } else if contains_any(&["timeout", "timed out", "deadline_exceeded"]) {
            ErrorType::Timeout
        } else if contains_any(&["network", "connection", "fetch failed", "unavailable"]) {
            ErrorType::NetworkError
        } else if contains_any(&["parse", "json"]) {
            ErrorType::ParsingError
        } else {
            ErrorType::Unknown
        }
    }
}

/// Structured error metadata persisted on the course row when a run
/// ends as `failed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMetadata {
    pub error: String,
    pub error_type: ErrorType,
    pub timestamp: DateTime<Utc>,
}

impl ErrorMetadata {
    pub fn new(error: impl Into<String>) -> Self {
        let error = error.into();
        Self { error_type: ErrorType::classify(&error), error, timestamp: Utc::now() }
    }
}
