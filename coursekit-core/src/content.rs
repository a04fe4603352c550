//! Generated-content data model: outlines, chapter notes, flashcards,
//! and quiz questions, as returned by the content generators after
//! schema validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The AI-generated course skeleton from which chapters are persisted.
///
/// Invariant: at least one chapter, and every chapter carries a
/// non-empty title and summary. Enforced by the outline validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOutline {
    pub title: String,
    pub summary: String,
    pub chapters: Vec<ChapterSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSpec {
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Structured notes for one chapter.
///
/// `examples` and `quiz` are kept loosely typed; models vary wildly in
/// how they shape these and the schema only requires them to be lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterNotes {
    pub summary: String,
    pub key_points: Vec<KeyPoint>,
    #[serde(default)]
    pub examples: Vec<Value>,
    #[serde(default)]
    pub quiz: Vec<Value>,
    pub difficulty_guidance: DifficultyGuidance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub point: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyGuidance {
    /// Never empty: a default is synthesized when the model omits it.
    pub general: String,
    #[serde(default)]
    pub challenging_topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub prompt: String,
    /// Exactly four options.
    pub options: Vec<String>,
    /// Expected to be one of `options`, but membership is not enforced;
    /// models frequently answer with a letter or a paraphrase.
    pub correct_answer: String,
    pub explanation: String,
}

impl CourseOutline {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self { title: title.into(), summary: summary.into(), chapters: vec![] }
    }

    pub fn with_chapter(mut self, title: impl Into<String>, summary: impl Into<String>) -> Self {
        self.chapters.push(ChapterSpec { title: title.into(), summary: summary.into(), content: None });
        self
    }
}
