//! The content generators: outline, chapter notes, flashcards, quiz,
//! and the final course summary.
//!
//! Every generator follows the same template: render the fixed prompt,
//! call the generation client under the operation's retry policy, run
//! the repair parser over the raw text, then validate the parsed value
//! against the content schema. Validation failures are
//! [`CourseError::Validation`](coursekit_core::CourseError), distinct
//! from generation and parse failures; the caller decides what each
//! class means for the run.

use std::sync::Arc;

use coursekit_core::{ChapterNotes, CourseOutline, Flashcard, QuizQuestion, Result};
use coursekit_model::{GenerationClient, RetryPolicy};
use coursekit_telemetry::{debug, TelemetrySink};
use serde_json::json;

use crate::prompts;
use crate::repair::parse_structured;
use crate::schema;

/// Operation tags used for retry-policy selection and telemetry.
pub mod operation {
    pub const OUTLINE: &str = "outline";
    pub const NOTES: &str = "notes";
    pub const FLASHCARDS: &str = "flashcards";
    pub const QUIZ: &str = "quiz";
    pub const SUMMARY: &str = "summary";
}

/// Prompt-to-validated-structure pipeline over a [`GenerationClient`].
pub struct ContentGenerators {
    client: Arc<GenerationClient>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl ContentGenerators {
    pub fn new(client: Arc<GenerationClient>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self { client, telemetry }
    }

    /// Generate and validate the course outline.
    pub async fn generate_outline(
        &self,
        topic: &str,
        study_type: &str,
        difficulty_level: &str,
    ) -> Result<CourseOutline> {
        let prompt = prompts::outline_prompt(topic, study_type, difficulty_level);
        let result =
            self.client.generate(&prompt, operation::OUTLINE, &RetryPolicy::outline()).await?;
        let outline = schema::outline_from_value(parse_structured(&result.text)?)?;

        debug!(topic, chapters = outline.chapters.len(), "outline generated");
        self.telemetry.record_event(
            "content.outline",
            json!({"topic": topic, "chapters": outline.chapters.len(), "attempts": result.attempts}),
        );
        Ok(outline)
    }

    /// Generate and validate structured notes for one chapter.
    pub async fn generate_chapter_notes(
        &self,
        chapter_title: &str,
        chapter_summary: &str,
        topic: &str,
        difficulty_level: &str,
    ) -> Result<ChapterNotes> {
        let prompt =
            prompts::notes_prompt(chapter_title, chapter_summary, topic, difficulty_level);
        let result =
            self.client.generate(&prompt, operation::NOTES, &RetryPolicy::notes()).await?;
        let notes = schema::notes_from_value(parse_structured(&result.text)?)?;

        debug!(chapter = chapter_title, key_points = notes.key_points.len(), "notes generated");
        self.telemetry.record_event(
            "content.notes",
            json!({"chapter": chapter_title, "keyPoints": notes.key_points.len(), "attempts": result.attempts}),
        );
        Ok(notes)
    }

    /// Generate and validate a flashcard set for one chapter.
    pub async fn generate_flashcards(
        &self,
        chapter_title: &str,
        topic: &str,
        count: u32,
    ) -> Result<Vec<Flashcard>> {
        let prompt = prompts::flashcards_prompt(chapter_title, topic, count);
        let result = self
            .client
            .generate(&prompt, operation::FLASHCARDS, &RetryPolicy::flashcards())
            .await?;
        let cards = schema::flashcards_from_value(parse_structured(&result.text)?)?;

        self.telemetry.record_event(
            "content.flashcards",
            json!({"chapter": chapter_title, "count": cards.len(), "attempts": result.attempts}),
        );
        Ok(cards)
    }

    /// Generate and validate a quiz question set for one chapter.
    pub async fn generate_quiz(
        &self,
        chapter_title: &str,
        topic: &str,
        count: u32,
    ) -> Result<Vec<QuizQuestion>> {
        let prompt = prompts::quiz_prompt(chapter_title, topic, count);
        let result =
            self.client.generate(&prompt, operation::QUIZ, &RetryPolicy::quiz()).await?;
        let questions = schema::quiz_from_value(parse_structured(&result.text)?)?;

        self.telemetry.record_event(
            "content.quiz",
            json!({"chapter": chapter_title, "count": questions.len(), "attempts": result.attempts}),
        );
        Ok(questions)
    }

    /// Generate the final course summary from the chapter list.
    pub async fn generate_course_summary(
        &self,
        course_title: &str,
        chapter_titles: &[String],
    ) -> Result<String> {
        let prompt = prompts::summary_prompt(course_title, chapter_titles);
        let result =
            self.client.generate(&prompt, operation::SUMMARY, &RetryPolicy::summary()).await?;
        let summary = schema::summary_from_value(parse_structured(&result.text)?)?;

        self.telemetry.record_event(
            "content.summary",
            json!({"course": course_title, "attempts": result.attempts}),
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursekit_core::{CourseError, TextModel};
    use coursekit_model::MockTextModel;
    use coursekit_telemetry::NoopTelemetry;

    fn generators_over(model: MockTextModel) -> ContentGenerators {
        let client = GenerationClient::new(
            Arc::new(model) as Arc<dyn TextModel>,
            Arc::new(NoopTelemetry),
        );
        ContentGenerators::new(Arc::new(client), Arc::new(NoopTelemetry))
    }

    fn outline_json() -> String {
        serde_json::json!({
            "title": "Recursion",
            "summary": "Self-reference in programs",
            "chapters": [
                {"title": "Base Cases", "summary": "Where recursion stops"},
                {"title": "Call Stacks", "summary": "How calls nest"}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_outline_pipeline_end_to_end() {
        let model = MockTextModel::new("mock").with_response("outline", outline_json());
        let generators = generators_over(model);

        let outline =
            generators.generate_outline("Recursion", "practice", "beginner").await.unwrap();
        assert_eq!(outline.title, "Recursion");
        assert_eq!(outline.chapters.len(), 2);
    }

    #[tokio::test]
    async fn test_outline_recovers_from_fenced_response() {
        let fenced = format!("```json\n{}\n```", outline_json());
        let model = MockTextModel::new("mock").with_response("outline", fenced);
        let generators = generators_over(model);

        let outline =
            generators.generate_outline("Recursion", "practice", "beginner").await.unwrap();
        assert_eq!(outline.chapters.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_schema_raises_validation_not_parse() {
        // Parses as JSON but has no chapters.
        let model = MockTextModel::new("mock")
            .with_response("outline", r#"{"title": "Empty", "summary": "s", "chapters": []}"#);
        let generators = generators_over(model);

        let err = generators
            .generate_outline("Recursion", "practice", "beginner")
            .await
            .unwrap_err();
        assert!(matches!(err, CourseError::Validation(_)));
    }

    #[tokio::test]
    async fn test_flashcards_accept_bare_array() {
        let model = MockTextModel::new("mock").with_response(
            "flashcards",
            r#"[{"front": "What is a base case?", "back": "The input that stops recursing"}]"#,
        );
        let generators = generators_over(model);

        let cards = generators.generate_flashcards("Base Cases", "Recursion", 1).await.unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[tokio::test]
    async fn test_summary_returns_plain_string() {
        let model = MockTextModel::new("mock")
            .with_response("summary", r#"{"summary": "A tour of recursion."}"#);
        let generators = generators_over(model);

        let summary = generators
            .generate_course_summary("Recursion", &["Base Cases".to_string()])
            .await
            .unwrap();
        assert_eq!(summary, "A tour of recursion.");
    }
}
