//! The course orchestrator: drives outline → chapters → notes /
//! flashcards / quiz → summary, owns the course status state machine,
//! and accumulates per-run statistics.
//!
//! Failure policy: outline failures and persistence failures are fatal
//! and mark the course `failed` with classified error metadata. Notes,
//! flashcard, and quiz failures are caught per chapter, logged, and
//! counted as warnings; canned fallback content is substituted only
//! when [`should_use_fallback`] approves the failure.
//!
//! Chapters are processed strictly sequentially; within a chapter the
//! flashcard and quiz generations run as two concurrent tasks joined
//! before advancing. Nothing at this layer prevents two concurrent runs
//! for the same course id — callers gate on `status == generating`.

use std::sync::Arc;

use coursekit_content::fallback::{
    fallback_chapter_notes, fallback_flashcards, fallback_quiz, should_use_fallback,
};
use coursekit_content::ContentGenerators;
use chrono::Utc;
use coursekit_core::{
    ChapterRecord, CourseError, CourseRecord, CourseRequest, CourseStatus, ErrorMetadata,
    ErrorType, FlashcardRecord, GenerationStats, NoteRecord, QuizRecord, Result,
};
use coursekit_telemetry::{info, warn, TelemetrySink};
use serde_json::json;
use uuid::Uuid;

use crate::store::CourseStore;

const DEFAULT_FLASHCARD_COUNT: u32 = 6;
const DEFAULT_QUIZ_COUNT: u32 = 5;

pub struct CourseOrchestrator {
    generators: Arc<ContentGenerators>,
    store: Arc<dyn CourseStore>,
    telemetry: Arc<dyn TelemetrySink>,
    flashcard_count: u32,
    quiz_count: u32,
    /// When false (production), failed courses carry only a
    /// human-readable error message; raw previews and extracts stay in
    /// the logs.
    expose_diagnostics: bool,
}

impl CourseOrchestrator {
    pub fn new(
        generators: Arc<ContentGenerators>,
        store: Arc<dyn CourseStore>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            generators,
            store,
            telemetry,
            flashcard_count: DEFAULT_FLASHCARD_COUNT,
            quiz_count: DEFAULT_QUIZ_COUNT,
            expose_diagnostics: false,
        }
    }

    #[must_use]
    pub fn with_flashcard_count(mut self, count: u32) -> Self {
        self.flashcard_count = count;
        self
    }

    #[must_use]
    pub fn with_quiz_count(mut self, count: u32) -> Self {
        self.quiz_count = count;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, expose: bool) -> Self {
        self.expose_diagnostics = expose;
        self
    }

    /// Run the full generation workflow for one course.
    ///
    /// Returns the run's statistics once the course reaches `ready`.
    /// On unrecoverable failure the course is marked `failed` with
    /// classified error metadata and the error is rethrown. Either way
    /// a final stats snapshot is emitted to the telemetry sink, and the
    /// course always ends in a terminal status.
    pub async fn generate_course_content(&self, request: CourseRequest) -> Result<GenerationStats> {
        let mut stats = GenerationStats::default();
        let run = self.run(&request, &mut stats).await;

        let outcome = match run {
            Ok(()) => Ok(stats),
            Err(error) => {
                stats.errors += 1;
                self.mark_failed(&request.course_id, &error).await;
                Err(error)
            }
        };

        self.telemetry.record_event(
            "course.stats",
            json!({
                "courseId": request.course_id,
                "succeeded": outcome.is_ok(),
                "stats": serde_json::to_value(stats).unwrap_or_default(),
            }),
        );
        outcome
    }

    async fn run(&self, request: &CourseRequest, stats: &mut GenerationStats) -> Result<()> {
        info!(
            course_id = %request.course_id,
            topic = %request.topic,
            difficulty = %request.difficulty_level,
            "Starting course generation"
        );

        // Outline failures are fatal; no fallback substitution here.
        let outline = self
            .generators
            .generate_outline(&request.topic, &request.study_type, &request.difficulty_level)
            .await?;

        self.store
            .insert_course(CourseRecord {
                id: request.course_id.clone(),
                user_id: request.user_id.clone(),
                topic: request.topic.clone(),
                study_type: request.study_type.clone(),
                difficulty_level: request.difficulty_level.clone(),
                title: outline.title.clone(),
                summary: outline.summary.clone(),
                status: CourseStatus::Generating,
            })
            .await?;

        let chapters: Vec<ChapterRecord> = outline
            .chapters
            .iter()
            .enumerate()
            .map(|(index, chapter)| ChapterRecord {
                id: Uuid::new_v4().to_string(),
                course_id: request.course_id.clone(),
                title: chapter.title.clone(),
                summary: chapter.summary.clone(),
                order: (index + 1) as u32,
            })
            .collect();
        self.store.insert_chapters(chapters.clone()).await?;

        let mut notes: Vec<NoteRecord> = Vec::new();
        let mut flashcards: Vec<FlashcardRecord> = Vec::new();
        let mut quizzes: Vec<QuizRecord> = Vec::new();

        for chapter in &chapters {
            self.chapter_notes(request, chapter, &mut notes, stats).await;

            // Flashcards and quiz are independent; run them as a
            // concurrent pair, joined before the next chapter.
            let (cards_result, quiz_result) = tokio::join!(
                self.generators.generate_flashcards(
                    &chapter.title,
                    &request.topic,
                    self.flashcard_count
                ),
                self.generators.generate_quiz(&chapter.title, &request.topic, self.quiz_count),
            );

            match cards_result {
                Ok(cards) => {
                    stats.flashcards_generated += cards.len() as u32;
                    flashcards.extend(cards.into_iter().map(|card| FlashcardRecord {
                        id: Uuid::new_v4().to_string(),
                        course_id: request.course_id.clone(),
                        chapter_id: chapter.id.clone(),
                        front: card.front,
                        back: card.back,
                    }));
                }
                Err(error) => {
                    stats.warnings += 1;
                    warn!(chapter = %chapter.title, error = %error, "Flashcard generation failed");
                    if should_use_fallback(&error, retries_spent(&error)) {
                        let cards = fallback_flashcards(
                            &chapter.title,
                            &request.topic,
                            self.flashcard_count,
                        );
                        stats.flashcards_generated += cards.len() as u32;
                        flashcards.extend(cards.into_iter().map(|card| FlashcardRecord {
                            id: Uuid::new_v4().to_string(),
                            course_id: request.course_id.clone(),
                            chapter_id: chapter.id.clone(),
                            front: card.front,
                            back: card.back,
                        }));
                    }
                }
            }

            match quiz_result {
                Ok(questions) => {
                    stats.quizzes_generated += questions.len() as u32;
                    quizzes.extend(questions.into_iter().map(|question| QuizRecord {
                        id: Uuid::new_v4().to_string(),
                        course_id: request.course_id.clone(),
                        chapter_id: chapter.id.clone(),
                        question,
                    }));
                }
                Err(error) => {
                    stats.warnings += 1;
                    warn!(chapter = %chapter.title, error = %error, "Quiz generation failed");
                    if should_use_fallback(&error, retries_spent(&error)) {
                        let questions =
                            fallback_quiz(&chapter.title, &request.topic, self.quiz_count);
                        stats.quizzes_generated += questions.len() as u32;
                        quizzes.extend(questions.into_iter().map(|question| QuizRecord {
                            id: Uuid::new_v4().to_string(),
                            course_id: request.course_id.clone(),
                            chapter_id: chapter.id.clone(),
                            question,
                        }));
                    }
                }
            }

            stats.chapters_generated += 1;
        }

        self.store.insert_notes(notes).await?;
        self.store.insert_flashcards(flashcards).await?;
        self.store.insert_quizzes(quizzes).await?;

        let chapter_titles: Vec<String> = chapters.iter().map(|c| c.title.clone()).collect();
        let summary = match self
            .generators
            .generate_course_summary(&outline.title, &chapter_titles)
            .await
        {
            Ok(summary) => summary,
            Err(error) => {
                stats.warnings += 1;
                warn!(error = %error, "Course summary failed; keeping the outline summary");
                outline.summary.clone()
            }
        };

        self.store.update_course_summary(&request.course_id, &summary).await?;
        self.store.update_course_status(&request.course_id, CourseStatus::Ready).await?;

        info!(
            course_id = %request.course_id,
            chapters = stats.chapters_generated,
            warnings = stats.warnings,
            "Course generation finished"
        );
        Ok(())
    }

    /// Notes run first within a chapter since later material may build
    /// on them. Failure leaves the chapter without notes (warning)
    /// unless the failure qualifies for fallback substitution.
    async fn chapter_notes(
        &self,
        request: &CourseRequest,
        chapter: &ChapterRecord,
        notes: &mut Vec<NoteRecord>,
        stats: &mut GenerationStats,
    ) {
        let result = self
            .generators
            .generate_chapter_notes(
                &chapter.title,
                &chapter.summary,
                &request.topic,
                &request.difficulty_level,
            )
            .await;

        match result {
            Ok(chapter_notes) => {
                stats.notes_generated += 1;
                notes.push(NoteRecord {
                    id: Uuid::new_v4().to_string(),
                    course_id: request.course_id.clone(),
                    chapter_id: chapter.id.clone(),
                    notes: chapter_notes,
                });
            }
            Err(error) => {
                stats.warnings += 1;
                warn!(chapter = %chapter.title, error = %error, "Chapter notes failed");
                if should_use_fallback(&error, retries_spent(&error)) {
                    stats.notes_generated += 1;
                    notes.push(NoteRecord {
                        id: Uuid::new_v4().to_string(),
                        course_id: request.course_id.clone(),
                        chapter_id: chapter.id.clone(),
                        notes: fallback_chapter_notes(&chapter.title, &request.topic),
                    });
                }
            }
        }
    }

    /// Mark the course failed with classified error metadata. Storage
    /// problems here are logged, never allowed to mask the original
    /// error.
    async fn mark_failed(&self, course_id: &str, error: &CourseError) {
        // Classify on the full error text; the persisted message may be
        // the sanitized human-readable form.
        let message =
            if self.expose_diagnostics { error.to_string() } else { error.human_message() };
        let metadata = ErrorMetadata {
            error: message,
            error_type: ErrorType::classify(&error.to_string()),
            timestamp: Utc::now(),
        };

        warn!(
            course_id = %course_id,
            error_type = ?metadata.error_type,
            error = %error,
            "Course generation failed"
        );

        if let Err(store_error) = self.store.update_course_error(course_id, metadata).await {
            warn!(course_id = %course_id, error = %store_error, "Could not persist error metadata");
        }
        if let Err(store_error) =
            self.store.update_course_status(course_id, CourseStatus::Failed).await
        {
            warn!(course_id = %course_id, error = %store_error, "Could not mark course failed");
        }
    }
}

/// How many retries a failure already consumed, for the fallback gate.
fn retries_spent(error: &CourseError) -> u32 {
    match error {
        CourseError::Generation { attempts, .. } => attempts.saturating_sub(1),
        _ => 0,
    }
}
