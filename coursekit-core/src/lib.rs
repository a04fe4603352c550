//! # coursekit-core
//!
//! Core traits and types for CourseKit's content-generation pipeline.
//!
//! ## Overview
//!
//! This crate provides the foundational abstractions shared by every
//! CourseKit component:
//!
//! - [`TextModel`] - The single text-completion endpoint contract
//! - [`CourseOutline`] / [`ChapterNotes`] / [`Flashcard`] / [`QuizQuestion`] - Validated content
//! - [`CourseStatus`] / [`GenerationStats`] - Run lifecycle and counters
//! - [`CourseError`] / [`Result`] - Unified error handling
//!
//! The generation client, repair parser, content generators, fallback
//! templates, and orchestrator live in the sibling crates and all speak
//! in these types.

pub mod content;
pub mod course;
pub mod error;
pub mod model;

pub use content::{
    ChapterNotes, ChapterSpec, CourseOutline, DifficultyGuidance, Flashcard, KeyPoint,
    QuizQuestion,
};
pub use course::{
    ChapterRecord, CourseRecord, CourseRequest, CourseStatus, ErrorMetadata, ErrorType,
    FlashcardRecord, GenerationStats, NoteRecord, QuizRecord,
};
pub use error::{CourseError, Result};
pub use model::{CompletionRequest, TextChunkStream, TextModel};
