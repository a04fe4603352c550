//! # CourseKit
//!
//! AI course content generation for Rust: give it a topic, a study
//! type, and a difficulty level; get back a persisted course with an
//! outline, per-chapter notes, flashcards, and quizzes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use coursekit::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api_key = std::env::var("GOOGLE_API_KEY").expect("GOOGLE_API_KEY not set");
//!     let model = HttpTextModel::new(HttpTextModelConfig::new(api_key, "gemini-2.0-flash"))?;
//!
//!     let client = GenerationClient::new(Arc::new(model), Arc::new(TracingTelemetry::new()));
//!     let generators = ContentGenerators::new(Arc::new(client), Arc::new(TracingTelemetry::new()));
//!     let store = Arc::new(InMemoryCourseStore::new());
//!
//!     let orchestrator = CourseOrchestrator::new(
//!         Arc::new(generators),
//!         store.clone(),
//!         Arc::new(TracingTelemetry::new()),
//!     );
//!
//!     let stats = orchestrator
//!         .generate_course_content(CourseRequest {
//!             course_id: "course-1".to_string(),
//!             user_id: "user-1".to_string(),
//!             topic: "Intro to Recursion".to_string(),
//!             study_type: "practice".to_string(),
//!             difficulty_level: "beginner".to_string(),
//!         })
//!         .await?;
//!
//!     println!("generated {} chapters ({} warnings)", stats.chapters_generated, stats.warnings);
//!     Ok(())
//! }
//! ```
//!
//! ## Related Crates
//!
//! CourseKit is composed of modular crates that can be used independently:
//!
//! - `coursekit-core` - error taxonomy, content data model, the
//!   `TextModel` trait
//! - `coursekit-telemetry` - tracing setup and the fire-and-forget
//!   `TelemetrySink`
//! - `coursekit-model` - retry/backoff generation client, streaming
//!   events, HTTP and mock backends
//! - `coursekit-content` - JSON repair parsing, prompts, schema
//!   validation, fallback templates
//! - `coursekit-runner` - the course orchestrator and persistence
//!   collaborator

// Core types are always in scope.
pub use coursekit_core::*;

// Re-export common dependencies for convenience
pub use anyhow;
pub use async_trait::async_trait;
pub use futures;
pub use serde;
pub use serde_json;
pub use tokio;

/// The generation client layer: retry/backoff, streaming, backends.
pub mod model {
    pub use coursekit_model::*;
}

/// Repair parsing, prompts, schema validation, content generators, and
/// fallback templates.
pub mod content {
    pub use coursekit_content::*;
}

/// Orchestration and persistence.
pub mod runner {
    pub use coursekit_runner::*;
}

/// Tracing initialization and the telemetry sink.
pub mod telemetry {
    pub use coursekit_telemetry::*;
}

/// Convenience prelude for common imports.
///
/// ```
/// use coursekit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ChapterNotes, CompletionRequest, CourseError, CourseOutline, CourseRequest, CourseStatus,
        ErrorType, Flashcard, GenerationStats, QuizQuestion, Result, TextModel,
    };

    pub use crate::content::{fallback, parse_structured, ContentGenerators};
    pub use crate::model::{
        GenerationClient, GenerationResult, HttpTextModel, HttpTextModelConfig, MockTextModel,
        RetryPolicy, StreamEvent,
    };
    pub use crate::runner::{CourseOrchestrator, CourseStore, InMemoryCourseStore};
    pub use crate::telemetry::{init_telemetry, NoopTelemetry, TelemetrySink, TracingTelemetry};

    pub use std::sync::Arc;
}
