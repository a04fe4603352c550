//! # coursekit-runner
//!
//! The end-to-end course generation workflow.
//!
//! ## Overview
//!
//! - [`CourseOrchestrator`] - outline → chapters → notes / flashcards /
//!   quiz → summary, with the `draft → generating → {ready, failed}`
//!   status state machine and per-run [`GenerationStats`](coursekit_core::GenerationStats)
//! - [`CourseStore`] - the persistence collaborator the orchestrator
//!   writes through
//! - [`InMemoryCourseStore`] - `RwLock`-map store for tests and local use

pub mod inmemory;
pub mod orchestrator;
pub mod store;

pub use inmemory::InMemoryCourseStore;
pub use orchestrator::CourseOrchestrator;
pub use store::CourseStore;
