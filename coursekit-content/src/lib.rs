//! # coursekit-content
//!
//! Turning raw model output into validated course content.
//!
//! ## Overview
//!
//! - [`parse_structured`] - ordered multi-strategy JSON repair parser
//! - [`ContentGenerators`] - the outline / notes / flashcards / quiz /
//!   summary pipelines (prompt → generate → repair-parse → validate)
//! - [`fallback`] - keyword-matched canned content for unrecoverable
//!   failures, gated by [`fallback::should_use_fallback`]
//! - [`prompts`] / [`schema`] - the fixed prompt templates and the
//!   per-content-type validators the generators are built from

pub mod fallback;
pub mod generators;
pub mod prompts;
pub mod repair;
pub mod schema;

pub use generators::{ContentGenerators, operation};
pub use repair::parse_structured;
