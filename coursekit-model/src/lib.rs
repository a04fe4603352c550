//! # coursekit-model
//!
//! The generation client layer for CourseKit.
//!
//! ## Overview
//!
//! - [`GenerationClient`] - retry/backoff loop and streaming event model
//!   over any [`TextModel`](coursekit_core::TextModel)
//! - [`RetryPolicy`] - per-operation retry defaults (outline, notes,
//!   flashcards, quiz, summary)
//! - [`HttpTextModel`] - reqwest backend speaking the Gemini-style
//!   `generateContent` wire format (SSE for streaming)
//! - [`MockTextModel`] - scripted backend for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coursekit_model::{GenerationClient, HttpTextModel, HttpTextModelConfig, RetryPolicy};
//! use coursekit_telemetry::TracingTelemetry;
//! use std::sync::Arc;
//!
//! # async fn example() -> coursekit_core::Result<()> {
//! let api_key = std::env::var("GOOGLE_API_KEY").unwrap();
//! let model = HttpTextModel::new(HttpTextModelConfig::new(api_key, "gemini-2.0-flash"))?;
//! let client = GenerationClient::new(Arc::new(model), Arc::new(TracingTelemetry::new()));
//!
//! let result = client.generate("Say hi as JSON", "demo", &RetryPolicy::outline()).await?;
//! println!("{} (attempts: {})", result.text, result.attempts);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod http;
pub mod mock;
pub mod retry;

pub use client::{GenerationClient, GenerationResult, GenerationStream, StreamEvent};
pub use http::{HttpTextModel, HttpTextModelConfig};
pub use mock::MockTextModel;
pub use retry::RetryPolicy;
