//! # coursekit-telemetry
//!
//! Observability for CourseKit: structured logging via `tracing` and a
//! fire-and-forget [`TelemetrySink`] collaborator that components use
//! for events, metrics, and timers.
//!
//! Telemetry never blocks and never fails; a sink problem cannot affect
//! a generation outcome.
//!
//! ## Usage
//!
//! ```rust
//! use coursekit_telemetry::{init_telemetry, TracingTelemetry, TelemetrySink, Timer};
//!
//! init_telemetry("course-generator").expect("Failed to initialize telemetry");
//!
//! let sink = TracingTelemetry::new();
//! let timer = Timer::start("generation.attempt", &[("operation", "outline")]);
//! // ... do work ...
//! let duration_ms = timer.end(&sink, &[("outcome", "ok")]);
//! ```

pub mod init;
pub mod sink;

// Re-export tracing macros for convenience
pub use tracing::{Span, debug, error, info, instrument, trace, warn};

pub use init::init_telemetry;
pub use sink::{NoopTelemetry, TelemetrySink, Timer, TracingTelemetry};
