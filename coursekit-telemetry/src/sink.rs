//! The telemetry collaborator consumed by every CourseKit component.
//!
//! Sinks are fire-and-forget: no method returns a `Result`, and
//! implementations must never block or panic. A telemetry failure must
//! not be able to change a generation outcome.

use serde_json::Value;
use std::time::Instant;

pub trait TelemetrySink: Send + Sync {
    /// Record a discrete event with an arbitrary JSON payload.
    fn record_event(&self, kind: &str, payload: Value);

    /// Record a numeric metric with optional tags.
    fn record_metric(&self, name: &str, value: f64, tags: &[(&str, &str)]);
}

/// A running timer. Obtain via [`Timer::start`], finish with
/// [`Timer::end`], which records a `<name>.duration_ms` metric on the
/// given sink and returns the elapsed milliseconds.
#[derive(Debug)]
pub struct Timer {
    name: String,
    tags: Vec<(String, String)>,
    started: Instant,
}

impl Timer {
    pub fn start(name: impl Into<String>, tags: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            tags: tags.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            started: Instant::now(),
        }
    }

    pub fn end(self, sink: &dyn TelemetrySink, extra: &[(&str, &str)]) -> u64 {
        let duration_ms = self.started.elapsed().as_millis() as u64;
        let mut tags: Vec<(&str, &str)> =
            self.tags.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        tags.extend_from_slice(extra);
        sink.record_metric(&format!("{}.duration_ms", self.name), duration_ms as f64, &tags);
        duration_ms
    }
}

/// Sink that forwards everything to `tracing` at debug level.
#[derive(Debug, Default, Clone)]
pub struct TracingTelemetry;

impl TracingTelemetry {
    pub fn new() -> Self {
        Self
    }
}

impl TelemetrySink for TracingTelemetry {
    fn record_event(&self, kind: &str, payload: Value) {
        tracing::debug!(event.kind = kind, payload = %payload, "telemetry event");
    }

    fn record_metric(&self, name: &str, value: f64, tags: &[(&str, &str)]) {
        tracing::debug!(metric.name = name, metric.value = value, ?tags, "telemetry metric");
    }
}

/// Sink that discards everything. Useful as a test default.
#[derive(Debug, Default, Clone)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn record_event(&self, _kind: &str, _payload: Value) {}

    fn record_metric(&self, _name: &str, _value: f64, _tags: &[(&str, &str)]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        metrics: Mutex<Vec<(String, f64)>>,
        events: Mutex<Vec<String>>,
    }

    impl TelemetrySink for RecordingSink {
        fn record_event(&self, kind: &str, _payload: Value) {
            self.events.lock().unwrap().push(kind.to_string());
        }

        fn record_metric(&self, name: &str, value: f64, _tags: &[(&str, &str)]) {
            self.metrics.lock().unwrap().push((name.to_string(), value));
        }
    }

    #[test]
    fn test_timer_records_duration_metric() {
        let sink = RecordingSink::default();
        let timer = Timer::start("generation.attempt", &[("operation", "outline")]);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let elapsed = timer.end(&sink, &[("outcome", "ok")]);

        assert!(elapsed >= 5);
        let metrics = sink.metrics.lock().unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].0, "generation.attempt.duration_ms");
        assert!(metrics[0].1 >= 5.0);
    }

    #[test]
    fn test_noop_sink_accepts_everything() {
        let sink = NoopTelemetry;
        sink.record_event("anything", serde_json::json!({"ok": true}));
        sink.record_metric("anything", 1.0, &[]);
    }
}
