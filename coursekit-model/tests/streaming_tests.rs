//! Streaming event semantics: chunk/complete/error kinds, terminal
//! errors as events, and full-request restarts on mid-stream failure.

use std::sync::Arc;

use coursekit_core::TextModel;
use coursekit_model::{GenerationClient, GenerationResult, MockTextModel, RetryPolicy, StreamEvent};
use coursekit_telemetry::NoopTelemetry;
use futures::StreamExt;

fn client_over(model: MockTextModel) -> (Arc<MockTextModel>, GenerationClient) {
    let model = Arc::new(model);
    let client = GenerationClient::new(
        Arc::clone(&model) as Arc<dyn TextModel>,
        Arc::new(NoopTelemetry),
    );
    (model, client)
}

#[tokio::test]
async fn stream_terminates_with_complete_on_success() {
    let model = MockTextModel::new("mock")
        .with_chunks("outline", vec!["{\"a\":".to_string(), "1}".to_string()]);
    let (_, client) = client_over(model);

    let events: Vec<_> =
        client.generate_stream("prompt", "outline", &RetryPolicy::new(0, 1)).collect().await;

    assert!(matches!(events[0], StreamEvent::Chunk(_)));
    assert!(matches!(events[1], StreamEvent::Chunk(_)));
    assert_eq!(
        events[2],
        StreamEvent::Complete(GenerationResult { text: "{\"a\":1}".to_string(), attempts: 1 })
    );
}

#[tokio::test]
async fn stream_emits_error_event_instead_of_raising() {
    let model = MockTextModel::new("mock").with_error("quiz", "service unavailable");
    let (_, client) = client_over(model);

    let events: Vec<_> =
        client.generate_stream("prompt", "quiz", &RetryPolicy::new(0, 1)).collect().await;

    assert_eq!(events.len(), 1);
    match &events[0] {
        StreamEvent::Error { message, attempts } => {
            assert!(message.contains("service unavailable"));
            assert_eq!(*attempts, 1);
        }
        other => panic!("expected Error event, got {other:?}"),
    }
}

#[tokio::test]
async fn mid_stream_failure_restarts_the_whole_request() {
    // First attempt yields a partial chunk then dies; the retry restarts
    // from scratch and its Complete carries only the fresh attempt's text.
    let model = MockTextModel::new("mock")
        .with_stream_failure("notes", vec!["GARBAGE-".to_string()], "connection reset")
        .with_chunks("notes", vec!["clean ".to_string(), "output".to_string()]);
    let (model, client) = client_over(model);

    let events: Vec<_> =
        client.generate_stream("prompt", "notes", &RetryPolicy::new(1, 1)).collect().await;

    let complete = events
        .iter()
        .find_map(|event| match event {
            StreamEvent::Complete(result) => Some(result.clone()),
            _ => None,
        })
        .expect("stream should complete after retry");

    // Partial output from the failed attempt is discarded.
    assert_eq!(complete.text, "clean output");
    assert_eq!(complete.attempts, 2);
    assert_eq!(model.call_count(), 2);
}

#[tokio::test]
async fn stream_error_is_terminal_after_retries_exhaust() {
    let model = MockTextModel::new("mock")
        .with_stream_failure("summary", vec!["x".to_string()], "first failure")
        .with_error("summary", "second failure");
    let (model, client) = client_over(model);

    let events: Vec<_> =
        client.generate_stream("prompt", "summary", &RetryPolicy::new(1, 1)).collect().await;

    let last = events.last().unwrap();
    match last {
        StreamEvent::Error { message, attempts } => {
            assert!(message.contains("second failure"));
            assert_eq!(*attempts, 2);
        }
        other => panic!("expected terminal Error event, got {other:?}"),
    }
    assert_eq!(model.call_count(), 2);
}
