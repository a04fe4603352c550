//! Retry and backoff behavior of the generation client.

use std::sync::Arc;
use std::time::{Duration, Instant};

use coursekit_core::{CourseError, TextModel};
use coursekit_model::{GenerationClient, MockTextModel, RetryPolicy};
use coursekit_telemetry::NoopTelemetry;

fn client_over(model: MockTextModel) -> (Arc<MockTextModel>, GenerationClient) {
    let model = Arc::new(model);
    let client = GenerationClient::new(
        Arc::clone(&model) as Arc<dyn TextModel>,
        Arc::new(NoopTelemetry),
    );
    (model, client)
}

#[tokio::test]
async fn transport_is_called_exactly_max_retries_plus_one_times() {
    let model = MockTextModel::new("always-fails")
        .with_error("outline", "failure one")
        .with_error("outline", "failure two")
        .with_error("outline", "failure three")
        .with_error("outline", "final failure");
    let (model, client) = client_over(model);

    let err = client
        .generate("prompt", "outline", &RetryPolicy::new(3, 1))
        .await
        .expect_err("all attempts fail");

    assert_eq!(model.call_count(), 4);
    match err {
        CourseError::Generation { message, attempts } => {
            assert_eq!(attempts, 4);
            // The raised error references the last underlying failure.
            assert!(message.contains("final failure"), "got: {message}");
        }
        other => panic!("expected Generation error, got {other:?}"),
    }
}

#[tokio::test]
async fn zero_max_retries_means_a_single_attempt() {
    let model = MockTextModel::new("fails-once").with_error("quiz", "nope");
    let (model, client) = client_over(model);

    let err = client.generate("prompt", "quiz", &RetryPolicy::new(0, 50)).await.unwrap_err();
    assert_eq!(model.call_count(), 1);
    assert!(matches!(err, CourseError::Generation { attempts: 1, .. }));
}

#[tokio::test]
async fn backoff_waits_are_exponential_without_jitter() {
    // Two forced failures with backoff 100ms: waits of 100ms then 200ms,
    // so success cannot be observed before ~250ms has elapsed.
    let model = MockTextModel::new("flaky")
        .with_error("notes", "failure one")
        .with_error("notes", "failure two")
        .with_response("notes", "{\"ok\":true}");
    let (_, client) = client_over(model);

    let started = Instant::now();
    let result =
        client.generate("prompt", "notes", &RetryPolicy::new(3, 100)).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(result.attempts, 3);
    assert!(
        elapsed > Duration::from_millis(250),
        "expected >250ms of backoff, observed {elapsed:?}"
    );
}

#[tokio::test]
async fn success_on_first_attempt_reports_one_attempt() {
    let model = MockTextModel::new("healthy").with_response("summary", "all good");
    let (model, client) = client_over(model);

    let result =
        client.generate("prompt", "summary", &RetryPolicy::summary()).await.unwrap();
    assert_eq!(result.attempts, 1);
    assert_eq!(result.text, "all good");
    assert_eq!(model.call_count(), 1);
}
