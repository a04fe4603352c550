//! The generation client: owns retry/backoff around the text endpoint
//! and the streaming event model consumed by the content generators.

use crate::retry::RetryPolicy;
use async_stream::stream;
use coursekit_core::{CompletionRequest, CourseError, Result, TextModel};
use coursekit_telemetry::{TelemetrySink, Timer};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Arc;

/// Raw text plus how many attempts it took (1-based).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub attempts: u32,
}

/// Events emitted by [`GenerationClient::generate_stream`].
///
/// Streams are finite and terminate in either `Complete` or `Error`;
/// a terminal failure is delivered as an event rather than an `Err`
/// item, so consumers match on the event kind. A stream cannot be
/// resumed mid-flight — restart by calling `generate_stream` again.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Partial text, not yet complete.
    Chunk(String),
    /// Terminal success. Carries the full accumulated text; chunks from
    /// abandoned (retried) attempts are not part of it.
    Complete(GenerationResult),
    /// Terminal failure after all retries.
    Error { message: String, attempts: u32 },
}

pub type GenerationStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;

pub struct GenerationClient {
    model: Arc<dyn TextModel>,
    telemetry: Arc<dyn TelemetrySink>,
    temperature: f32,
    max_output_tokens: i32,
}

impl GenerationClient {
    pub fn new(model: Arc<dyn TextModel>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self { model, telemetry, temperature: 0.7, max_output_tokens: 8192 }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: i32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    fn request(&self, prompt: &str, operation: &str) -> CompletionRequest {
        CompletionRequest::new(prompt, operation)
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_output_tokens)
    }

    /// Issue a prompt with retry/backoff.
    ///
    /// Attempts `0..=max_retries`; after a failed attempt `n` the client
    /// sleeps `backoff * 2^n` before trying again. Exhaustion yields
    /// [`CourseError::Generation`] wrapping the final cause and the total
    /// attempt count. Each attempt emits a timing/outcome metric to the
    /// telemetry sink; telemetry can never affect the outcome.
    pub async fn generate(
        &self,
        prompt: &str,
        operation: &str,
        policy: &RetryPolicy,
    ) -> Result<GenerationResult> {
        let mut attempt: u32 = 0;

        loop {
            let timer = Timer::start("generation.attempt", &[("operation", operation)]);
            match self.model.complete(self.request(prompt, operation)).await {
                Ok(text) => {
                    timer.end(self.telemetry.as_ref(), &[("outcome", "ok")]);
                    self.telemetry.record_event(
                        "generation.complete",
                        serde_json::json!({ "operation": operation, "attempts": attempt + 1 }),
                    );
                    return Ok(GenerationResult { text, attempts: attempt + 1 });
                }
                Err(error) => {
                    timer.end(self.telemetry.as_ref(), &[("outcome", "error")]);
                    if attempt >= policy.max_retries {
                        return Err(CourseError::Generation {
                            message: error.to_string(),
                            attempts: attempt + 1,
                        });
                    }
                    let delay = policy.delay_for_attempt(attempt);
                    tracing::warn!(
                        operation = operation,
                        attempt = attempt + 1,
                        max_retries = policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Generation attempt failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Streaming variant of [`generate`](Self::generate).
    ///
    /// A failure mid-stream with retries remaining restarts the entire
    /// request from scratch; the partial text accumulated so far is
    /// discarded and never appears in the `Complete` event.
    pub fn generate_stream(
        &self,
        prompt: &str,
        operation: &str,
        policy: &RetryPolicy,
    ) -> GenerationStream {
        let model = Arc::clone(&self.model);
        let telemetry = Arc::clone(&self.telemetry);
        let request = self.request(prompt, operation);
        let operation = operation.to_string();
        let policy = policy.clone();

        Box::pin(stream! {
            let mut attempt: u32 = 0;

            loop {
                let timer = Timer::start("generation.attempt", &[("operation", &operation)]);
                let failure = match model.complete_stream(request.clone()).await {
                    Ok(mut chunks) => {
                        let mut accumulated = String::new();
                        let mut failure: Option<String> = None;
                        while let Some(item) = chunks.next().await {
                            match item {
                                Ok(chunk) => {
                                    accumulated.push_str(&chunk);
                                    yield StreamEvent::Chunk(chunk);
                                }
                                Err(error) => {
                                    failure = Some(error.to_string());
                                    break;
                                }
                            }
                        }
                        match failure {
                            Some(message) => message,
                            None => {
                                timer.end(telemetry.as_ref(), &[("outcome", "ok")]);
                                telemetry.record_event(
                                    "generation.complete",
                                    serde_json::json!({
                                        "operation": operation,
                                        "attempts": attempt + 1,
                                        "streamed": true,
                                    }),
                                );
                                yield StreamEvent::Complete(GenerationResult {
                                    text: accumulated,
                                    attempts: attempt + 1,
                                });
                                return;
                            }
                        }
                    }
                    Err(error) => error.to_string(),
                };

                timer.end(telemetry.as_ref(), &[("outcome", "error")]);
                if attempt >= policy.max_retries {
                    yield StreamEvent::Error { message: failure, attempts: attempt + 1 };
                    return;
                }
                let delay = policy.delay_for_attempt(attempt);
                tracing::warn!(
                    operation = %operation,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %failure,
                    "Streaming attempt failed; restarting request"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        })
    }
}
