//! Scripted text model for tests.
//!
//! Outcomes are queued per operation tag so concurrently-running
//! operations (e.g. flashcards and quiz for the same chapter) each see
//! a deterministic script regardless of scheduling order.

use async_trait::async_trait;
use coursekit_core::{CompletionRequest, CourseError, Result, TextChunkStream, TextModel};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone)]
enum MockOutcome {
    Text(String),
    Chunks(Vec<String>),
    Error(String),
    ChunksThenError(Vec<String>, String),
}

pub struct MockTextModel {
    name: String,
    calls: AtomicU32,
    scripts: Mutex<HashMap<String, VecDeque<MockOutcome>>>,
}

impl MockTextModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), calls: AtomicU32::new(0), scripts: Mutex::new(HashMap::new()) }
    }

    /// Queue a successful response for the given operation tag.
    #[must_use]
    pub fn with_response(self, operation: &str, text: impl Into<String>) -> Self {
        self.push(operation, MockOutcome::Text(text.into()));
        self
    }

    /// Queue a successful streaming response delivered as these chunks.
    #[must_use]
    pub fn with_chunks(self, operation: &str, chunks: Vec<String>) -> Self {
        self.push(operation, MockOutcome::Chunks(chunks));
        self
    }

    /// Queue a transport failure for the given operation tag.
    #[must_use]
    pub fn with_error(self, operation: &str, message: impl Into<String>) -> Self {
        self.push(operation, MockOutcome::Error(message.into()));
        self
    }

    /// Queue a stream that yields some chunks and then fails mid-flight.
    #[must_use]
    pub fn with_stream_failure(
        self,
        operation: &str,
        chunks: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        self.push(operation, MockOutcome::ChunksThenError(chunks, message.into()));
        self
    }

    /// Total completion calls across all operations.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, operation: &str, outcome: MockOutcome) {
        self.scripts
            .lock()
            .unwrap()
            .entry(operation.to_string())
            .or_default()
            .push_back(outcome);
    }

    fn next_outcome(&self, operation: &str) -> MockOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scripts
            .lock()
            .unwrap()
            .get_mut(operation)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| {
                MockOutcome::Error(format!("mock script exhausted for operation '{operation}'"))
            })
    }
}

#[async_trait]
impl TextModel for MockTextModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, req: CompletionRequest) -> Result<String> {
        match self.next_outcome(&req.operation) {
            MockOutcome::Text(text) => Ok(text),
            MockOutcome::Chunks(chunks) => Ok(chunks.concat()),
            MockOutcome::Error(message) | MockOutcome::ChunksThenError(_, message) => {
                Err(CourseError::Model(message))
            }
        }
    }

    async fn complete_stream(&self, req: CompletionRequest) -> Result<TextChunkStream> {
        let outcome = self.next_outcome(&req.operation);
        let stream = async_stream::stream! {
            match outcome {
                MockOutcome::Text(text) => yield Ok(text),
                MockOutcome::Chunks(chunks) => {
                    for chunk in chunks {
                        yield Ok(chunk);
                    }
                }
                MockOutcome::Error(message) => yield Err(CourseError::Model(message)),
                MockOutcome::ChunksThenError(chunks, message) => {
                    for chunk in chunks {
                        yield Ok(chunk);
                    }
                    yield Err(CourseError::Model(message));
                }
            }
        };
        Ok(Box::pin(stream))
    }
}
