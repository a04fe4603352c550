use crate::Result;
use async_trait::async_trait;
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

pub type TextChunkStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// The generative text endpoint collaborator.
///
/// Implementations must tolerate being asked for prose, markdown-fenced
/// JSON, or truncated output; repair happens downstream. Transport
/// failures surface as [`CourseError::Model`](crate::CourseError::Model)
/// and are retried by the generation client, not here.
#[async_trait]
pub trait TextModel: Send + Sync {
    fn name(&self) -> &str;

    /// One generation attempt. Returns the raw response text.
    async fn complete(&self, req: CompletionRequest) -> Result<String>;

    /// One streaming generation attempt, as a finite sequence of text
    /// chunks. The default implementation yields the non-streaming
    /// response as a single chunk.
    async fn complete_stream(&self, req: CompletionRequest) -> Result<TextChunkStream> {
        let text = self.complete(req).await?;
        Ok(Box::pin(futures::stream::once(async move { Ok(text) })))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<i32>,
    /// Operation tag used for metrics (e.g. "outline", "flashcards").
    pub operation: String,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: None,
            max_output_tokens: None,
            operation: operation.into(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: i32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}
