//! HTTP text-completion backend.
//!
//! Speaks the Gemini-style `generateContent` wire format: a JSON body of
//! `contents[].parts[].text` with a `generationConfig`, and SSE
//! (`alt=sse`) for streaming. The response may be prose, markdown-fenced
//! JSON, or truncated output — repair happens downstream in the parser.

use async_stream::stream;
use async_trait::async_trait;
use coursekit_core::{CompletionRequest, CourseError, Result, TextChunkStream, TextModel};
use futures::StreamExt;
use reqwest::Client;
use serde_json::{Value, json};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct HttpTextModelConfig {
    pub api_key: String,
    pub model: String,
    /// Override for self-hosted gateways; defaults to the public API.
    pub base_url: Option<String>,
}

impl HttpTextModelConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), base_url: None }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

pub struct HttpTextModel {
    client: Client,
    config: HttpTextModelConfig,
}

impl HttpTextModel {
    pub fn new(config: HttpTextModelConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| CourseError::Model(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn api_url(&self, stream: bool) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(GEMINI_API_BASE);
        let base = base.trim_end_matches('/');
        if stream {
            format!("{base}/models/{}:streamGenerateContent?alt=sse", self.config.model)
        } else {
            format!("{base}/models/{}:generateContent", self.config.model)
        }
    }

    fn build_body(req: &CompletionRequest) -> Value {
        let mut generation_config = serde_json::Map::new();
        if let Some(temperature) = req.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(max_output_tokens) = req.max_output_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(max_output_tokens));
        }

        json!({
            "contents": [{ "role": "user", "parts": [{ "text": req.prompt }] }],
            "generationConfig": Value::Object(generation_config),
        })
    }

    fn extract_text(value: &Value) -> Option<String> {
        let parts = value.get("candidates")?.get(0)?.get("content")?.get("parts")?.as_array()?;
        let text: String =
            parts.iter().filter_map(|part| part.get("text")?.as_str()).collect();
        if text.is_empty() { None } else { Some(text) }
    }

    async fn post(&self, req: &CompletionRequest, stream: bool) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.api_url(stream))
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&Self::build_body(req))
            .send()
            .await
            .map_err(|e| CourseError::Model(format!("Generation request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CourseError::Model(format!(
                "Generation API error ({status}): {error_text}"
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl TextModel for HttpTextModel {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, req: CompletionRequest) -> Result<String> {
        let response = self.post(&req, false).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| CourseError::Model(format!("Malformed generation response: {e}")))?;

        Self::extract_text(&body)
            .ok_or_else(|| CourseError::Model("Generation response contained no text".to_string()))
    }

    async fn complete_stream(&self, req: CompletionRequest) -> Result<TextChunkStream> {
        let response = self.post(&req, true).await?;

        let chunk_stream = stream! {
            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(CourseError::Model(format!("Stream read error: {e}")));
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // Process complete SSE lines; partial lines stay buffered.
                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim().to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    if line.is_empty() || line == "data: [DONE]" {
                        continue;
                    }

                    if let Some(data) = line.strip_prefix("data: ") {
                        match serde_json::from_str::<Value>(data) {
                            Ok(event) => {
                                if let Some(text) = Self::extract_text(&event) {
                                    yield Ok(text);
                                }
                            }
                            Err(e) => {
                                yield Err(CourseError::Model(format!(
                                    "Malformed stream event: {e}"
                                )));
                                return;
                            }
                        }
                    }
                }
            }
        };

        Ok(Box::pin(chunk_stream))
    }
}
