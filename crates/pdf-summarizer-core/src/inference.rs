//! Summarization through an Ollama-compatible `/api/generate` endpoint.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::SummaryRequest;

/// Default generation endpoint of a local Ollama server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";

/// Returned in place of a summary when the inference call fails for any reason.
pub const SUMMARY_SENTINEL: &str = "Error: Could not summarize.";

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("inference server returned HTTP {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("response body has no 'response' string field")]
    MissingResponse,
}

/// A text generation service that can answer a single prompt.
pub trait InferenceBackend: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Run one non-streaming generation and return the generated text.
    fn generate<'a>(
        &'a self,
        model: &'a str,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, InferenceError>> + Send + 'a>>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// HTTP client for an Ollama server.
///
/// No timeout is applied unless one is configured with [`OllamaClient::with_timeout`];
/// a hung server then blocks the calling task indefinitely.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl OllamaClient {
    /// Create a client for `endpoint`, which may be a bare host (`localhost:11434`),
    /// a base URL, or the full `/api/generate` URL.
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: generate_url(endpoint),
            timeout: None,
        }
    }

    /// Bound every request by `timeout`. A zero duration disables the bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() { None } else { Some(timeout) };
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_generate(&self, model: &str, prompt: &str) -> Result<String, InferenceError> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(InferenceError::Status(status.as_u16()));
        }

        let raw = resp.text().await?;
        let data: serde_json::Value = serde_json::from_str(&raw)?;
        data["response"]
            .as_str()
            .map(str::to_string)
            .ok_or(InferenceError::MissingResponse)
    }
}

impl InferenceBackend for OllamaClient {
    fn name(&self) -> &str {
        "Ollama"
    }

    fn generate<'a>(
        &'a self,
        model: &'a str,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, InferenceError>> + Send + 'a>> {
        Box::pin(self.post_generate(model, prompt))
    }
}

/// Normalise a host, base URL or full URL into the `/api/generate` URL.
fn generate_url(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_ENDPOINT.to_string();
    }
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    if with_scheme.ends_with("/api/generate") {
        with_scheme
    } else {
        format!("{}/api/generate", with_scheme)
    }
}

/// Build the instruction prompt embedding the verbatim document text.
pub fn build_prompt(text: &str, sentence_count: u32) -> String {
    format!(
        "Summarize the following text in approximately {} sentences:\n\n{}",
        sentence_count, text
    )
}

/// Summarize `request.text` with `backend`.
///
/// Failures never surface as errors: they are logged and the caller receives
/// [`SUMMARY_SENTINEL`] as if it were the summary.
pub async fn summarize(backend: &dyn InferenceBackend, request: &SummaryRequest) -> String {
    let prompt = build_prompt(&request.text, request.sentence_count);
    match backend.generate(request.model.id(), &prompt).await {
        Ok(summary) => {
            tracing::info!(
                backend = backend.name(),
                model = request.model.id(),
                chars = summary.len(),
                "summary received"
            );
            summary
        }
        Err(err) => {
            tracing::warn!(
                backend = backend.name(),
                model = request.model.id(),
                error = %err,
                "summarization failed"
            );
            SUMMARY_SENTINEL.to_string()
        }
    }
}
