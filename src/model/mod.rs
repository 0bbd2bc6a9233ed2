//! Generative model transport: the boundary to the remote text model
//!
//! Defines the client trait and the wire envelope. Two implementations:
//! - `HttpGenerativeModel`: POSTs to a `generateContent` endpoint (production)
//! - `MockModel`: returns preconfigured envelopes or failures (testing)
//!
//! Only `candidates[0].content.parts[0].text` of the envelope is consumed;
//! everything else is opaque.

mod http;

pub use http::HttpGenerativeModel;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Why a remote analysis could not be used.
///
/// Every variant is recoverable: the orchestrator falls back to the local
/// heuristic and never surfaces these to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteAnalysisError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),
    #[error("response contained no candidate text")]
    NoCandidate,
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RemoteAnalysisError {
    /// Network, status, or timeout failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// The call succeeded but its content was unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::NoCandidate | Self::Malformed(_))
    }
}

// ---------------------------------------------------------------------------
// Wire envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.into(),
                }],
            }],
            generation_config: config,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Envelope carrying a single candidate with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![CandidatePart {
                        text: Some(text.into()),
                    }],
                }),
            }],
        }
    }

    /// `candidates[0].content.parts[0].text`, when present and non-blank.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Client trait
// ---------------------------------------------------------------------------

/// A generative text model reachable over some transport.
///
/// One call per invocation, no retries.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Identifier for logs.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, RemoteAnalysisError>;
}

/// Mock model for testing: returns a preconfigured outcome.
pub struct MockModel {
    outcome: Result<GenerateContentResponse, RemoteAnalysisError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockModel {
    /// Respond with an envelope carrying `text`.
    pub fn responding(text: impl Into<String>) -> Self {
        Self::with_envelope(GenerateContentResponse::with_text(text))
    }

    /// Respond with an arbitrary envelope.
    pub fn with_envelope(envelope: GenerateContentResponse) -> Self {
        Self {
            outcome: Ok(envelope),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every call with `error`.
    pub fn failing(error: RemoteAnalysisError) -> Self {
        Self {
            outcome: Err(error),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleep before answering, to exercise timeouts and overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `generate` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _prompt: &str) -> Result<GenerateContentResponse, RemoteAnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_reads_nested_path() {
        let envelope: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"a\":1}" }], "role": "model" },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 10 }
        }))
        .unwrap();

        assert_eq!(envelope.first_text(), Some("{\"a\":1}"));
    }

    #[test]
    fn first_text_missing_pieces() {
        assert_eq!(GenerateContentResponse::default().first_text(), None);

        let no_content: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [{}] })).unwrap();
        assert_eq!(no_content.first_text(), None);

        assert_eq!(GenerateContentResponse::with_text("   ").first_text(), None);
    }

    #[test]
    fn request_serializes_in_wire_shape() {
        let request = GenerateContentRequest::from_prompt(
            "hola",
            GenerationConfig {
                temperature: 0.5,
                max_output_tokens: 100,
            },
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hola");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 100);
    }

    #[test]
    fn error_groups() {
        assert!(RemoteAnalysisError::Timeout(Duration::from_secs(1)).is_transport());
        assert!(RemoteAnalysisError::Transport("503".into()).is_transport());
        assert!(RemoteAnalysisError::NoCandidate.is_malformed());
        assert!(!RemoteAnalysisError::Malformed("x".into()).is_transport());
    }

    #[tokio::test]
    async fn mock_counts_calls() {
        let model = MockModel::failing(RemoteAnalysisError::Transport("down".into()));
        assert!(model.generate("a").await.is_err());
        assert!(model.generate("b").await.is_err());
        assert_eq!(model.calls(), 2);
    }
}
