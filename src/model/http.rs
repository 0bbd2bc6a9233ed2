//! HTTP transport for the `generateContent` endpoint

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use super::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, GenerativeModel,
    RemoteAnalysisError,
};
use crate::config::RemoteConfig;

/// `generateContent` client over HTTPS.
pub struct HttpGenerativeModel {
    config: RemoteConfig,
    http: reqwest::Client,
}

impl HttpGenerativeModel {
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteAnalysisError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RemoteAnalysisError::Transport(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn headers(&self) -> Result<HeaderMap, RemoteAnalysisError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.config.api_key)
                .map_err(|e| RemoteAnalysisError::Transport(format!("invalid API key: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl GenerativeModel for HttpGenerativeModel {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, RemoteAnalysisError> {
        let request = GenerateContentRequest::from_prompt(
            prompt,
            GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        );

        debug!(model = %self.config.model, "generateContent request");

        let response = self
            .http
            .post(self.url())
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RemoteAnalysisError::Timeout(self.config.timeout())
                } else {
                    RemoteAnalysisError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RemoteAnalysisError::Transport(format!(
                "model API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| RemoteAnalysisError::Malformed(format!("unreadable envelope: {}", e)))
    }
}
