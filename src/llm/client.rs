// src/llm/client.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;

use crate::llm::models::{GenerateContentRequest, GenerateContentResponse};
use crate::llm::{Completion, TextGenerator};
use crate::utils::config::Settings;
use crate::utils::error::LlmError;

// Section prompts embed the whole transcript; long meetings take a while.
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(
        api_base: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        temperature: f32,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?; // Propagate client build error if any

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            temperature,
        })
    }

    /// Builds a client from startup settings; fails if no API key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, LlmError> {
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::Config("GOOGLE_API_KEY is not set".to_string()))?;

        Self::new(&settings.api_base, &settings.model, api_key, settings.temperature)
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
        let url = self.endpoint();
        tracing::debug!("Sending {} byte prompt to {}", prompt.len(), url);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header(header::CONTENT_TYPE, "application/json")
            .json(&GenerateContentRequest::from_prompt(prompt, self.temperature))
            .send()
            .await?; // Propagates reqwest::Error as LlmError::Network

        // Check if the request was successful (status code 2xx)
        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} from model {}", status, self.model);
            if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
                return Err(LlmError::Auth(status));
            }
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                tracing::warn!("Received 429 Too Many Requests from the generation API.");
                return Err(LlmError::RateLimited);
            }
            return Err(LlmError::Http(status));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body.first_text().ok_or(LlmError::EmptyResponse)?;
        tracing::debug!("Received {} bytes from model {}", text.len(), self.model);

        Ok(Completion { text })
    }
}
