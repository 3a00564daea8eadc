use crate::adapters::retry::RetryPolicy;
use crate::config::credentials::ApiKey;
use crate::core::CompletionProvider;
use crate::domain::model::{CompletionRequest, CompletionResponse};
use crate::utils::error::{GreenCodeError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ChatCompletionClient {
    client: Client,
    endpoint: String,
    api_key: ApiKey,
    retry: RetryPolicy,
}

impl ChatCompletionClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: ApiKey,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            retry,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_once(&self, request: &CompletionRequest) -> Result<String> {
        tracing::debug!("Making completion request to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Completion response status: {}", status);

        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(GreenCodeError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        extract_content(&body)
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.retry.run(move || self.send_once(request)).await
    }
}

/// Pulls `choices[0].message.content` out of a 200 response body.
pub fn extract_content(body: &str) -> Result<String> {
    let parsed: CompletionResponse =
        serde_json::from_str(body).map_err(|e| GreenCodeError::MalformedResponse {
            message: format!("invalid JSON body: {}", e),
        })?;

    parsed
        .first_content()
        .ok_or_else(|| GreenCodeError::MalformedResponse {
            message: "response has no choices[0].message.content".to_string(),
        })
}
