//! Shared Chat Completions client used by both oracles

use reqwest::Method;
use slotbot_domain::{Result, SlotBotError};
use tracing::debug;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};
use crate::http::HttpClient;

pub(crate) const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Thin OpenAI Chat Completions client
///
/// Sends one request and returns the first choice's content. Retry and
/// timeout behaviour come from the wrapped [`HttpClient`].
#[derive(Clone)]
pub(crate) struct ChatClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    api_url: String,
}

impl ChatClient {
    pub(crate) fn new(api_key: String, model: String, http_client: HttpClient) -> Self {
        Self { http_client, api_key, model, api_url: OPENAI_API_URL.to_string() }
    }

    /// Point the client at a different endpoint (wiremock in tests).
    pub(crate) fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Run one completion and return the raw content string.
    pub(crate) async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        response_format: Option<ResponseFormat>,
    ) -> Result<String> {
        let request_payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            response_format,
        };

        let request_builder = self
            .http_client
            .request(Method::POST, &self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_payload);

        let response = self.http_client.send(request_builder).await?;

        let status = response.status();
        debug!(status = status.as_u16(), "received OpenAI API response");

        if !status.is_success() {
            return Err(Self::error_for_status(status.as_u16(), response).await);
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| SlotBotError::Parse(format!("failed to parse OpenAI response: {e}")))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| SlotBotError::Parse("OpenAI response contained no choices".into()))
    }

    async fn error_for_status(status: u16, response: reqwest::Response) -> SlotBotError {
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            401 | 403 => SlotBotError::Auth(format!("OpenAI rejected API key ({status})")),
            429 => SlotBotError::Network("OpenAI rate limit exceeded".into()),
            _ => SlotBotError::Network(format!("OpenAI API error ({status}): {message}")),
        }
    }
}
