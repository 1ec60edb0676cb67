//! Intent parser backed by OpenAI structured output

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use slotbot_core::IntentParser;
use slotbot_domain::{ParsedInput, Result, SlotBotError};
use tracing::info;

use super::client::ChatClient;
use super::types::{ChatMessage, JsonSchema, ParsedInputWire, ResponseFormat};
use crate::http::HttpClient;

const PARSER_SYSTEM_PROMPT: &str = "You are an appointment scheduling assistant's \
    input parser. Analyze the user's message about calendar appointments and extract \
    a structured interpretation. Classify the intent as book, cancel, \
    check_availability, or general_query. Resolve relative temporal expressions \
    (\"next Monday at 3pm\") into absolute ISO 8601 UTC timestamps using the \
    reference date provided. When only a start time is given for a booking, the end \
    time is one hour later. Put vague time questions (\"sometime on Friday\") into \
    temporal_expression instead of start_time. List every field that is required \
    for the stated intent but absent from the message in missing_info, using the \
    field names patient_email and start_time.";

/// OpenAI-backed implementation of [`IntentParser`]
pub struct OpenAiIntentParser {
    client: ChatClient,
}

impl OpenAiIntentParser {
    /// Create a new parser
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key (required)
    /// * `model` - Chat model name (e.g., "gpt-4o-mini")
    /// * `http_client` - HTTP client with retry logic
    pub fn new(api_key: String, model: String, http_client: HttpClient) -> Self {
        Self { client: ChatClient::new(api_key, model, http_client) }
    }

    /// Point the parser at a different endpoint (for testing).
    #[cfg(test)]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_api_url(url);
        self
    }

    fn response_schema() -> ResponseFormat {
        ResponseFormat {
            format_type: "json_schema".to_string(),
            json_schema: Some(JsonSchema {
                name: "parsed_user_input".to_string(),
                schema: json!({
                    "type": "object",
                    "properties": {
                        "intent": {
                            "type": "string",
                            "enum": ["book", "cancel", "check_availability", "general_query"]
                        },
                        "patient_email": { "type": ["string", "null"] },
                        "start_time": {
                            "type": ["string", "null"],
                            "description": "Absolute ISO 8601 UTC timestamp"
                        },
                        "end_time": {
                            "type": ["string", "null"],
                            "description": "Absolute ISO 8601 UTC timestamp"
                        },
                        "temporal_expression": { "type": ["string", "null"] },
                        "missing_info": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "notes": { "type": ["string", "null"] }
                    },
                    "required": [
                        "intent", "patient_email", "start_time", "end_time",
                        "temporal_expression", "missing_info", "notes"
                    ],
                    "additionalProperties": false
                }),
                strict: Some(true),
            }),
        }
    }
}

#[async_trait]
impl IntentParser for OpenAiIntentParser {
    async fn parse(&self, message: &str, reference_time: DateTime<Utc>) -> Result<ParsedInput> {
        let messages = vec![
            ChatMessage { role: "system".to_string(), content: PARSER_SYSTEM_PROMPT.to_string() },
            ChatMessage {
                role: "user".to_string(),
                content: format!(
                    "Reference date: {}\nUser message: {message}",
                    reference_time.to_rfc3339()
                ),
            },
        ];

        let content = self.client.complete(messages, Some(Self::response_schema())).await?;

        let wire: ParsedInputWire = serde_json::from_str(&content).map_err(|e| {
            SlotBotError::Parse(format!("parser output did not match schema: {e}. Content: {content}"))
        })?;

        let parsed: ParsedInput = wire.into();
        info!(intent = ?parsed.intent, missing = parsed.missing_info.len(), "message parsed");
        Ok(parsed)
    }
}
