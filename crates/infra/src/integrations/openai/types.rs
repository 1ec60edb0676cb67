//! OpenAI Chat Completions API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use slotbot_domain::{Intent, ParsedInput, TimeRange};

/// Internal types for OpenAI Chat Completions API
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<JsonSchema>,
}

/// JSON schema wrapper used by OpenAI when `response_format = "json_schema"`.
#[derive(Debug, Serialize)]
pub(crate) struct JsonSchema {
    pub name: String,
    pub schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Response from OpenAI Chat Completions API
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    pub content: String,
}

/// Wire form of the parser's structured output
///
/// The schema exposes flat `start_time`/`end_time` fields (matching how the
/// model is prompted) rather than the domain `TimeRange`.
#[derive(Debug, Deserialize)]
pub(crate) struct ParsedInputWire {
    pub intent: Intent,
    pub patient_email: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub temporal_expression: Option<String>,
    #[serde(default)]
    pub missing_info: Vec<String>,
    pub notes: Option<String>,
}

impl From<ParsedInputWire> for ParsedInput {
    fn from(wire: ParsedInputWire) -> Self {
        let time_range = match (wire.start_time, wire.end_time) {
            (Some(start), Some(end)) if end > start => Some(TimeRange { start, end }),
            // A bare start defaults to the standard appointment length.
            (Some(start), _) => Some(TimeRange::from_start(start)),
            (None, _) => None,
        };

        Self {
            intent: wire.intent,
            identity: wire.patient_email.filter(|email| !email.trim().is_empty()),
            time_range,
            temporal_expression: wire.temporal_expression,
            missing_info: wire.missing_info,
            notes: wire.notes,
        }
    }
}
