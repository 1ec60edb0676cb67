//! Response formatter backed by a plain-text completion

use async_trait::async_trait;
use serde_json::json;
use slotbot_core::{BranchOutcome, ResponseFormatter};
use slotbot_domain::{ParsedInput, Result, SessionState};

use super::client::ChatClient;
use super::types::ChatMessage;
use crate::http::HttpClient;

const FORMATTER_SYSTEM_PROMPT: &str = "You are SlotBot, a friendly appointment \
    scheduling assistant. You receive a structured summary of what just happened in \
    the conversation turn. Write the single short reply the user should see. When \
    fields are missing, ask for exactly those fields. When a slot is busy or an \
    operation failed, say so plainly and never claim success. When a booking \
    succeeded, confirm the date, time, and email. Reply with the message text only, \
    no markup.";

/// OpenAI-backed implementation of [`ResponseFormatter`]
pub struct OpenAiResponseFormatter {
    client: ChatClient,
}

impl OpenAiResponseFormatter {
    /// Create a new formatter sharing the retrying HTTP client.
    pub fn new(api_key: String, model: String, http_client: HttpClient) -> Self {
        Self { client: ChatClient::new(api_key, model, http_client) }
    }

    /// Point the formatter at a different endpoint (for testing).
    #[cfg(test)]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.client = self.client.with_api_url(url);
        self
    }

    fn turn_summary(parsed: &ParsedInput, state: &SessionState, branch: &BranchOutcome) -> String {
        let branch_value = match branch {
            BranchOutcome::CollectInfo { missing_info } => json!({
                "kind": "collect_info",
                "missing_info": missing_info,
            }),
            BranchOutcome::Availability { slot, availability } => json!({
                "kind": "availability",
                "slot_start": slot.start.to_rfc3339(),
                "slot_end": slot.end.to_rfc3339(),
                "availability": availability,
            }),
            BranchOutcome::Action(result) => json!({
                "kind": "calendar_action",
                "status": result.status,
                "detail": result.detail,
                "event_link": result.event_link,
            }),
            BranchOutcome::Passthrough => json!({ "kind": "conversation" }),
        };

        json!({
            "parsed_input": parsed,
            "session_state": state,
            "branch_outcome": branch_value,
        })
        .to_string()
    }
}

#[async_trait]
impl ResponseFormatter for OpenAiResponseFormatter {
    async fn format(
        &self,
        parsed: &ParsedInput,
        state: &SessionState,
        branch: &BranchOutcome,
    ) -> Result<String> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: FORMATTER_SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: Self::turn_summary(parsed, state, branch),
            },
        ];

        let reply = self.client.complete(messages, None).await?;
        Ok(reply.trim().to_string())
    }
}
