//! HTTP chat surface DTOs

use serde::{Deserialize, Serialize};

use crate::types::session::SessionId;

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: SessionId,
    pub user_message: String,
}

/// Response of `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: SessionId,
    pub chatbot_response: String,
}

/// Response of `POST /start_chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartChatResponse {
    pub session_id: SessionId,
    pub message: String,
}
