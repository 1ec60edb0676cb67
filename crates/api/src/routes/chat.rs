//! Chat endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use slotbot_domain::constants::{GENERIC_APOLOGY, WELCOME_MESSAGE};
use slotbot_domain::{ChatRequest, ChatResponse, SlotBotError, StartChatResponse};
use tracing::{info, warn};

use super::ApiError;
use crate::context::AppContext;

/// `POST /start_chat` - allocate a session and greet the user.
pub async fn start_chat(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<StartChatResponse>, ApiError> {
    let session_id = ctx.turns.start_session().await?;
    info!(%session_id, "session started");

    Ok(Json(StartChatResponse { session_id, message: WELCOME_MESSAGE.to_string() }))
}

/// `POST /chat` - run one conversational turn.
///
/// A parse failure aborted the turn without touching session state; the user
/// gets an apology and can simply rephrase, so it is not surfaced as an HTTP
/// error.
pub async fn chat(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let reply =
        match ctx.turns.run_turn(request.session_id, &request.user_message, Utc::now()).await {
            Ok(reply) => reply,
            Err(SlotBotError::Parse(err)) => {
                warn!(session_id = %request.session_id, error = %err, "turn aborted on parse");
                GENERIC_APOLOGY.to_string()
            }
            Err(err) => return Err(err.into()),
        };

    Ok(Json(ChatResponse { session_id: request.session_id, chatbot_response: reply }))
}
