//! HTTP routing and request handlers

mod chat;
mod health;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use slotbot_domain::SlotBotError;
use tower_http::cors::CorsLayer;

use crate::context::AppContext;

/// Build the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/start_chat", post(chat::start_chat))
        .route("/chat", post(chat::chat))
        .route("/health", get(health::health))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

/// Domain error carried out of a handler.
///
/// The wrapper exists because `IntoResponse` cannot be implemented for
/// `SlotBotError` directly from this crate.
pub struct ApiError(pub SlotBotError);

impl From<SlotBotError> for ApiError {
    fn from(err: SlotBotError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SlotBotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotBotError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SlotBotError::Auth(_) | SlotBotError::Calendar(_) | SlotBotError::Network(_) => {
                StatusCode::BAD_GATEWAY
            }
            SlotBotError::Parse(_)
            | SlotBotError::Config(_)
            | SlotBotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.0 }))).into_response()
    }
}
