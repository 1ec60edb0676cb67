//! Liveness endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::context::AppContext;

/// `GET /health` - liveness probe with the current session count.
pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "active_sessions": ctx.sessions.len(),
    }))
}
