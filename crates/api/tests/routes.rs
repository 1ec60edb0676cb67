//! Router integration tests with stubbed oracle and calendar adapters

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use slotbot_core::{
    BranchOutcome, CalendarPort, IntentParser, ResponseFormatter, TurnService,
};
use slotbot_domain::{
    Availability, BookingRequest, CalendarActionResult, CancelRequest, Intent, ParsedInput,
    Result as BotResult, SessionId, SessionState, SlotBotError, TimeRange,
};
use slotbot_infra::InMemorySessionStore;
use slotbot_server::{router, AppContext};
use tower::ServiceExt;

struct StubParser {
    fail: bool,
}

#[async_trait]
impl IntentParser for StubParser {
    async fn parse(&self, _message: &str, _now: DateTime<Utc>) -> BotResult<ParsedInput> {
        if self.fail {
            Err(SlotBotError::Parse("oracle returned malformed output".into()))
        } else {
            Ok(ParsedInput::with_intent(Intent::GeneralQuery))
        }
    }
}

struct StubCalendar;

#[async_trait]
impl CalendarPort for StubCalendar {
    async fn check_availability(&self, _slot: TimeRange) -> BotResult<Availability> {
        Ok(Availability::Free)
    }

    async fn book(&self, _request: BookingRequest) -> BotResult<CalendarActionResult> {
        Ok(CalendarActionResult::success("booked"))
    }

    async fn cancel(&self, _request: CancelRequest) -> BotResult<CalendarActionResult> {
        Ok(CalendarActionResult::success("cancelled"))
    }
}

struct StubFormatter;

#[async_trait]
impl ResponseFormatter for StubFormatter {
    async fn format(
        &self,
        _parsed: &ParsedInput,
        _state: &SessionState,
        _branch: &BranchOutcome,
    ) -> BotResult<String> {
        Ok("Happy to help with your appointments.".to_string())
    }
}

fn test_app(failing_parser: bool) -> Router {
    let sessions = Arc::new(InMemorySessionStore::new());
    let turns = Arc::new(TurnService::new(
        Arc::new(StubParser { fail: failing_parser }),
        Arc::new(StubCalendar),
        Arc::new(StubFormatter),
        sessions.clone(),
    ));
    router(Arc::new(AppContext::from_parts(turns, sessions)))
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app(false);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["active_sessions"], 0);
}

#[tokio::test]
async fn start_chat_returns_session_and_welcome() {
    let app = test_app(false);

    let response = app
        .oneshot(json_request("/start_chat", serde_json::json!({})))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["message"].as_str().expect("message").contains("SlotBot"));
    let raw_id = body["session_id"].as_str().expect("session id");
    assert!(raw_id.parse::<SessionId>().is_ok());
}

#[tokio::test]
async fn chat_round_trip_returns_formatted_reply() {
    let app = test_app(false);

    let started = app
        .clone()
        .oneshot(json_request("/start_chat", serde_json::json!({})))
        .await
        .expect("response");
    let session_id = response_json(started).await["session_id"].clone();

    let response = app
        .oneshot(json_request(
            "/chat",
            serde_json::json!({ "session_id": session_id, "user_message": "hello" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["chatbot_response"], "Happy to help with your appointments.");
    assert_eq!(body["session_id"], session_id);
}

#[tokio::test]
async fn chat_with_unknown_session_is_404() {
    let app = test_app(false);

    let response = app
        .oneshot(json_request(
            "/chat",
            serde_json::json!({
                "session_id": SessionId::generate(),
                "user_message": "hello"
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"]["type"], "NotFound");
}

#[tokio::test]
async fn parse_failure_returns_apology_not_error() {
    let app = test_app(true);

    let started = app
        .clone()
        .oneshot(json_request("/start_chat", serde_json::json!({})))
        .await
        .expect("response");
    let session_id = response_json(started).await["session_id"].clone();

    let response = app
        .oneshot(json_request(
            "/chat",
            serde_json::json!({ "session_id": session_id, "user_message": "???" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let reply = body["chatbot_response"].as_str().expect("reply");
    assert!(reply.contains("rephrase"), "got: {reply}");
}
