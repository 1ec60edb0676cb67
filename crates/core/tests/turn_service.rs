//! End-to-end turn orchestration tests with deterministic oracle stubs.

mod support;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use slotbot_core::TurnService;
use slotbot_domain::constants::{FIELD_PATIENT_EMAIL, FIELD_START_TIME};
use slotbot_domain::{Intent, NextAction, ParsedInput, SlotBotError, TimeRange};
use support::calendar::{CalendarCall, MockCalendarPort};
use support::oracles::{EchoFormatter, ScriptedParser};
use support::sessions::TestSessionStore;

fn monday_3pm() -> TimeRange {
    TimeRange::from_start(Utc.with_ymd_and_hms(2025, 6, 9, 15, 0, 0).unwrap())
}

fn tuesday_11am() -> TimeRange {
    TimeRange::from_start(Utc.with_ymd_and_hms(2025, 6, 10, 11, 0, 0).unwrap())
}

fn service_with(
    parser: ScriptedParser,
    calendar: MockCalendarPort,
) -> (TurnService, Arc<TestSessionStore>, MockCalendarPort) {
    let sessions = Arc::new(TestSessionStore::default());
    let service = TurnService::new(
        Arc::new(parser),
        Arc::new(calendar.clone()),
        Arc::new(EchoFormatter),
        sessions.clone(),
    );
    (service, sessions, calendar)
}

#[tokio::test]
async fn booking_without_identity_asks_for_email_and_skips_calendar() {
    // "Book an appointment next Monday at 3pm" - parser resolves the slot but
    // has no email to work with.
    let parsed = ParsedInput {
        time_range: Some(monday_3pm()),
        missing_info: vec![FIELD_PATIENT_EMAIL.to_string()],
        ..ParsedInput::with_intent(Intent::Book)
    };
    let (service, sessions, calendar) =
        service_with(ScriptedParser::single(parsed), MockCalendarPort::default());

    let session_id = service.start_session().await.unwrap();
    let reply = service.run_turn(session_id, "Book next Monday at 3pm", Utc::now()).await.unwrap();

    assert_eq!(reply, format!("collect:{FIELD_PATIENT_EMAIL}"));
    assert!(calendar.calls().is_empty(), "no calendar call may occur");

    let state = sessions.stored_state(&session_id).unwrap();
    assert_eq!(state.next_action, NextAction::CollectInfo);
}

#[tokio::test]
async fn fully_specified_booking_invokes_adapter_and_reports_success() {
    let parsed = ParsedInput {
        identity: Some("a@b.com".to_string()),
        time_range: Some(tuesday_11am()),
        ..ParsedInput::with_intent(Intent::Book)
    };
    let (service, _sessions, calendar) =
        service_with(ScriptedParser::single(parsed), MockCalendarPort::default());

    let session_id = service.start_session().await.unwrap();
    let reply = service
        .run_turn(session_id, "Book me, a@b.com, next Tuesday 11:00", Utc::now())
        .await
        .unwrap();

    assert!(reply.starts_with("action:Success"), "got: {reply}");

    let calls = calendar.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        CalendarCall::Book(request) => {
            assert_eq!(request.attendee_email, "a@b.com");
            assert_eq!(request.slot, tuesday_11am());
            assert_eq!(request.slot.duration_minutes(), 60);
        }
        other => panic!("expected a booking call, got {other:?}"),
    }
}

#[tokio::test]
async fn identity_from_earlier_turn_completes_later_booking() {
    let first = ParsedInput {
        time_range: Some(monday_3pm()),
        missing_info: vec![FIELD_PATIENT_EMAIL.to_string()],
        ..ParsedInput::with_intent(Intent::Book)
    };
    let second = ParsedInput {
        identity: Some("a@b.com".to_string()),
        ..ParsedInput::with_intent(Intent::Book)
    };
    let (service, _sessions, calendar) = service_with(
        ScriptedParser::new(vec![Ok(first), Ok(second)]),
        MockCalendarPort::default(),
    );

    let session_id = service.start_session().await.unwrap();
    let reply1 = service.run_turn(session_id, "Book Monday 3pm", Utc::now()).await.unwrap();
    assert_eq!(reply1, format!("collect:{FIELD_PATIENT_EMAIL}"));

    let reply2 = service.run_turn(session_id, "my email is a@b.com", Utc::now()).await.unwrap();
    assert!(reply2.starts_with("action:Success"), "got: {reply2}");

    match &calendar.calls()[0] {
        CalendarCall::Book(request) => assert_eq!(request.slot, monday_3pm()),
        other => panic!("expected a booking call, got {other:?}"),
    }
}

#[tokio::test]
async fn busy_slot_is_reported_as_unavailable() {
    let parsed = ParsedInput {
        time_range: Some(monday_3pm()),
        ..ParsedInput::with_intent(Intent::CheckAvailability)
    };
    let (service, _sessions, _calendar) =
        service_with(ScriptedParser::single(parsed), MockCalendarPort::default().busy());

    let session_id = service.start_session().await.unwrap();
    let reply = service.run_turn(session_id, "Is Monday 3pm open?", Utc::now()).await.unwrap();

    assert_eq!(reply, "availability:Busy");
    assert!(!reply.contains("Success"));
}

#[tokio::test]
async fn vague_availability_query_asks_for_concrete_slot() {
    let parsed = ParsedInput {
        temporal_expression: Some("sometime next week".to_string()),
        ..ParsedInput::with_intent(Intent::CheckAvailability)
    };
    let (service, _sessions, calendar) =
        service_with(ScriptedParser::single(parsed), MockCalendarPort::default());

    let session_id = service.start_session().await.unwrap();
    let reply = service.run_turn(session_id, "any slots next week?", Utc::now()).await.unwrap();

    assert_eq!(reply, format!("collect:{FIELD_START_TIME}"));
    assert!(calendar.calls().is_empty());
}

#[tokio::test]
async fn vague_query_after_booking_does_not_reuse_old_slot() {
    // "Book Monday 3pm for a@b.com" then "am I free sometime on Friday?" -
    // the second turn must not run free/busy against Monday's slot.
    let booking = ParsedInput {
        identity: Some("a@b.com".to_string()),
        time_range: Some(monday_3pm()),
        ..ParsedInput::with_intent(Intent::Book)
    };
    let vague = ParsedInput {
        temporal_expression: Some("sometime on Friday".to_string()),
        ..ParsedInput::with_intent(Intent::CheckAvailability)
    };
    let (service, _sessions, calendar) = service_with(
        ScriptedParser::new(vec![Ok(booking), Ok(vague)]),
        MockCalendarPort::default(),
    );

    let session_id = service.start_session().await.unwrap();
    let reply1 =
        service.run_turn(session_id, "Book Monday 3pm, a@b.com", Utc::now()).await.unwrap();
    assert!(reply1.starts_with("action:Success"));

    let reply2 =
        service.run_turn(session_id, "am I free sometime on Friday?", Utc::now()).await.unwrap();
    assert_eq!(reply2, format!("collect:{FIELD_START_TIME}"));

    let calls = calendar.calls();
    assert_eq!(calls.len(), 1, "only the booking may reach the calendar");
    assert!(matches!(calls[0], CalendarCall::Book(_)));
}

#[tokio::test]
async fn unknown_session_is_not_found_and_runs_no_stage() {
    let (service, _sessions, calendar) = service_with(
        ScriptedParser::single(ParsedInput::with_intent(Intent::GeneralQuery)),
        MockCalendarPort::default(),
    );

    let err = service
        .run_turn(slotbot_domain::SessionId::generate(), "hello", Utc::now())
        .await
        .unwrap_err();

    assert!(matches!(err, SlotBotError::NotFound(_)));
    assert!(calendar.calls().is_empty());
}

#[tokio::test]
async fn parse_failure_aborts_turn_without_writing_state() {
    let (service, sessions, calendar) =
        service_with(ScriptedParser::failing("oracle unreachable"), MockCalendarPort::default());

    let session_id = service.start_session().await.unwrap();
    let err = service.run_turn(session_id, "gibberish", Utc::now()).await.unwrap_err();

    assert!(matches!(err, SlotBotError::Parse(_)));
    assert!(sessions.stored_state(&session_id).is_none(), "no partial state may be recorded");
    assert!(calendar.calls().is_empty());
}

#[tokio::test]
async fn calendar_failure_surfaces_as_error_not_success() {
    let parsed = ParsedInput {
        identity: Some("a@b.com".to_string()),
        time_range: Some(monday_3pm()),
        ..ParsedInput::with_intent(Intent::Book)
    };
    let (service, _sessions, _calendar) =
        service_with(ScriptedParser::single(parsed), MockCalendarPort::default().failing());

    let session_id = service.start_session().await.unwrap();
    let err = service.run_turn(session_id, "book it", Utc::now()).await.unwrap_err();

    assert!(matches!(err, SlotBotError::Calendar(_)));
}

#[tokio::test]
async fn cancel_intent_invokes_cancel_operation() {
    let parsed = ParsedInput {
        identity: Some("a@b.com".to_string()),
        time_range: Some(monday_3pm()),
        ..ParsedInput::with_intent(Intent::Cancel)
    };
    let (service, _sessions, calendar) =
        service_with(ScriptedParser::single(parsed), MockCalendarPort::default());

    let session_id = service.start_session().await.unwrap();
    let reply = service.run_turn(session_id, "cancel my Monday slot", Utc::now()).await.unwrap();

    assert!(reply.starts_with("action:Success"));
    assert!(matches!(calendar.calls()[0], CalendarCall::Cancel(_)));
}

#[tokio::test]
async fn general_query_passes_through_without_side_effects() {
    let (service, sessions, calendar) = service_with(
        ScriptedParser::single(ParsedInput::with_intent(Intent::GeneralQuery)),
        MockCalendarPort::default(),
    );

    let session_id = service.start_session().await.unwrap();
    let reply = service.run_turn(session_id, "what can you do?", Utc::now()).await.unwrap();

    assert_eq!(reply, "passthrough");
    assert!(calendar.calls().is_empty());
    assert_eq!(sessions.stored_state(&session_id).unwrap().next_action, NextAction::Default);
}
