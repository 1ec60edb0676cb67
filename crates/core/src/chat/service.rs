//! Turn orchestrator - core business logic
//!
//! Sequences one chat turn through fixed stages: resolve session, parse,
//! evaluate, branch, respond. Exactly one branch arm fires per turn, selected
//! by an exhaustive match on the evaluated `next_action`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use slotbot_domain::{
    BookingRequest, CancelRequest, Intent, NextAction, ParsedInput, Result, SessionId,
    SessionState, SlotBotError,
};
use tracing::{error, info, warn};

use super::evaluator::evaluate;
use super::ports::{
    BranchOutcome, CalendarPort, IntentParser, ResponseFormatter, SessionRepository,
};

/// Turn orchestration service
pub struct TurnService {
    parser: Arc<dyn IntentParser>,
    calendar: Arc<dyn CalendarPort>,
    formatter: Arc<dyn ResponseFormatter>,
    sessions: Arc<dyn SessionRepository>,
}

impl TurnService {
    /// Create a new turn service
    pub fn new(
        parser: Arc<dyn IntentParser>,
        calendar: Arc<dyn CalendarPort>,
        formatter: Arc<dyn ResponseFormatter>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self { parser, calendar, formatter, sessions }
    }

    /// Allocate a new session with no prior state.
    pub async fn start_session(&self) -> Result<SessionId> {
        self.sessions.create().await
    }

    /// Process one user message end-to-end and return the reply text.
    ///
    /// An unknown session id fails with `NotFound` before any stage runs. A
    /// parse failure aborts the turn without writing session state. The new
    /// state is stored before the branch step, so the branch and any
    /// subsequent turn observe it.
    pub async fn run_turn(
        &self,
        session_id: SessionId,
        user_message: &str,
        now: DateTime<Utc>,
    ) -> Result<String> {
        // Concurrent turns for one session would race the last-write-wins
        // slot; hold the per-session lock for the whole turn.
        let _turn_guard = self.sessions.lock_turn(&session_id).await?;
        let prior = self.sessions.get(&session_id).await?;

        let parsed = self.parser.parse(user_message, now).await.map_err(|err| {
            error!(%session_id, stage = "parse", error = %err, "intent parse failed");
            err
        })?;
        info!(%session_id, stage = "parse", intent = ?parsed.intent, "turn parsed");

        let state = evaluate(&parsed, prior.as_ref());
        info!(
            %session_id,
            stage = "evaluate",
            next_action = ?state.next_action,
            missing = state.missing_info.len(),
            "session state evaluated"
        );
        self.sessions.put(&session_id, state.clone()).await?;

        let branch = self.run_branch(&session_id, &parsed, &state).await?;

        self.formatter.format(&parsed, &state, &branch).await.map_err(|err| {
            error!(%session_id, stage = "respond", error = %err, "response formatting failed");
            err
        })
    }

    async fn run_branch(
        &self,
        session_id: &SessionId,
        parsed: &ParsedInput,
        state: &SessionState,
    ) -> Result<BranchOutcome> {
        match state.next_action {
            NextAction::CollectInfo => Ok(BranchOutcome::CollectInfo {
                missing_info: state.missing_info.clone(),
            }),
            NextAction::CheckAvailability => {
                self.check_availability(session_id, parsed, state).await
            }
            NextAction::ExecuteOperation => self.execute_operation(session_id, parsed, state).await,
            NextAction::Default => Ok(BranchOutcome::Passthrough),
        }
    }

    async fn check_availability(
        &self,
        session_id: &SessionId,
        parsed: &ParsedInput,
        state: &SessionState,
    ) -> Result<BranchOutcome> {
        // Free/busy needs a concrete window. A vague temporal expression
        // passes evaluation but cannot be queried, so the formatter asks the
        // user to narrow it down instead.
        let Some(slot) = state.time_range else {
            warn!(
                %session_id,
                stage = "branch",
                expression = ?parsed.temporal_expression,
                "availability query without concrete slot"
            );
            return Ok(BranchOutcome::CollectInfo {
                missing_info: vec![
                    slotbot_domain::constants::FIELD_START_TIME.to_string(),
                ],
            });
        };

        let availability = self.calendar.check_availability(slot).await.map_err(|err| {
            error!(%session_id, stage = "branch", error = %err, "availability check failed");
            err
        })?;
        info!(%session_id, stage = "branch", ?availability, "availability checked");

        Ok(BranchOutcome::Availability { slot, availability })
    }

    async fn execute_operation(
        &self,
        session_id: &SessionId,
        parsed: &ParsedInput,
        state: &SessionState,
    ) -> Result<BranchOutcome> {
        // The evaluator only selects this branch when identity and slot are
        // present; a gap here is an invariant breach, not a user error.
        let attendee_email = state.identity.clone().ok_or_else(|| {
            SlotBotError::Internal("execute_operation selected without identity".into())
        })?;
        let slot = state.time_range.ok_or_else(|| {
            SlotBotError::Internal("execute_operation selected without time range".into())
        })?;

        let result = match state.intent {
            Intent::Book => {
                self.calendar
                    .book(BookingRequest { attendee_email, slot, notes: parsed.notes.clone() })
                    .await
            }
            Intent::Cancel => {
                self.calendar.cancel(CancelRequest { attendee_email, slot }).await
            }
            Intent::CheckAvailability | Intent::GeneralQuery => {
                return Err(SlotBotError::Internal(format!(
                    "execute_operation selected for non-operational intent {:?}",
                    state.intent
                )));
            }
        };

        let result = result.map_err(|err| {
            error!(%session_id, stage = "branch", error = %err, "calendar operation failed");
            err
        })?;
        info!(%session_id, stage = "branch", status = ?result.status, "calendar operation done");

        Ok(BranchOutcome::Action(result))
    }
}
