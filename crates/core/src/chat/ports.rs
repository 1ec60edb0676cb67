//! Port interfaces for turn processing
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations. The NLU oracle and the response
//! formatter are prompt-driven external calls behind these contracts, so the
//! orchestrator can be tested with deterministic stubs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotbot_domain::{
    Availability, BookingRequest, CalendarActionResult, CancelRequest, ParsedInput, Result,
    SessionId, SessionState, TimeRange,
};
use tokio::sync::OwnedMutexGuard;

/// Trait for the NLU oracle that turns free text into a [`ParsedInput`]
///
/// `reference_time` anchors relative expressions ("next Monday at 3pm").
#[async_trait]
pub trait IntentParser: Send + Sync {
    /// Parse one user message. A failure here aborts the turn.
    async fn parse(&self, message: &str, reference_time: DateTime<Utc>) -> Result<ParsedInput>;
}

/// Trait for calendar provider operations
///
/// Implementations are fail-closed: provider errors surface as `Err` or a
/// conflict/error result, never as a fabricated success or a silent `Free`.
#[async_trait]
pub trait CalendarPort: Send + Sync {
    /// Query free/busy for a concrete slot
    async fn check_availability(&self, slot: TimeRange) -> Result<Availability>;

    /// Create an appointment event
    async fn book(&self, request: BookingRequest) -> Result<CalendarActionResult>;

    /// Cancel an existing appointment
    async fn cancel(&self, request: CancelRequest) -> Result<CalendarActionResult>;
}

/// Trait for composing the user-facing reply from the structured turn outcome
#[async_trait]
pub trait ResponseFormatter: Send + Sync {
    /// Produce the single natural-language string returned to the caller
    async fn format(
        &self,
        parsed: &ParsedInput,
        state: &SessionState,
        branch: &BranchOutcome,
    ) -> Result<String>;
}

/// Trait for the process-wide session store
///
/// One `SessionState` slot per session, last-write-wins. `get`/`put` return
/// `NotFound` for unknown session ids; a known session with no prior state
/// yields `Ok(None)`.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Allocate a new session with no prior state
    async fn create(&self) -> Result<SessionId>;

    /// Read the most recent state for a session
    async fn get(&self, id: &SessionId) -> Result<Option<SessionState>>;

    /// Overwrite the state for a session
    async fn put(&self, id: &SessionId, state: SessionState) -> Result<()>;

    /// Acquire the per-session turn lock
    ///
    /// Last-write-wins state is not safe under concurrent writers, so the
    /// orchestrator holds this guard for the whole turn.
    async fn lock_turn(&self, id: &SessionId) -> Result<OwnedMutexGuard<()>>;
}

/// Result of the single branch arm that fired for a turn
///
/// `next_action` is a discriminator, not a set of flags: at most one arm
/// executes, and its outcome feeds the response formatter.
#[derive(Debug, Clone)]
pub enum BranchOutcome {
    /// Ask the user specifically for the listed fields; no calendar call
    CollectInfo { missing_info: Vec<String> },
    /// Free/busy verdict for a concrete slot
    Availability { slot: TimeRange, availability: Availability },
    /// Outcome of a booking or cancellation
    Action(CalendarActionResult),
    /// Plain conversational turn with no side effect
    Passthrough,
}
