//! Per-session conversation state
//!
//! Exactly one `SessionState` is kept per session, overwritten every turn
//! (last-write-wins). Only the latest state matters for branch selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SlotBotError;
use crate::types::parsing::{Intent, TimeRange};

/// Opaque session identifier generated at chat start
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh, collision-free identifier (128-bit random).
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = SlotBotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| SlotBotError::InvalidInput(format!("invalid session id: {s}")))
    }
}

/// Whether the user's identity (email) has been captured
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdentityStatus {
    Known,
    Unknown,
}

/// Whether all data needed for the user's intent has been provided
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InfoStatus {
    Complete,
    Incomplete,
}

/// Discriminator selecting which single branch the orchestrator executes
///
/// Modelled as a closed enum and matched exhaustively; there is no
/// fallthrough ambiguity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    CollectInfo,
    CheckAvailability,
    ExecuteOperation,
    Default,
}

/// Structured report on the state of one conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    pub identity_status: IdentityStatus,
    pub info_status: InfoStatus,
    /// Identity carried across turns so a later message can omit the email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Resolved slot carried across turns so a later message can omit the time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    /// Fields still required, in checklist order
    pub missing_info: Vec<String>,
    pub next_action: NextAction,
    pub intent: Intent,
}

impl SessionState {
    /// The safety-biased state used when a turn produced nothing evaluable:
    /// ask the user for clarification, never execute an action.
    pub fn collecting(intent: Intent, missing_info: Vec<String>) -> Self {
        Self {
            identity_status: IdentityStatus::Unknown,
            info_status: InfoStatus::Incomplete,
            identity: None,
            time_range: None,
            missing_info,
            next_action: NextAction::CollectInfo,
            intent,
        }
    }
}
