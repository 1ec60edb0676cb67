//! Structured output of the intent parser
//!
//! One `ParsedInput` is produced per turn by the NLU oracle. The orchestrator
//! and the session evaluator only ever see this structured form, never the raw
//! user message.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_APPOINTMENT_MINUTES;

/// The user's classified goal for the current turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Book,
    Cancel,
    CheckAvailability,
    GeneralQuery,
}

impl Intent {
    /// Whether this intent needs a concrete appointment slot to act on.
    pub const fn requires_time(self) -> bool {
        matches!(self, Self::Book | Self::Cancel)
    }

    /// Whether this intent needs the user's identity (email) to act on.
    pub const fn requires_identity(self) -> bool {
        matches!(self, Self::Book | Self::Cancel)
    }
}

/// Absolute appointment slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Build a range from a start time and the default appointment duration.
    pub fn from_start(start: DateTime<Utc>) -> Self {
        Self { start, end: start + Duration::minutes(DEFAULT_APPOINTMENT_MINUTES) }
    }

    /// Slot length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Structured interpretation of one user message
///
/// Invariant: if `intent` requires a time and none was resolvable, `time_range`
/// is `None` and the corresponding field name appears in `missing_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedInput {
    pub intent: Intent,
    /// Email-shaped identity, the primary key for the human behind the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    /// Raw temporal text for vague availability queries ("sometime on Friday")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal_expression: Option<String>,
    /// Fields the parser flagged as required-but-absent for the stated intent
    #[serde(default)]
    pub missing_info: Vec<String>,
    /// Free-text notes to attach to a booked event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ParsedInput {
    /// A bare parse with the given intent and nothing else resolved.
    pub fn with_intent(intent: Intent) -> Self {
        Self {
            intent,
            identity: None,
            time_range: None,
            temporal_expression: None,
            missing_info: Vec::new(),
            notes: None,
        }
    }
}
