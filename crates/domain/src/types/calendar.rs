//! Calendar action types
//!
//! Inputs/outputs for the calendar adapter boundary. Results are fail-closed:
//! a provider error or conflict is never coerced into a fabricated success.

use serde::{Deserialize, Serialize};

use crate::types::parsing::TimeRange;

/// Free/busy verdict for a queried slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Free,
    Busy,
}

/// Outcome class of a calendar adapter call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CalendarActionStatus {
    Success,
    Conflict,
    Error,
}

/// Outcome of a calendar adapter call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarActionResult {
    pub status: CalendarActionStatus,
    /// Human-readable detail fed into the response formatter
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_link: Option<String>,
}

impl CalendarActionResult {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            status: CalendarActionStatus::Success,
            detail: detail.into(),
            event_id: None,
            event_link: None,
        }
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self {
            status: CalendarActionStatus::Conflict,
            detail: detail.into(),
            event_id: None,
            event_link: None,
        }
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            status: CalendarActionStatus::Error,
            detail: detail.into(),
            event_id: None,
            event_link: None,
        }
    }

    pub fn with_event(mut self, id: impl Into<String>, link: Option<String>) -> Self {
        self.event_id = Some(id.into());
        self.event_link = link;
        self
    }
}

/// Everything needed to create an appointment event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub attendee_email: String,
    pub slot: TimeRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Everything needed to cancel an existing appointment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    pub attendee_email: String,
    pub slot: TimeRange,
}
