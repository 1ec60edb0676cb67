//! Google Calendar API wire types

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/* -------------------------------------------------------------------------- */
/* free/busy */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Serialize)]
pub(crate) struct FreeBusyRequest {
    #[serde(rename = "timeMin")]
    pub time_min: String,
    #[serde(rename = "timeMax")]
    pub time_max: String,
    pub items: Vec<FreeBusyItem>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FreeBusyItem {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FreeBusyResponse {
    #[serde(default)]
    pub calendars: HashMap<String, FreeBusyCalendar>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FreeBusyCalendar {
    #[serde(default)]
    pub busy: Vec<BusyInterval>,
    #[serde(default)]
    pub errors: Vec<FreeBusyError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BusyInterval {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FreeBusyError {
    pub reason: String,
}

/* -------------------------------------------------------------------------- */
/* events */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Serialize)]
pub(crate) struct EventInsertRequest {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub attendees: Vec<EventAttendee>,
    pub reminders: EventReminders,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct EventDateTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct EventAttendee {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EventReminders {
    #[serde(rename = "useDefault")]
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventResource {
    pub id: String,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
    #[serde(default)]
    pub attendees: Vec<EventAttendee>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventsListResponse {
    #[serde(default)]
    pub items: Vec<EventResource>,
}

/* -------------------------------------------------------------------------- */
/* oauth token file */
/* -------------------------------------------------------------------------- */

/// Persisted OAuth credential, mirroring the token file the authorization
/// flow writes out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expiry: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenRefreshResponse {
    pub access_token: String,
    pub expires_in: i64,
}
