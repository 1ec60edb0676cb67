//! Google Calendar implementation of the calendar port

use async_trait::async_trait;
use reqwest::Method;
use slotbot_core::CalendarPort;
use slotbot_domain::{
    Availability, BookingRequest, CalendarActionResult, CancelRequest, Result, SlotBotError,
    TimeRange,
};
use tracing::{info, warn};

use super::auth::TokenManager;
use super::types::{
    EventAttendee, EventDateTime, EventInsertRequest, EventReminders, EventResource,
    EventsListResponse, FreeBusyItem, FreeBusyRequest, FreeBusyResponse, ReminderOverride,
};
use crate::http::HttpClient;

const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
const APPOINTMENT_SUMMARY: &str = "Consultation";

/// Google Calendar adapter
///
/// Fail-closed: provider errors surface as `Err` or a conflict/error result,
/// never as `Free` or a fabricated success.
pub struct GoogleCalendarAdapter {
    http_client: HttpClient,
    auth: TokenManager,
    calendar_id: String,
    api_base: String,
}

impl GoogleCalendarAdapter {
    /// Create an adapter that books against `calendar_id`.
    pub fn new(http_client: HttpClient, auth: TokenManager, calendar_id: String) -> Self {
        Self { http_client, auth, calendar_id, api_base: GOOGLE_CALENDAR_API_BASE.to_string() }
    }

    /// Point the adapter at a different API base (wiremock in tests).
    #[cfg(test)]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    async fn send_authorized(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let access_token = self.auth.access_token().await?;
        let mut request = self.http_client.request(method, url).bearer_auth(access_token);
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.http_client.send(request).await
    }

    async fn provider_error(context: &str, response: reqwest::Response) -> SlotBotError {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        match status.as_u16() {
            401 | 403 => SlotBotError::Auth(format!("{context}: provider rejected credential ({status})")),
            _ => SlotBotError::Calendar(format!("{context} failed ({status}): {body}")),
        }
    }

    fn event_body(request: &BookingRequest) -> Result<serde_json::Value> {
        let mut description = format!("Appointment for {}", request.attendee_email);
        if let Some(notes) = &request.notes {
            description.push_str("\n\nNotes: ");
            description.push_str(notes);
        }

        let event = EventInsertRequest {
            summary: format!("{APPOINTMENT_SUMMARY} - {}", request.attendee_email),
            description,
            start: EventDateTime {
                date_time: request.slot.start.to_rfc3339(),
                time_zone: Some("UTC".to_string()),
            },
            end: EventDateTime {
                date_time: request.slot.end.to_rfc3339(),
                time_zone: Some("UTC".to_string()),
            },
            attendees: vec![EventAttendee { email: request.attendee_email.clone() }],
            reminders: EventReminders {
                use_default: false,
                overrides: vec![
                    ReminderOverride { method: "email".to_string(), minutes: 24 * 60 },
                    ReminderOverride { method: "popup".to_string(), minutes: 30 },
                ],
            },
        };

        serde_json::to_value(event)
            .map_err(|err| SlotBotError::Internal(format!("failed to serialize event: {err}")))
    }

    async fn find_event_for_attendee(
        &self,
        email: &str,
        slot: TimeRange,
    ) -> Result<Option<EventResource>> {
        let url = format!("{}/calendars/{}/events", self.api_base, self.calendar_id);
        let access_token = self.auth.access_token().await?;
        let request = self
            .http_client
            .request(Method::GET, &url)
            .bearer_auth(access_token)
            .query(&[
                ("timeMin", slot.start.to_rfc3339()),
                ("timeMax", slot.end.to_rfc3339()),
                ("singleEvents", "true".to_string()),
            ]);

        let response = self.http_client.send(request).await?;
        if !response.status().is_success() {
            return Err(Self::provider_error("event lookup", response).await);
        }

        let listing: EventsListResponse = response
            .json()
            .await
            .map_err(|err| SlotBotError::Calendar(format!("failed to parse event list: {err}")))?;

        Ok(listing
            .items
            .into_iter()
            .find(|event| event.attendees.iter().any(|a| a.email.eq_ignore_ascii_case(email))))
    }
}

#[async_trait]
impl CalendarPort for GoogleCalendarAdapter {
    async fn check_availability(&self, slot: TimeRange) -> Result<Availability> {
        let url = format!("{}/freeBusy", self.api_base);
        let body = serde_json::to_value(FreeBusyRequest {
            time_min: slot.start.to_rfc3339(),
            time_max: slot.end.to_rfc3339(),
            items: vec![FreeBusyItem { id: self.calendar_id.clone() }],
        })
        .map_err(|err| SlotBotError::Internal(format!("failed to serialize query: {err}")))?;

        let response = self.send_authorized(Method::POST, &url, Some(body)).await?;
        if !response.status().is_success() {
            return Err(Self::provider_error("free/busy query", response).await);
        }

        let free_busy: FreeBusyResponse = response.json().await.map_err(|err| {
            SlotBotError::Calendar(format!("failed to parse free/busy response: {err}"))
        })?;

        let calendar = free_busy.calendars.get(&self.calendar_id).ok_or_else(|| {
            SlotBotError::Calendar(format!(
                "free/busy response missing calendar {}",
                self.calendar_id
            ))
        })?;

        // A per-calendar error means the verdict is unknown; that is never
        // reported as Free.
        if let Some(error) = calendar.errors.first() {
            return Err(SlotBotError::Calendar(format!(
                "provider reported free/busy error: {}",
                error.reason
            )));
        }

        if calendar.busy.is_empty() {
            Ok(Availability::Free)
        } else {
            info!(
                conflicts = calendar.busy.len(),
                first_start = %calendar.busy[0].start,
                first_end = %calendar.busy[0].end,
                "slot has conflicting events"
            );
            Ok(Availability::Busy)
        }
    }

    async fn book(&self, request: BookingRequest) -> Result<CalendarActionResult> {
        let url = format!("{}/calendars/{}/events", self.api_base, self.calendar_id);
        let body = Self::event_body(&request)?;

        let response = self.send_authorized(Method::POST, &url, Some(body)).await?;
        let status = response.status();

        if status.as_u16() == 409 {
            warn!(attendee = %request.attendee_email, "provider reported booking conflict");
            return Ok(CalendarActionResult::conflict("the requested slot is already booked"));
        }
        if !status.is_success() {
            return Err(Self::provider_error("event insert", response).await);
        }

        let event: EventResource = response
            .json()
            .await
            .map_err(|err| SlotBotError::Calendar(format!("failed to parse created event: {err}")))?;

        info!(event_id = %event.id, "appointment booked");
        Ok(CalendarActionResult::success(format!(
            "appointment booked for {} from {} to {}",
            request.attendee_email,
            request.slot.start.to_rfc3339(),
            request.slot.end.to_rfc3339()
        ))
        .with_event(event.id, event.html_link))
    }

    async fn cancel(&self, request: CancelRequest) -> Result<CalendarActionResult> {
        let Some(event) =
            self.find_event_for_attendee(&request.attendee_email, request.slot).await?
        else {
            return Ok(CalendarActionResult::error(format!(
                "no appointment found for {} in the requested slot",
                request.attendee_email
            )));
        };

        let url =
            format!("{}/calendars/{}/events/{}", self.api_base, self.calendar_id, event.id);
        let response = self.send_authorized(Method::DELETE, &url, None).await?;

        if !response.status().is_success() {
            return Err(Self::provider_error("event delete", response).await);
        }

        info!(event_id = %event.id, "appointment cancelled");
        Ok(CalendarActionResult::success(format!(
            "appointment for {} cancelled",
            request.attendee_email
        )))
    }
}
