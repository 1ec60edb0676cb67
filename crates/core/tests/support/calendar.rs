use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use slotbot_core::CalendarPort;
use slotbot_domain::{
    Availability, BookingRequest, CalendarActionResult, CancelRequest, Result as DomainResult,
    SlotBotError, TimeRange,
};

/// Calls recorded by [`MockCalendarPort`].
#[derive(Debug, Clone)]
pub enum CalendarCall {
    CheckAvailability(TimeRange),
    Book(BookingRequest),
    Cancel(CancelRequest),
}

/// In-memory mock for [`CalendarPort`].
///
/// Records every call and returns configured responses. Designed for turn
/// orchestration tests where deterministic responses are required.
#[derive(Clone)]
pub struct MockCalendarPort {
    availability: Availability,
    fail: bool,
    calls: Arc<Mutex<Vec<CalendarCall>>>,
}

impl Default for MockCalendarPort {
    fn default() -> Self {
        Self { availability: Availability::Free, fail: false, calls: Arc::new(Mutex::new(Vec::new())) }
    }
}

impl MockCalendarPort {
    pub fn busy(mut self) -> Self {
        self.availability = Availability::Busy;
        self
    }

    /// Make every provider call fail with a calendar error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<CalendarCall> {
        self.calls.lock().unwrap().clone()
    }

    fn guard(&self) -> DomainResult<()> {
        if self.fail {
            Err(SlotBotError::Calendar("provider unreachable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CalendarPort for MockCalendarPort {
    async fn check_availability(&self, slot: TimeRange) -> DomainResult<Availability> {
        self.calls.lock().unwrap().push(CalendarCall::CheckAvailability(slot));
        self.guard()?;
        Ok(self.availability)
    }

    async fn book(&self, request: BookingRequest) -> DomainResult<CalendarActionResult> {
        self.calls.lock().unwrap().push(CalendarCall::Book(request.clone()));
        self.guard()?;
        Ok(CalendarActionResult::success(format!(
            "booked {} at {}",
            request.attendee_email, request.slot.start
        ))
        .with_event("evt-1", Some("https://calendar.example/evt-1".to_string())))
    }

    async fn cancel(&self, request: CancelRequest) -> DomainResult<CalendarActionResult> {
        self.calls.lock().unwrap().push(CalendarCall::Cancel(request.clone()));
        self.guard()?;
        Ok(CalendarActionResult::success(format!("cancelled for {}", request.attendee_email)))
    }
}
