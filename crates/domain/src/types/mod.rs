//! Domain types and models

pub mod calendar;
pub mod chat;
pub mod parsing;
pub mod session;

pub use calendar::{
    Availability, BookingRequest, CalendarActionResult, CalendarActionStatus, CancelRequest,
};
pub use chat::{ChatRequest, ChatResponse, StartChatResponse};
pub use parsing::{Intent, ParsedInput, TimeRange};
pub use session::{IdentityStatus, InfoStatus, NextAction, SessionId, SessionState};
