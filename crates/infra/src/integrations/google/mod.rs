//! Google Calendar integration
//!
//! Implements the core `CalendarPort` against the Google Calendar v3 API:
//! free/busy queries, event creation, and cancellation. A bearer credential is
//! obtained before each call from [`auth::TokenManager`], which reads an
//! on-disk OAuth token file and refreshes transparently when expired.

pub mod auth;
mod adapter;
mod types;

pub use adapter::GoogleCalendarAdapter;
pub use auth::TokenManager;
