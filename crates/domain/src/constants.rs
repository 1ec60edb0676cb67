//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Appointment defaults
pub const DEFAULT_APPOINTMENT_MINUTES: i64 = 60;

// Field names reported in `missing_info` lists. The parser and the evaluator
// must agree on these spellings across turns.
pub const FIELD_PATIENT_EMAIL: &str = "patient_email";
pub const FIELD_START_TIME: &str = "start_time";
pub const FIELD_TEMPORAL_EXPRESSION: &str = "temporal_expression";

// Session lifecycle
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;

// Chat surface
pub const WELCOME_MESSAGE: &str = "Welcome to SlotBot! How can I help you today?";
pub const GENERIC_APOLOGY: &str =
    "Sorry, I couldn't understand that. Could you rephrase your request?";
