//! # SlotBot Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with retry/backoff
//! - External service integrations (OpenAI oracle, Google Calendar)
//! - In-memory session store
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `slotbot-core`
//! - Depends on `slotbot-domain` and `slotbot-core`
//! - Contains all "impure" code (I/O, network, filesystem)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod sessions;

// Re-export commonly used items
pub use http::HttpClient;
pub use integrations::google::GoogleCalendarAdapter;
pub use integrations::openai::{OpenAiIntentParser, OpenAiResponseFormatter};
pub use sessions::InMemorySessionStore;
