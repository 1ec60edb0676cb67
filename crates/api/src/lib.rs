//! # SlotBot Server
//!
//! HTTP API surface for the conversational booking assistant.
//!
//! Exposes three endpoints:
//! - `POST /start_chat` - allocate a session and return the welcome message
//! - `POST /chat` - run one conversational turn for an existing session
//! - `GET /health` - liveness probe
//!
//! The server wires the infra adapters (OpenAI oracle, Google Calendar,
//! in-memory session store) into the core turn orchestrator.

pub mod context;
pub mod routes;

pub use context::AppContext;
pub use routes::router;
