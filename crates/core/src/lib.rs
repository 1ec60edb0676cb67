//! # SlotBot Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The session state evaluator and turn orchestrator
//! - Port/adapter interfaces (traits) for the NLU oracle, the calendar
//!   provider, the response formatter, and the session store
//!
//! ## Architecture Principles
//! - Only depends on `slotbot-domain`
//! - No HTTP, no provider SDKs, no storage code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod chat;

pub use chat::evaluator::evaluate;
pub use chat::ports::{
    BranchOutcome, CalendarPort, IntentParser, ResponseFormatter, SessionRepository,
};
pub use chat::TurnService;
