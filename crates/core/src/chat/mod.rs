//! Conversational turn processing
//!
//! A turn runs through a fixed stage order: parse, evaluate, branch, respond.
//! `evaluator` classifies the conversation state, `service` sequences the
//! stages, `ports` defines the boundaries the infra layer implements.

pub mod evaluator;
pub mod ports;
pub mod service;

pub use service::TurnService;
