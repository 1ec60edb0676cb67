//! Shared test helpers for `slotbot-core` integration tests.
//!
//! Deterministic stand-ins for the NLU oracle, the calendar provider, the
//! response formatter, and the session store, so turn tests can focus on
//! behaviour instead of boilerplate.

pub mod calendar;
pub mod oracles;
pub mod sessions;
