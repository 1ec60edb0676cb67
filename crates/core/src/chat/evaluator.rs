//! Session state evaluator
//!
//! Classifies one turn's parse against any carried-over context into a
//! [`SessionState`]. Pure and deterministic: the same `(parsed, prior)` pair
//! always yields the same state.
//!
//! The evaluator fails toward asking the user for clarification. Whenever any
//! required field is unsatisfied the next action is `CollectInfo`; it is never
//! `ExecuteOperation` unless identity is known and the checklist is complete.

use slotbot_domain::constants::{FIELD_PATIENT_EMAIL, FIELD_START_TIME};
use slotbot_domain::{
    IdentityStatus, InfoStatus, Intent, NextAction, ParsedInput, SessionState, TimeRange,
};

/// Evaluate the current turn's parse against the prior session state.
///
/// Identity and a resolved slot are inherited from `prior` when this turn's
/// message omitted them, so "book next Monday 3pm" followed by "my email is
/// a@b.com" completes the booking checklist. A turn that brings its own vague
/// time expression does not inherit the old slot.
pub fn evaluate(parsed: &ParsedInput, prior: Option<&SessionState>) -> SessionState {
    let identity =
        parsed.identity.clone().or_else(|| prior.and_then(|p| p.identity.clone()));

    // A fresh vague time expression supersedes a previously resolved slot;
    // carrying the old slot forward would answer the new question against
    // stale context.
    let time_range = parsed.time_range.or_else(|| {
        if parsed.temporal_expression.is_some() {
            None
        } else {
            prior.and_then(|p| p.time_range)
        }
    });

    let mut missing_info = checklist_gaps(parsed, identity.as_deref(), time_range);

    // Parser-flagged fields are kept unless carried-over context satisfied
    // them in the meantime.
    for field in &parsed.missing_info {
        if !missing_info.contains(field)
            && !field_satisfied(field, parsed, identity.as_deref(), time_range)
        {
            missing_info.push(field.clone());
        }
    }

    let info_status =
        if missing_info.is_empty() { InfoStatus::Complete } else { InfoStatus::Incomplete };

    let identity_status =
        if identity.is_some() { IdentityStatus::Known } else { IdentityStatus::Unknown };

    let next_action = match (info_status, parsed.intent) {
        (InfoStatus::Incomplete, _) => NextAction::CollectInfo,
        (InfoStatus::Complete, Intent::CheckAvailability) => NextAction::CheckAvailability,
        (InfoStatus::Complete, Intent::Book | Intent::Cancel) => NextAction::ExecuteOperation,
        (InfoStatus::Complete, Intent::GeneralQuery) => NextAction::Default,
    };

    SessionState {
        identity_status,
        info_status,
        identity,
        time_range,
        missing_info,
        next_action,
        intent: parsed.intent,
    }
}

/// Intent-specific required-field checklist, in checklist order.
fn checklist_gaps(
    parsed: &ParsedInput,
    identity: Option<&str>,
    time_range: Option<TimeRange>,
) -> Vec<String> {
    let mut gaps = Vec::new();

    if parsed.intent.requires_identity() && identity.is_none() {
        gaps.push(FIELD_PATIENT_EMAIL.to_string());
    }

    if parsed.intent.requires_time() && time_range.is_none() {
        gaps.push(FIELD_START_TIME.to_string());
    }

    // A vague temporal expression is enough to answer an availability
    // question; a concrete slot is not required.
    if parsed.intent == Intent::CheckAvailability
        && time_range.is_none()
        && parsed.temporal_expression.is_none()
    {
        gaps.push(FIELD_START_TIME.to_string());
    }

    gaps
}

/// Whether a parser-flagged field name is already satisfied by this turn's
/// parse or by carried-over context. Unknown field names are never satisfied;
/// keeping them biases toward collecting more information.
fn field_satisfied(
    field: &str,
    parsed: &ParsedInput,
    identity: Option<&str>,
    time_range: Option<TimeRange>,
) -> bool {
    match field {
        FIELD_PATIENT_EMAIL => identity.is_some(),
        FIELD_START_TIME => time_range.is_some(),
        slotbot_domain::constants::FIELD_TEMPORAL_EXPRESSION => {
            time_range.is_some() || parsed.temporal_expression.is_some()
        }
        _ => false,
    }
}
