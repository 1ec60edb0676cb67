use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotbot_core::{BranchOutcome, IntentParser, ResponseFormatter};
use slotbot_domain::{ParsedInput, Result as DomainResult, SessionState, SlotBotError};

/// Scripted [`IntentParser`]: hands out pre-seeded parse results in order.
pub struct ScriptedParser {
    results: Mutex<VecDeque<DomainResult<ParsedInput>>>,
}

impl ScriptedParser {
    pub fn new(results: Vec<DomainResult<ParsedInput>>) -> Self {
        Self { results: Mutex::new(results.into_iter().collect()) }
    }

    pub fn single(parsed: ParsedInput) -> Self {
        Self::new(vec![Ok(parsed)])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(SlotBotError::Parse(message.to_string()))])
    }
}

#[async_trait]
impl IntentParser for ScriptedParser {
    async fn parse(&self, _message: &str, _reference_time: DateTime<Utc>) -> DomainResult<ParsedInput> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SlotBotError::Internal("no scripted parse left".into())))
    }
}

/// Deterministic [`ResponseFormatter`] that encodes the branch outcome into a
/// recognisable reply string, so assertions can see which arm fired.
pub struct EchoFormatter;

#[async_trait]
impl ResponseFormatter for EchoFormatter {
    async fn format(
        &self,
        _parsed: &ParsedInput,
        _state: &SessionState,
        branch: &BranchOutcome,
    ) -> DomainResult<String> {
        Ok(match branch {
            BranchOutcome::CollectInfo { missing_info } => {
                format!("collect:{}", missing_info.join(","))
            }
            BranchOutcome::Availability { availability, .. } => {
                format!("availability:{availability:?}")
            }
            BranchOutcome::Action(result) => {
                format!("action:{:?}:{}", result.status, result.detail)
            }
            BranchOutcome::Passthrough => "passthrough".to_string(),
        })
    }
}
