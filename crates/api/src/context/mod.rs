//! Application context and dependency wiring

use std::sync::Arc;
use std::time::Duration;

use slotbot_core::TurnService;
use slotbot_domain::{Config, Result};
use slotbot_infra::integrations::google::TokenManager;
use slotbot_infra::{
    GoogleCalendarAdapter, HttpClient, InMemorySessionStore, OpenAiIntentParser,
    OpenAiResponseFormatter,
};

/// Shared application state handed to every request handler.
pub struct AppContext {
    /// Turn orchestrator over the live oracle and calendar adapters
    pub turns: Arc<TurnService>,
    /// Session store, also driven by the background eviction task
    pub sessions: Arc<InMemorySessionStore>,
}

impl AppContext {
    /// Wire the full adapter stack from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = HttpClient::new()?;

        let parser = Arc::new(OpenAiIntentParser::new(
            config.openai.api_key.clone(),
            config.openai.model.clone(),
            http_client.clone(),
        ));
        let formatter = Arc::new(OpenAiResponseFormatter::new(
            config.openai.api_key.clone(),
            config.openai.model.clone(),
            http_client.clone(),
        ));

        let auth = TokenManager::new(
            http_client.clone(),
            config.calendar.client_id.clone(),
            config.calendar.client_secret.clone(),
            config.calendar.token_path.clone(),
        );
        let calendar = Arc::new(GoogleCalendarAdapter::new(
            http_client,
            auth,
            config.calendar.calendar_id.clone(),
        ));

        let sessions = Arc::new(InMemorySessionStore::with_idle_timeout(Duration::from_secs(
            config.session.idle_timeout_secs,
        )));

        let turns = Arc::new(TurnService::new(parser, calendar, formatter, sessions.clone()));

        Ok(Self { turns, sessions })
    }

    /// Build a context from pre-constructed parts. Used by router tests to
    /// substitute stub adapters.
    pub fn from_parts(turns: Arc<TurnService>, sessions: Arc<InMemorySessionStore>) -> Self {
        Self { turns, sessions }
    }
}
