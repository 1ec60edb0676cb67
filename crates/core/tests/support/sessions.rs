use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use slotbot_core::SessionRepository;
use slotbot_domain::{Result as DomainResult, SessionId, SessionState, SlotBotError};
use tokio::sync::{Mutex, OwnedMutexGuard};

struct Entry {
    state: Option<SessionState>,
    turn_lock: Arc<Mutex<()>>,
}

/// Minimal in-memory [`SessionRepository`] for orchestrator tests.
#[derive(Default)]
pub struct TestSessionStore {
    entries: StdMutex<HashMap<SessionId, Entry>>,
}

impl TestSessionStore {
    /// Peek at the stored state without going through the port.
    pub fn stored_state(&self, id: &SessionId) -> Option<SessionState> {
        self.entries.lock().unwrap().get(id).and_then(|e| e.state.clone())
    }
}

#[async_trait]
impl SessionRepository for TestSessionStore {
    async fn create(&self) -> DomainResult<SessionId> {
        let id = SessionId::generate();
        self.entries
            .lock()
            .unwrap()
            .insert(id, Entry { state: None, turn_lock: Arc::new(Mutex::new(())) });
        Ok(id)
    }

    async fn get(&self, id: &SessionId) -> DomainResult<Option<SessionState>> {
        self.entries
            .lock()
            .unwrap()
            .get(id)
            .map(|e| e.state.clone())
            .ok_or_else(|| SlotBotError::NotFound(format!("session {id}")))
    }

    async fn put(&self, id: &SessionId, state: SessionState) -> DomainResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let entry =
            entries.get_mut(id).ok_or_else(|| SlotBotError::NotFound(format!("session {id}")))?;
        entry.state = Some(state);
        Ok(())
    }

    async fn lock_turn(&self, id: &SessionId) -> DomainResult<OwnedMutexGuard<()>> {
        let lock = self
            .entries
            .lock()
            .unwrap()
            .get(id)
            .map(|e| e.turn_lock.clone())
            .ok_or_else(|| SlotBotError::NotFound(format!("session {id}")))?;
        Ok(lock.lock_owned().await)
    }
}
