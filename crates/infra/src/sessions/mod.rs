//! In-memory session store
//!
//! Process-wide mapping from session id to the single most-recent
//! [`SessionState`] (last-write-wins, no history). Explicit key-value store
//! with a per-session turn lock instead of module-level globals, plus an
//! idle-eviction policy so abandoned sessions do not accumulate until process
//! restart.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use slotbot_core::SessionRepository;
use slotbot_domain::constants::DEFAULT_SESSION_IDLE_SECS;
use slotbot_domain::{Result, SessionId, SessionState, SlotBotError};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

struct SessionEntry {
    state: Option<SessionState>,
    turn_lock: Arc<Mutex<()>>,
    last_seen: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self { state: None, turn_lock: Arc::new(Mutex::new(())), last_seen: Instant::now() }
    }
}

/// In-memory implementation of [`SessionRepository`]
pub struct InMemorySessionStore {
    entries: DashMap<SessionId, SessionEntry>,
    idle_timeout: Duration,
}

impl InMemorySessionStore {
    /// Create a store with the default idle timeout.
    pub fn new() -> Self {
        Self::with_idle_timeout(Duration::from_secs(DEFAULT_SESSION_IDLE_SECS))
    }

    /// Create a store that evicts sessions idle longer than `idle_timeout`.
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self { entries: DashMap::new(), idle_timeout }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop sessions that have been idle longer than the configured timeout.
    ///
    /// Returns the number of evicted sessions. Called periodically by the
    /// server; cheap enough to also call opportunistically.
    pub fn evict_idle(&self) -> usize {
        let cutoff = Instant::now();
        // Counted inside the closure: diffing len() before and after races
        // concurrent create() calls.
        let mut evicted = 0;
        self.entries.retain(|_, entry| {
            let keep = cutoff.duration_since(entry.last_seen) < self.idle_timeout;
            if !keep {
                evicted += 1;
            }
            keep
        });
        if evicted > 0 {
            info!(evicted, remaining = self.entries.len(), "evicted idle sessions");
        }
        evicted
    }

    fn touch(entry: &mut SessionEntry) {
        entry.last_seen = Instant::now();
    }

    fn not_found(id: &SessionId) -> SlotBotError {
        SlotBotError::NotFound(format!("session {id} not found; start a new chat"))
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn create(&self) -> Result<SessionId> {
        let id = SessionId::generate();
        self.entries.insert(id, SessionEntry::new());
        debug!(session_id = %id, "session created");
        Ok(id)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<SessionState>> {
        let mut entry = self.entries.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        Self::touch(&mut entry);
        Ok(entry.state.clone())
    }

    async fn put(&self, id: &SessionId, state: SessionState) -> Result<()> {
        let mut entry = self.entries.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        entry.state = Some(state);
        Self::touch(&mut entry);
        Ok(())
    }

    async fn lock_turn(&self, id: &SessionId) -> Result<OwnedMutexGuard<()>> {
        // Clone the Arc out of the map entry first: holding a dashmap guard
        // across an await point can deadlock.
        let lock = {
            let mut entry = self.entries.get_mut(id).ok_or_else(|| Self::not_found(id))?;
            Self::touch(&mut entry);
            entry.turn_lock.clone()
        };
        Ok(lock.lock_owned().await)
    }
}
