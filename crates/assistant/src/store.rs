//! In-memory registry of live assistant sessions.

use parkguide_core::SessionId;
use parkguide_core::error::AssistantError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::assistant::Assistant;
use crate::session::AssistantSession;

/// Creates, finds and tears down [`AssistantSession`]s.
///
/// Holds no assistant when no credential was resolved; every session
/// operation then fails with [`AssistantError::Unavailable`] and nothing
/// reaches the network.
pub struct SessionStore {
    assistant: Option<Arc<Assistant>>,
    sessions: RwLock<HashMap<SessionId, Arc<AssistantSession>>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(assistant: Option<Arc<Assistant>>, max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            assistant,
            sessions: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
            idle_timeout,
        }
    }

    pub fn is_available(&self) -> bool {
        self.assistant.is_some()
    }

    pub fn assistant(&self) -> Option<&Arc<Assistant>> {
        self.assistant.as_ref()
    }

    /// Start a new session, evicting the least recently active idle one if
    /// the store is full.
    ///
    /// Sessions with a turn in flight are never evicted. When every session
    /// is busy the store runs over capacity until the next create or purge.
    pub fn create(&self) -> Result<Arc<AssistantSession>, AssistantError> {
        let assistant = self.assistant.clone().ok_or(AssistantError::Unavailable)?;
        let session = Arc::new(AssistantSession::new(assistant));

        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        if sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .filter(|(_, s)| !s.is_busy())
                .min_by_key(|(_, s)| s.last_active())
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    info!(session = %id, max = self.max_sessions, "Evicted least recently active session");
                }
                None => warn!(
                    total = sessions.len(),
                    max = self.max_sessions,
                    "Every session is mid-turn; running over capacity"
                ),
            }
        }
        sessions.insert(session.id().clone(), session.clone());

        debug!(session = %session.id(), total = sessions.len(), "Session created");
        Ok(session)
    }

    pub fn get(&self, id: &SessionId) -> Result<Arc<AssistantSession>, AssistantError> {
        if !self.is_available() {
            return Err(AssistantError::Unavailable);
        }
        self.sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
            .ok_or_else(|| AssistantError::SessionNotFound(id.to_string()))
    }

    /// End a session.
    pub fn remove(&self, id: &SessionId) -> Result<(), AssistantError> {
        if !self.is_available() {
            return Err(AssistantError::Unavailable);
        }
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .ok_or_else(|| AssistantError::SessionNotFound(id.to_string()))?;
        debug!(session = %id, "Session ended");
        Ok(())
    }

    /// Drop sessions idle longer than the idle timeout. Sessions with a turn
    /// in flight are kept.
    pub fn purge_idle(&self) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        let before = sessions.len();
        sessions.retain(|_, s| s.is_busy() || s.idle_for() < self.idle_timeout);
        let purged = before - sessions.len();
        if purged > 0 {
            info!(purged, remaining = sessions.len(), "Purged idle sessions");
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
