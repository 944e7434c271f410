use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::errors::BlackjackError;
use super::session::GameSession;

/// Storage for running games, keyed by player.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fails with `SessionAlreadyActive` if the player already has a session
    async fn create_session(&self, session: &GameSession) -> Result<(), BlackjackError>;
    async fn get_session(&self, player_key: &str) -> Result<Option<GameSession>, BlackjackError>;
    async fn update_session(&self, session: &GameSession) -> Result<(), BlackjackError>;
    async fn delete_session(&self, player_key: &str) -> Result<(), BlackjackError>;
    async fn active_sessions(&self) -> Result<usize, BlackjackError>;
}

/// In-memory session store
///
/// Nothing is persisted; every running game is lost when the process exits.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, GameSession>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn has_session(&self, player_key: &str) -> bool {
        self.sessions.read().await.contains_key(player_key)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self, session), fields(player_key = %session.player_key()))]
    async fn create_session(&self, session: &GameSession) -> Result<(), BlackjackError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.player_key()) {
            warn!("Player already has a session in memory");
            return Err(BlackjackError::SessionAlreadyActive);
        }
        sessions.insert(session.player_key().to_string(), session.clone());

        debug!(session_id = %session.id(), "Session created in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_session(&self, player_key: &str) -> Result<Option<GameSession>, BlackjackError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(player_key).cloned())
    }

    #[instrument(skip(self, session), fields(player_key = %session.player_key()))]
    async fn update_session(&self, session: &GameSession) -> Result<(), BlackjackError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session.player_key()) {
            Some(existing) => {
                *existing = session.clone();
                debug!(session_id = %session.id(), "Session updated in memory");
                Ok(())
            }
            None => {
                warn!("Session not found for update in memory");
                Err(BlackjackError::NoActiveSession)
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, player_key: &str) -> Result<(), BlackjackError> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(player_key).is_none() {
            warn!("Session not found for deletion in memory");
            return Err(BlackjackError::NoActiveSession);
        }

        debug!("Session deleted from memory");
        Ok(())
    }

    async fn active_sessions(&self) -> Result<usize, BlackjackError> {
        Ok(self.sessions.read().await.len())
    }
}
