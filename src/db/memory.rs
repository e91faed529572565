//! In-process session store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, instrument};

use crate::db::DbError;
use crate::games::race::Game;
use crate::session::{SessionId, SessionStore};

/// Session store that keeps games in memory. Everything is lost on exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: Arc<Mutex<HashMap<SessionId, Game>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions holding a game.
    pub fn len(&self) -> usize {
        self.games.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no session holds a game.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    #[instrument(skip(self))]
    fn load(&self, session_id: &str) -> Result<Option<Game>, DbError> {
        let games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(games.get(session_id).cloned())
    }

    #[instrument(skip(self, game))]
    fn save(&self, session_id: &str, game: &Game) -> Result<(), DbError> {
        let mut games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        games.insert(session_id.to_string(), game.clone());
        debug!(sessions = games.len(), "Game saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, session_id: &str) -> Result<bool, DbError> {
        let mut games = self.games.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(games.remove(session_id).is_some())
    }
}
