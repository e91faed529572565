//! Game session management for HTTP multiplayer.
//!
//! Each session holds at most one race. The manager loads it from a
//! [`SessionStore`], applies one state-machine operation and writes it back,
//! holding a lock for the whole round trip so concurrent requests cannot
//! lose a move.

use crate::db::{DbError, MemoryStore};
use crate::games::race::{self, BoardView, Die, Game, GameError, GamePhase};
use derive_more::{Display, From};
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Storage for one game per session.
pub trait SessionStore: Debug + Send + Sync {
    /// Loads the session's game, if it has one.
    fn load(&self, session_id: &str) -> Result<Option<Game>, DbError>;

    /// Stores the session's game, replacing any previous one.
    fn save(&self, session_id: &str, game: &Game) -> Result<(), DbError>;

    /// Deletes the session's game. Returns whether one existed.
    fn remove(&self, session_id: &str) -> Result<bool, DbError>;
}

/// Error from a session operation.
#[derive(Debug, Clone, Display, From)]
pub enum SessionError {
    /// The game rejected the operation.
    #[display("{}", _0)]
    Game(GameError),
    /// The store failed.
    #[display("{}", _0)]
    Store(DbError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Game(e) => Some(e),
            SessionError::Store(e) => Some(e),
        }
    }
}

/// Manages the games of all sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    write_lock: Arc<Mutex<()>>,
}

impl SessionManager {
    /// Creates a session manager over the given store.
    #[instrument(skip(store))]
    pub fn new(store: impl SessionStore + 'static) -> Self {
        info!(store = ?store, "Creating session manager");
        Self {
            store: Arc::new(store),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a session manager that keeps games in memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Starts a race in the session, replacing any game already there.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPlayerCount`] for fewer than 2 or more
    /// than 4 names, or a store error.
    #[instrument(skip(self, player_names), fields(players = player_names.len()))]
    pub fn start_game<S: AsRef<str>>(
        &self,
        session_id: &str,
        player_names: &[S],
    ) -> Result<Game, SessionError> {
        let game = race::initialize(player_names)?;

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.store.save(session_id, &game)?;

        info!(session_id, "Race started");
        Ok(game)
    }

    /// Rolls for the current player of the session's race.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoActiveGame`] if the session has no game,
    /// [`GameError::GameAlreadyOver`] once someone has finished, or a store
    /// error. A rejected roll leaves the stored game unchanged.
    #[instrument(skip(self, die))]
    pub fn roll<D: Die + ?Sized>(&self, session_id: &str, die: &mut D) -> Result<Game, SessionError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let slot = self.store.load(session_id)?;
        let current = race::query(slot.as_ref()).inspect_err(|_| {
            warn!(session_id, "Roll requested without a game");
        })?;
        let next = race::advance_turn(current, die)?;
        self.store.save(session_id, &next)?;

        if let Some(turn) = next.last_turn() {
            info!(
                session_id,
                player_index = turn.player_index,
                roll = turn.roll,
                position = turn.to,
                is_over = next.is_over(),
                "Roll applied"
            );
        }
        Ok(next)
    }

    /// Returns the session's game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoActiveGame`] if the session has no game, or a
    /// store error.
    #[instrument(skip(self))]
    pub fn game(&self, session_id: &str) -> Result<Game, SessionError> {
        let slot = self.store.load(session_id)?;
        Ok(race::query(slot.as_ref())?.clone())
    }

    /// Returns the board view of the session's game.
    ///
    /// # Errors
    ///
    /// Same as [`SessionManager::game`].
    pub fn view(&self, session_id: &str) -> Result<BoardView, SessionError> {
        self.game(session_id).map(|game| BoardView::from(&game))
    }

    /// Returns where the session's race stands.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    #[instrument(skip(self))]
    pub fn phase(&self, session_id: &str) -> Result<GamePhase, SessionError> {
        let slot = self.store.load(session_id)?;
        Ok(race::phase_of(slot.as_ref()))
    }

    /// Discards the session's game. Resetting an empty session is a no-op.
    ///
    /// The stored record is dropped without being read, so an unreadable
    /// record can always be cleared.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    #[instrument(skip(self))]
    pub fn restart(&self, session_id: &str) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let removed = self.store.remove(session_id)?;

        info!(session_id, removed, "Session reset");
        Ok(())
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_rolls_are_not_lost() {
        let manager = SessionManager::in_memory();
        manager
            .start_game("s1", &["Ada", "Grace", "Linus", "Barbara"])
            .expect("start failed");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let manager = manager.clone();
                thread::spawn(move || manager.roll("s1", &mut || 1u8).expect("roll failed"))
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }

        let game = manager.game("s1").expect("game missing");
        assert!(game.players().iter().all(|p| p.position() == 0));
        assert_eq!(game.turn_index(), 0);
    }

    #[test]
    fn sessions_are_independent() {
        let manager = SessionManager::in_memory();
        manager.start_game("a", &["Ada", "Grace"]).expect("start failed");
        manager.start_game("b", &["Linus", "Barbara"]).expect("start failed");

        manager.roll("a", &mut || 6u8).expect("roll failed");

        assert_eq!(manager.game("a").expect("game a").turn_index(), 1);
        assert_eq!(manager.game("b").expect("game b").turn_index(), 0);
    }
}
