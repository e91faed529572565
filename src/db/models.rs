//! Database models for stored games.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::race::Game;

/// A session's game as stored in the database.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::saved_games)]
#[diesel(primary_key(session_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SavedGame {
    session_id: String,
    state: String,
    updated_at: NaiveDateTime,
}

impl SavedGame {
    /// Decodes the stored record, re-checking every game invariant.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the record is malformed or describes an
    /// impossible game.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn decode(&self) -> Result<Game, DbError> {
        serde_json::from_str(&self.state).map_err(|e| {
            DbError::for_session(&self.session_id, format!("stored game is unreadable: {e}"))
        })
    }
}

/// Insertable row for saving a session's game.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::saved_games)]
pub struct NewSavedGame {
    session_id: String,
    state: String,
    updated_at: NaiveDateTime,
}

impl NewSavedGame {
    /// Encodes a game for the given session, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the game cannot be serialized.
    #[instrument(skip(game))]
    pub fn encode(session_id: &str, game: &Game) -> Result<Self, DbError> {
        let state = serde_json::to_string(game).map_err(|e| {
            DbError::for_session(session_id, format!("game could not be encoded: {e}"))
        })?;
        Ok(Self::new(
            session_id.to_string(),
            state,
            chrono::Utc::now().naive_utc(),
        ))
    }
}
