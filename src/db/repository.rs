//! SQLite-backed session store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, NewSavedGame, SavedGame, schema};
use crate::games::race::Game;
use crate::session::SessionStore;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Session store that keeps one serialized game per session in SQLite.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at the given path, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path))]
    pub fn open(db_path: impl Into<String>) -> Result<Self, DbError> {
        let store = Self {
            db_path: db_path.into(),
        };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        info!(path = %store.db_path, migrations = applied.len(), "Opened game store");
        Ok(store)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Lists the ids of all sessions with a stored game, oldest update first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn session_ids(&self) -> Result<Vec<String>, DbError> {
        let mut conn = self.connection()?;
        let ids = schema::saved_games::table
            .order(schema::saved_games::updated_at.asc())
            .select(schema::saved_games::session_id)
            .load::<String>(&mut conn)?;
        debug!(count = ids.len(), "Listed stored sessions");
        Ok(ids)
    }
}

impl SessionStore for SqliteStore {
    #[instrument(skip(self))]
    fn load(&self, session_id: &str) -> Result<Option<Game>, DbError> {
        let mut conn = self.connection()?;

        let row = schema::saved_games::table
            .find(session_id)
            .select(SavedGame::as_select())
            .first(&mut conn)
            .optional()?;

        match row {
            Some(row) => {
                debug!(updated_at = %row.updated_at(), "Stored game found");
                row.decode().map(Some)
            }
            None => {
                debug!("No stored game");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, game), fields(is_over = game.is_over()))]
    fn save(&self, session_id: &str, game: &Game) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let row = NewSavedGame::encode(session_id, game)?;

        diesel::insert_into(schema::saved_games::table)
            .values(&row)
            .on_conflict(schema::saved_games::session_id)
            .do_update()
            .set((
                schema::saved_games::state.eq(row.state()),
                schema::saved_games::updated_at.eq(row.updated_at()),
            ))
            .execute(&mut conn)?;

        debug!("Game saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, session_id: &str) -> Result<bool, DbError> {
        let mut conn = self.connection()?;
        let deleted =
            diesel::delete(schema::saved_games::table.find(session_id)).execute(&mut conn)?;
        debug!(deleted, "Stored game removed");
        Ok(deleted > 0)
    }
}
