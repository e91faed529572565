//! Cosmic Race library - a dice race board game for 2 to 4 players
//!
//! Players take turns rolling a six-sided die and moving their token along a
//! 25-square track. The first token to reach the last square wins.
//!
//! # Architecture
//!
//! - **Games**: the race state machine (`initialize`, `advance_turn`, `query`, `reset`)
//! - **Session**: one race per session, mutations serialized
//! - **Db**: session stores (SQLite via diesel, or in memory)
//! - **Server**: JSON HTTP API over axum
//!
//! # Example
//!
//! ```
//! use cosmic_race::{advance_turn, initialize, GameError};
//!
//! # fn example() -> Result<(), GameError> {
//! let game = initialize(&["Ada", "Grace"])?;
//! let game = advance_turn(&game, &mut || 4u8)?;
//! assert_eq!(game.players()[0].position(), 3);
//! assert_eq!(game.turn_index(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;
mod server;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig, StorageKind};

// Crate-level exports - Persistence
pub use db::{DbError, MemoryStore, NewSavedGame, SavedGame, SqliteStore};

// Crate-level exports - Server
pub use server::{AppState, ApiError, ErrorBody, SharedDie, StartGameRequest, router};

// Crate-level exports - Session management
pub use session::{SessionError, SessionId, SessionManager, SessionStore};

// Crate-level exports - Game types
pub use games::race::{
    BOARD_SIZE, BoardView, CharacterToken, DIE_FACES, Die, Game, GameError, GamePhase, Invariant,
    InvariantSet, InvariantViolation, LastTurnConsistent, MAX_PLAYERS, MIN_PLAYERS, OverIffOneFinisher,
    PlayerCountInRange, Player, PlayerView, PositionsOnBoard, RaceInvariants, RandomDie,
    START_POSITION, TurnIndexInRange, TurnRecord, advance_turn, initialize, phase_of, query, reset,
};
