//! Errors raised by the race state machine.

use super::types::{MAX_PLAYERS, MIN_PLAYERS};

/// Error that can occur when setting up, advancing or loading a race.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Setup was called with too few or too many players.
    #[display("A race needs between {} and {} players, got {}", MIN_PLAYERS, MAX_PLAYERS, _0)]
    InvalidPlayerCount(usize),

    /// There is no game in the session.
    #[display("No active game")]
    NoActiveGame,

    /// The race already has a winner.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// The die source produced a value outside 1..=6.
    #[display("Die produced {}, expected a value from 1 to 6", _0)]
    InvalidRoll(u8),

    /// A stored record violates the game invariants.
    #[display("Corrupt game state: {}", _0)]
    CorruptState(String),
}

impl GameError {
    /// Stable machine-readable name of the error.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidPlayerCount(_) => "invalid_player_count",
            GameError::NoActiveGame => "no_active_game",
            GameError::GameAlreadyOver => "game_already_over",
            GameError::InvalidRoll(_) => "invalid_roll",
            GameError::CorruptState(_) => "corrupt_state",
        }
    }
}

impl std::error::Error for GameError {}
