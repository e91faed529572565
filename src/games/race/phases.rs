//! Lifecycle phases of a session's race.

use super::types::Game;
use serde::{Deserialize, Serialize};

/// Where a session's race stands.
///
/// ```text
/// NotStarted --initialize--> InProgress --advance_turn--> InProgress
///                                       --advance_turn (finish)--> Over
/// Over --reset--> NotStarted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GamePhase {
    /// No game exists for the session.
    NotStarted,
    /// Players are still rolling.
    InProgress,
    /// A player reached the last square.
    Over,
}

impl Game {
    /// Returns the phase of this game.
    pub fn phase(&self) -> GamePhase {
        if self.is_over() {
            GamePhase::Over
        } else {
            GamePhase::InProgress
        }
    }
}

/// Classifies a session slot that may hold no game.
pub fn phase_of(slot: Option<&Game>) -> GamePhase {
    slot.map_or(GamePhase::NotStarted, Game::phase)
}
