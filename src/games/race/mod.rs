//! Dice race: roll, advance, first token to the last square wins.

mod dice;
mod error;
mod invariants;
mod phases;
mod rules;
mod types;
mod view;

pub use dice::{Die, RandomDie};
pub use error::GameError;
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, LastTurnConsistent, OverIffOneFinisher, PlayerCountInRange,
    PositionsOnBoard, RaceInvariants, TurnIndexInRange,
};
pub use phases::{GamePhase, phase_of};
pub use rules::{advance_turn, initialize, query, reset};
pub use types::{
    BOARD_SIZE, CharacterToken, DIE_FACES, Game, MAX_PLAYERS, MIN_PLAYERS, Player, START_POSITION,
    TurnRecord,
};
pub use view::{BoardView, PlayerView};
