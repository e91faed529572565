//! First-class invariants for the dice race.
//!
//! Invariants are logical properties that must hold for every reachable
//! `Game`. They are checked when a stored record is loaded and after each
//! move in debug builds.

use super::types::{BOARD_SIZE, DIE_FACES, Game, MAX_PLAYERS, MIN_PLAYERS, START_POSITION};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3, I4, I5> InvariantSet<S> for (I1, I2, I3, I4, I5)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
    I5: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
            (I4::holds(state), I4::description()),
            (I5::holds(state), I5::description()),
        ];

        let violations: Vec<_> = checks
            .into_iter()
            .filter(|(holds, _)| !holds)
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Seat count stays within the supported range.
pub struct PlayerCountInRange;

impl Invariant<Game> for PlayerCountInRange {
    fn holds(game: &Game) -> bool {
        (MIN_PLAYERS..=MAX_PLAYERS).contains(&game.players().len())
    }

    fn description() -> &'static str {
        "player count must be between 2 and 4"
    }
}

/// Every token sits between the start and the last square.
pub struct PositionsOnBoard;

impl Invariant<Game> for PositionsOnBoard {
    fn holds(game: &Game) -> bool {
        game.players()
            .iter()
            .all(|p| (START_POSITION..=BOARD_SIZE).contains(&p.position()))
    }

    fn description() -> &'static str {
        "positions must lie between -1 and the board size"
    }
}

/// The turn index points at a seat.
pub struct TurnIndexInRange;

impl Invariant<Game> for TurnIndexInRange {
    fn holds(game: &Game) -> bool {
        game.turn_index() < game.players().len()
    }

    fn description() -> &'static str {
        "turn index must point at a player"
    }
}

/// The game is over exactly when one player has finished.
pub struct OverIffOneFinisher;

impl Invariant<Game> for OverIffOneFinisher {
    fn holds(game: &Game) -> bool {
        let finishers = game.players().iter().filter(|p| p.has_finished()).count();
        match finishers {
            0 => !game.is_over(),
            1 => game.is_over(),
            _ => false,
        }
    }

    fn description() -> &'static str {
        "game must be over exactly when one player has finished"
    }
}

/// The last recorded move is one the rules could have produced, and the
/// mover still stands where it landed.
pub struct LastTurnConsistent;

impl Invariant<Game> for LastTurnConsistent {
    fn holds(game: &Game) -> bool {
        let Some(turn) = game.last_turn() else {
            return true;
        };
        let Some(mover) = game.players().get(turn.player_index) else {
            return false;
        };
        DIE_FACES.contains(&turn.roll)
            && (START_POSITION..BOARD_SIZE).contains(&turn.from)
            && turn.to == (turn.from + i32::from(turn.roll)).min(BOARD_SIZE)
            && mover.position() == turn.to
    }

    fn description() -> &'static str {
        "last turn must be a legal roll by a seated player"
    }
}

/// All race invariants.
pub type RaceInvariants = (
    PlayerCountInRange,
    PositionsOnBoard,
    TurnIndexInRange,
    OverIffOneFinisher,
    LastTurnConsistent,
);
