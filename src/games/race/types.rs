//! Core domain types for the dice race.

use super::error::GameError;
use super::invariants::{InvariantSet, RaceInvariants};
use serde::{Deserialize, Serialize};

/// Number of squares on the track. Reaching it wins the race.
pub const BOARD_SIZE: i32 = 25;

/// Position of a token that has not entered the track yet.
pub const START_POSITION: i32 = -1;

/// Fewest players a race can be set up with.
pub const MIN_PLAYERS: usize = 2;

/// Most players a race can be set up with.
pub const MAX_PLAYERS: usize = 4;

/// Faces of the die.
pub const DIE_FACES: std::ops::RangeInclusive<u8> = 1..=6;

/// Character token a player moves around the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CharacterToken {
    /// Token A, given to even seats.
    Alien,
    /// Token B, given to odd seats.
    Astronaut,
}

impl CharacterToken {
    /// Token for the given seat: even seats are aliens, odd seats astronauts.
    pub fn for_seat(index: usize) -> Self {
        if index % 2 == 0 {
            CharacterToken::Alien
        } else {
            CharacterToken::Astronaut
        }
    }

    /// Image asset the UI draws for this token.
    pub fn image(self) -> &'static str {
        match self {
            CharacterToken::Alien => "alien.png",
            CharacterToken::Astronaut => "astronaut.png",
        }
    }
}

/// A player in the race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    position: i32,
    token: CharacterToken,
}

impl Player {
    /// Creates a player waiting at the start.
    pub fn new(name: impl Into<String>, token: CharacterToken) -> Self {
        Self {
            name: name.into(),
            position: START_POSITION,
            token,
        }
    }

    /// Returns the player's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the square the player is on (-1 before the first roll).
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Returns the player's character token.
    pub fn token(&self) -> CharacterToken {
        self.token
    }

    /// Whether the player has reached the last square.
    pub fn has_finished(&self) -> bool {
        self.position == BOARD_SIZE
    }

    pub(super) fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

/// The most recent move, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Seat of the player who moved.
    pub player_index: usize,
    /// Value the die showed.
    pub roll: u8,
    /// Square before the move.
    pub from: i32,
    /// Square after the move, clamped to the board.
    pub to: i32,
}

/// Complete race state.
///
/// Fields are private; the only ways to obtain a `Game` are
/// [`initialize`](super::initialize), [`advance_turn`](super::advance_turn) and
/// deserializing a record, which re-checks every invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct Game {
    players: Vec<Player>,
    turn_index: usize,
    is_over: bool,
    last_turn: Option<TurnRecord>,
}

impl Game {
    pub(super) fn from_players(players: Vec<Player>) -> Self {
        Self {
            players,
            turn_index: 0,
            is_over: false,
            last_turn: None,
        }
    }

    /// Returns all players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the index of the player whose turn it is.
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    /// Whether a player has reached the end of the track.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Returns the most recent move, if any.
    pub fn last_turn(&self) -> Option<&TurnRecord> {
        self.last_turn.as_ref()
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.turn_index]
    }

    /// Returns the player who reached the last square.
    pub fn winner(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.has_finished())
    }

    /// Checks every race invariant.
    pub fn validate(&self) -> Result<(), GameError> {
        RaceInvariants::check_all(self).map_err(|violations| {
            let descriptions: Vec<_> = violations.into_iter().map(|v| v.description).collect();
            GameError::CorruptState(descriptions.join("; "))
        })
    }

    pub(super) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub(super) fn set_turn_index(&mut self, turn_index: usize) {
        self.turn_index = turn_index;
    }

    pub(super) fn set_over(&mut self) {
        self.is_over = true;
    }

    pub(super) fn set_last_turn(&mut self, record: TurnRecord) {
        self.last_turn = Some(record);
    }
}

/// Unchecked wire form of [`Game`].
#[derive(Deserialize)]
struct GameRecord {
    players: Vec<Player>,
    turn_index: usize,
    is_over: bool,
    #[serde(default)]
    last_turn: Option<TurnRecord>,
}

impl TryFrom<GameRecord> for Game {
    type Error = GameError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let game = Game {
            players: record.players,
            turn_index: record.turn_index,
            is_over: record.is_over,
            last_turn: record.last_turn,
        };
        game.validate()?;
        Ok(game)
    }
}
