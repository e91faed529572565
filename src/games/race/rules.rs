//! Turn rules for the dice race.
//!
//! Every operation takes the game explicitly and hands back the result. The
//! caller decides where the game lives between requests.

use super::dice::Die;
use super::error::GameError;
use super::types::{
    BOARD_SIZE, CharacterToken, DIE_FACES, Game, MAX_PLAYERS, MIN_PLAYERS, Player, TurnRecord,
};
use tracing::{debug, info, instrument, warn};

/// Sets up a race with one player per name, all waiting at the start.
///
/// Blank names are replaced with `Player N` (1-based seat number). Tokens
/// alternate alien/astronaut by seat and the first seat moves first.
///
/// # Errors
///
/// Returns [`GameError::InvalidPlayerCount`] unless there are 2 to 4 names.
#[instrument(skip(player_names), fields(count = player_names.len()))]
pub fn initialize<S: AsRef<str>>(player_names: &[S]) -> Result<Game, GameError> {
    let count = player_names.len();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        warn!(count, "Rejected race setup");
        return Err(GameError::InvalidPlayerCount(count));
    }

    let players = player_names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let name = name.as_ref().trim();
            let name = if name.is_empty() {
                format!("Player {}", index + 1)
            } else {
                name.to_string()
            };
            Player::new(name, CharacterToken::for_seat(index))
        })
        .collect();

    let game = Game::from_players(players);
    info!(count, "Race initialized");
    Ok(game)
}

/// Plays one turn and returns the resulting game. `game` is left untouched.
///
/// # Errors
///
/// Returns [`GameError::GameAlreadyOver`] once a player has finished and
/// [`GameError::InvalidRoll`] if the die misbehaves.
pub fn advance_turn<D: Die + ?Sized>(game: &Game, die: &mut D) -> Result<Game, GameError> {
    let mut next = game.clone();
    next.take_turn(die)?;
    Ok(next)
}

/// Returns the game held in a session slot.
///
/// # Errors
///
/// Returns [`GameError::NoActiveGame`] if the slot is empty.
pub fn query(slot: Option<&Game>) -> Result<&Game, GameError> {
    slot.ok_or(GameError::NoActiveGame)
}

/// Discards the game held in a session slot.
#[instrument(skip(slot), fields(had_game = slot.is_some()))]
pub fn reset(slot: &mut Option<Game>) {
    if slot.take().is_some() {
        info!("Race discarded");
    }
}

impl Game {
    /// Rolls for the current player and moves their token.
    ///
    /// The turn passes to the next seat on every roll, including the one
    /// that finishes the race. Nothing changes when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameAlreadyOver`] once a player has finished and
    /// [`GameError::InvalidRoll`] if the die misbehaves.
    #[instrument(skip(self, die), fields(turn_index = self.turn_index()))]
    pub fn take_turn<D: Die + ?Sized>(&mut self, die: &mut D) -> Result<TurnRecord, GameError> {
        if self.is_over() {
            warn!("Roll attempted after the race ended");
            return Err(GameError::GameAlreadyOver);
        }

        let roll = die.roll();
        if !DIE_FACES.contains(&roll) {
            warn!(roll, "Die produced an impossible value");
            return Err(GameError::InvalidRoll(roll));
        }

        let player_index = self.turn_index();
        let from = self.current_player().position();
        let mut to = from + i32::from(roll);
        let finished = to >= BOARD_SIZE;
        if finished {
            to = BOARD_SIZE;
        }

        self.players_mut()[player_index].set_position(to);
        if finished {
            self.set_over();
        }
        self.set_turn_index((player_index + 1) % self.players().len());

        let record = TurnRecord {
            player_index,
            roll,
            from,
            to,
        };
        self.set_last_turn(record);

        debug_assert!(self.validate().is_ok(), "turn broke an invariant");

        if finished {
            info!(player_index, roll, from, to, "Player reached the finish");
        } else {
            debug!(player_index, roll, from, to, "Player moved");
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::race::START_POSITION;

    #[test]
    fn blank_names_get_seat_numbers() {
        let game = initialize(&["  ", "Grace", ""]).expect("valid setup");
        let names: Vec<_> = game.players().iter().map(Player::name).collect();
        assert_eq!(names, ["Player 1", "Grace", "Player 3"]);
    }

    #[test]
    fn names_are_trimmed() {
        let game = initialize(&[" Ada ", "Grace"]).expect("valid setup");
        assert_eq!(game.players()[0].name(), "Ada");
    }

    #[test]
    fn rejected_roll_leaves_game_untouched() {
        let game = initialize(&["Ada", "Grace"]).expect("valid setup");
        let mut before = game.clone();
        let err = before.take_turn(&mut || 7u8).expect_err("seven is not a face");
        assert_eq!(err, GameError::InvalidRoll(7));
        assert_eq!(before, game);
        assert_eq!(before.players()[0].position(), START_POSITION);
    }

    #[test]
    fn first_roll_from_start_lands_one_short_of_face() {
        let game = initialize(&["Ada", "Grace"]).expect("valid setup");
        let game = advance_turn(&game, &mut || 1u8).expect("legal roll");
        assert_eq!(game.players()[0].position(), 0);
    }

    #[test]
    fn last_turn_is_recorded() {
        let game = initialize(&["Ada", "Grace"]).expect("valid setup");
        let game = advance_turn(&game, &mut || 4u8).expect("legal roll");
        let record = game.last_turn().copied().expect("turn recorded");
        assert_eq!(
            record,
            TurnRecord {
                player_index: 0,
                roll: 4,
                from: -1,
                to: 3
            }
        );
    }

    #[test]
    fn reset_empties_slot() {
        let mut slot = Some(initialize(&["Ada", "Grace"]).expect("valid setup"));
        reset(&mut slot);
        assert_eq!(query(slot.as_ref()), Err(GameError::NoActiveGame));
    }
}
