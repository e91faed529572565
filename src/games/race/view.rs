//! Read-only projection of a race for the UI layer.

use super::phases::GamePhase;
use super::types::{BOARD_SIZE, CharacterToken, Game, Player, TurnRecord};
use serde::{Deserialize, Serialize};

/// A player as the board shows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Seat number (0-based).
    pub index: usize,
    /// Display name.
    pub name: String,
    /// Square the token is on (-1 before the first roll).
    pub position: i32,
    /// Character token.
    pub token: CharacterToken,
    /// Image asset for the token.
    pub image: String,
}

impl PlayerView {
    fn new(index: usize, player: &Player) -> Self {
        Self {
            index,
            name: player.name().to_string(),
            position: player.position(),
            token: player.token(),
            image: player.token().image().to_string(),
        }
    }
}

/// Everything needed to draw the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    /// Length of the track.
    pub board_size: i32,
    /// Lifecycle phase.
    pub phase: GamePhase,
    /// All players in seat order.
    pub players: Vec<PlayerView>,
    /// Seat whose turn it is. Still advances on the finishing roll.
    pub turn_index: usize,
    /// Player to roll next; absent once the race is over.
    pub current_player: Option<PlayerView>,
    /// Whether a player has finished.
    pub is_over: bool,
    /// Player who finished first.
    pub winner: Option<PlayerView>,
    /// Most recent move.
    pub last_turn: Option<TurnRecord>,
}

impl From<&Game> for BoardView {
    fn from(game: &Game) -> Self {
        let players: Vec<_> = game
            .players()
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerView::new(index, player))
            .collect();

        let current_player = if game.is_over() {
            None
        } else {
            players.get(game.turn_index()).cloned()
        };
        let winner = players.iter().find(|p| p.position == BOARD_SIZE).cloned();

        Self {
            board_size: BOARD_SIZE,
            phase: game.phase(),
            players,
            turn_index: game.turn_index(),
            current_player,
            is_over: game.is_over(),
            winner,
            last_turn: game.last_turn().copied(),
        }
    }
}

impl BoardView {
    /// Renders the track as one line per player, for logs and the terminal.
    pub fn render_text(&self) -> String {
        let width = usize::try_from(BOARD_SIZE).unwrap_or_default() + 1;
        self.players
            .iter()
            .map(|p| {
                let mut track = vec!['.'; width];
                if let Ok(square) = usize::try_from(p.position)
                    && let Some(cell) = track.get_mut(square)
                {
                    *cell = match p.token {
                        CharacterToken::Alien => 'A',
                        CharacterToken::Astronaut => 'B',
                    };
                }
                let marker = if Some(p.index) == self.current_player.as_ref().map(|c| c.index) {
                    '>'
                } else {
                    ' '
                };
                format!("{marker} {:<12} |{}|", p.name, track.into_iter().collect::<String>())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
