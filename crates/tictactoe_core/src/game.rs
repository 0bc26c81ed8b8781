//! Game state machine for tic-tac-toe.
//!
//! A [`Game`] owns its board outright. Placements move the game through
//! `InProgress → InProgress | Won(player) | Draw`; `Won` and `Draw` are
//! terminal and reject further placements.

use crate::action::Move;
use crate::error::{BoardError, MoveError};
#[cfg(debug_assertions)]
use crate::invariants::{GameInvariants, InvariantSet};
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true for `Won` and `Draw`.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(*player),
            _ => None,
        }
    }
}

/// A single game: board, side to move, status and move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    first_player: Player,
    to_move: Player,
    status: GameStatus,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new 3×3 game with X to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::X)
    }

    /// Creates a new game on a `side × side` board with X to move.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] for a side of zero or above [`MAX_SIDE`](crate::MAX_SIDE).
    pub fn with_side(side: usize) -> Result<Self, BoardError> {
        Self::starting_with(side, Player::X)
    }

    /// Creates a new game on a `side × side` board with `first` to move.
    #[instrument]
    pub fn starting_with(side: usize, first: Player) -> Result<Self, BoardError> {
        Ok(Self::from_board(Board::with_side(side)?, first))
    }

    fn from_board(board: Board, first: Player) -> Self {
        Self {
            board,
            first_player: first,
            to_move: first,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player who moved first.
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns empty positions in ascending order, or none once the game is over.
    pub fn valid_moves(&self) -> Vec<usize> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.board.empty_positions().collect()
    }

    /// Places the current player's token at `pos` and advances the game.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] once the game has been won or drawn.
    /// - [`MoveError::Placement`] for an out-of-range or occupied cell.
    /// - [`MoveError::InvariantViolation`] in debug builds if the move
    ///   would break a game invariant.
    ///
    /// The game is unchanged on every error.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn place(&mut self, pos: usize) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        #[cfg(debug_assertions)]
        {
            let mut next = self.clone();
            next.advance(pos)?;
            GameInvariants::check_all(&next).map_err(|violations| {
                let descriptions = violations
                    .iter()
                    .map(|v| v.description.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                MoveError::InvariantViolation(descriptions)
            })?;
            *self = next;
        }
        #[cfg(not(debug_assertions))]
        self.advance(pos)?;

        match self.status {
            GameStatus::InProgress => debug!(position = pos, "Move applied"),
            status => info!(position = pos, ?status, "Game finished"),
        }
        Ok(self.status)
    }

    fn advance(&mut self, pos: usize) -> Result<(), MoveError> {
        let player = self.to_move;
        self.board.place(player, pos)?;
        self.history.push(Move::new(player, pos));

        self.status = if self.board.check_win(player) {
            GameStatus::Won(player)
        } else if self.board.check_draw() {
            GameStatus::Draw
        } else {
            self.to_move = player.opponent();
            GameStatus::InProgress
        };
        Ok(())
    }

    /// Applies `action`, checking that it is that player's turn.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::WrongPlayer`] if `action.player` is not to move,
    /// otherwise the errors of [`Game::place`].
    pub fn play(&mut self, action: Move) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if action.player != self.to_move {
            return Err(MoveError::WrongPlayer(action.player));
        }
        self.place(action.position)
    }

    /// Rebuilds a game on a `side × side` board from a move transcript.
    ///
    /// The first move decides who started.
    ///
    /// # Errors
    ///
    /// Returns the first [`MoveError`] encountered.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(side: usize, moves: &[Move]) -> Result<Self, MoveError> {
        let first = moves.first().map_or(Player::X, |mv| mv.player);
        let mut game = Self::starting_with(side, first)?;
        for action in moves {
            game.play(*action)?;
        }
        Ok(game)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlacementError;

    #[test]
    fn test_alternating_players() {
        let mut game = Game::new();
        assert_eq!(game.to_move(), Player::X);
        game.place(4).unwrap();
        assert_eq!(game.to_move(), Player::O);
    }

    #[test]
    fn test_occupied_square_rejected() {
        let mut game = Game::new();
        game.place(4).unwrap();
        let before = game.clone();

        let result = game.place(4);
        assert_eq!(
            result,
            Err(MoveError::Placement(PlacementError::CellOccupied(4)))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_win_is_terminal() {
        let mut game = Game::new();
        for pos in [0, 3, 1, 4] {
            assert_eq!(game.place(pos).unwrap(), GameStatus::InProgress);
        }
        assert_eq!(game.place(2).unwrap(), GameStatus::Won(Player::X));
        assert_eq!(game.place(8), Err(MoveError::GameOver));
        assert!(game.valid_moves().is_empty());
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut game = Game::new();
        let result = game.play(Move::new(Player::O, 4));
        assert_eq!(result, Err(MoveError::WrongPlayer(Player::O)));
    }

    #[test]
    fn test_o_can_start() {
        let mut game = Game::starting_with(3, Player::O).unwrap();
        game.place(0).unwrap();
        assert_eq!(game.board().count(Player::O), 1);
        assert_eq!(game.to_move(), Player::X);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_invariant_violation_leaves_game_unchanged() {
        let mut game = Game::new();
        // A token the history knows nothing about.
        game.board.place(Player::X, 0).unwrap();
        let before = game.clone();

        let result = game.place(4);
        assert!(matches!(result, Err(MoveError::InvariantViolation(_))));
        assert_eq!(game, before);
        assert!(game.board().is_vacant(4));
        assert!(game.history().is_empty());
    }
}
