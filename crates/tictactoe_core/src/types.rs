//! Core domain types for tic-tac-toe.

use crate::error::{BoardError, ParseBoardError, PlacementError};
use crate::lines::winning_lines;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Side length of the classic board.
pub const DEFAULT_SIDE: usize = 3;

/// Largest supported side length.
///
/// Keeps every cell count and line count below the search's win score.
pub const MAX_SIDE: usize = 16;

/// Player in the game, identified by its token.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// N-in-a-row board of `side × side` squares.
///
/// Squares are stored in row-major order. The winning lines are derived
/// from the side length once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawBoard", try_from = "RawBoard")]
pub struct Board {
    side: usize,
    squares: Vec<Square>,
    lines: Vec<Vec<usize>>,
}

/// Serialized form of a [`Board`]; lines are rebuilt on load.
#[derive(Serialize, Deserialize)]
struct RawBoard {
    side: usize,
    squares: Vec<Square>,
}

impl From<Board> for RawBoard {
    fn from(board: Board) -> Self {
        Self {
            side: board.side,
            squares: board.squares,
        }
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        check_side(raw.side)?;
        if raw.squares.len() != raw.side * raw.side {
            return Err(BoardError::SizeMismatch {
                side: raw.side,
                cells: raw.squares.len(),
            });
        }
        Ok(Self {
            side: raw.side,
            squares: raw.squares,
            lines: winning_lines(raw.side),
        })
    }
}

fn check_side(side: usize) -> Result<(), BoardError> {
    if side == 0 {
        return Err(BoardError::InvalidSide(side));
    }
    if side > MAX_SIDE {
        return Err(BoardError::SideTooLarge {
            side,
            max: MAX_SIDE,
        });
    }
    Ok(())
}

impl Board {
    /// Creates a new empty 3×3 board.
    pub fn new() -> Self {
        Self::empty(DEFAULT_SIDE)
    }

    /// Creates a new empty board with the given side length.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSide`] for a side of zero and
    /// [`BoardError::SideTooLarge`] above [`MAX_SIDE`].
    #[instrument]
    pub fn with_side(side: usize) -> Result<Self, BoardError> {
        check_side(side)?;
        Ok(Self::empty(side))
    }

    fn empty(side: usize) -> Self {
        Self {
            side,
            squares: vec![Square::Empty; side * side],
            lines: winning_lines(side),
        }
    }

    /// Side length of the board.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Number of cells on the board.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Returns true if the board has no cells, which a constructed board never does.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if the square at `pos` exists and is empty.
    pub fn is_vacant(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Returns an owned copy of the grid for rendering or evaluation.
    pub fn snapshot(&self) -> Vec<Square> {
        self.squares.clone()
    }

    /// Winning lines for this board size.
    pub fn lines(&self) -> &[Vec<usize>] {
        &self.lines
    }

    /// Empty positions in ascending index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, sq)| **sq == Square::Empty)
            .map(|(pos, _)| pos)
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|sq| **sq != Square::Empty).count()
    }

    /// Number of squares held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|sq| **sq == Square::Occupied(player))
            .count()
    }

    /// Places `player`'s token at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::InvalidPosition`] if `pos` is off the board
    /// and [`PlacementError::CellOccupied`] if the cell already holds a
    /// token. The board is unchanged on error.
    pub fn place(&mut self, player: Player, pos: usize) -> Result<(), PlacementError> {
        let cells = self.squares.len();
        let square = self
            .squares
            .get_mut(pos)
            .ok_or(PlacementError::InvalidPosition {
                position: pos,
                cells,
            })?;
        if *square != Square::Empty {
            return Err(PlacementError::CellOccupied(pos));
        }
        *square = Square::Occupied(player);
        Ok(())
    }

    /// Clears the cell at `pos`. Used only to undo hypothetical moves.
    pub(crate) fn remove(&mut self, pos: usize) {
        if let Some(square) = self.squares.get_mut(pos) {
            *square = Square::Empty;
        }
    }

    /// Returns true iff some winning line is fully occupied by `player`.
    pub fn check_win(&self, player: Player) -> bool {
        crate::rules::has_line(self, player)
    }

    /// Returns the player owning the first completed line, if any.
    pub fn winner(&self) -> Option<Player> {
        crate::rules::check_winner(self)
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        crate::rules::is_full(self)
    }

    /// Returns true iff every cell is occupied.
    ///
    /// Check for a win first: a full board with a completed line is a win.
    pub fn check_draw(&self) -> bool {
        self.is_full()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Formats as the `XX_/OO_/___` notation accepted by [`FromStr`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.squares.chunks(self.side).enumerate() {
            if row > 0 {
                f.write_str("/")?;
            }
            for square in cells {
                let c = match square {
                    Square::Empty => '_',
                    Square::Occupied(Player::X) => 'X',
                    Square::Occupied(Player::O) => 'O',
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<Square>> = s
            .trim_matches(['\n', '\r'])
            .split(['/', '\n'])
            .map(|row| {
                row.trim_end_matches('\r')
                    .chars()
                    .map(|c| match c {
                        'X' | 'x' => Ok(Square::Occupied(Player::X)),
                        'O' | 'o' => Ok(Square::Occupied(Player::O)),
                        '_' | '.' | '-' | ' ' => Ok(Square::Empty),
                        other => Err(ParseBoardError::InvalidCell(other)),
                    })
                    .collect()
            })
            .collect::<Result<_, _>>()?;

        let side = rows.len();
        if rows.iter().all(|row| row.is_empty()) {
            return Err(ParseBoardError::Empty);
        }
        if rows.iter().any(|row| row.len() != side) {
            return Err(ParseBoardError::NotSquare {
                rows: side,
                lengths: rows.iter().map(Vec::len).collect(),
            });
        }

        let mut board = Self::with_side(side)?;
        board.squares = rows.into_iter().flatten().collect();
        Ok(board)
    }
}
