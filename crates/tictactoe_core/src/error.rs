//! Error types for board construction and token placement.

use crate::types::Player;
use derive_more::{Display, Error, From};

/// Error that can occur when placing a token on the board.
///
/// Both kinds are recoverable: the caller re-prompts or ignores the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlacementError {
    /// The position is outside the board.
    #[display("Position {} is out of range (board has {} cells)", position, cells)]
    InvalidPosition {
        /// Requested position.
        position: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// The cell already holds a token.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] usize),
}

/// Error that can occur when constructing a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// A board needs at least one cell per side.
    #[display("Board side must be at least 1, got {}", _0)]
    InvalidSide(#[error(not(source))] usize),

    /// The side exceeds the largest supported board.
    #[display("Board side {} exceeds the maximum of {}", side, max)]
    SideTooLarge {
        /// Requested side length.
        side: usize,
        /// Largest supported side length.
        max: usize,
    },

    /// Serialized squares do not fill a `side × side` grid.
    #[display("Board of side {} cannot hold {} cells", side, cells)]
    SizeMismatch {
        /// Declared side length.
        side: usize,
        /// Number of squares supplied.
        cells: usize,
    },
}

/// Error returned when parsing the `XX_/OO_/___` board notation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum ParseBoardError {
    /// A cell character is not a token or an empty marker.
    #[display("Unexpected cell character {:?}", _0)]
    InvalidCell(#[error(not(source))] char),

    /// Rows differ in length, or the row count differs from the row length.
    #[display("Board is not square: {} rows of lengths {:?}", rows, lengths)]
    NotSquare {
        /// Number of rows found.
        rows: usize,
        /// Length of each row.
        lengths: Vec<usize>,
    },

    /// The notation contained no cells.
    #[display("Board notation is empty")]
    Empty,

    /// The parsed grid has an unsupported side length.
    #[display("{}", _0)]
    #[from]
    Board(BoardError),
}

/// Error that can occur when making a move in a game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum MoveError {
    /// The game already ended in a win or draw.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(#[error(not(source))] Player),

    /// The board rejected the placement.
    #[display("{}", _0)]
    #[from]
    Placement(PlacementError),

    /// The board could not be built.
    #[display("{}", _0)]
    #[from]
    Board(BoardError),

    /// An invariant was violated after the move (debug builds only).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}
