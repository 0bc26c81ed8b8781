//! Pure tic-tac-toe game logic.
//!
//! - [`Board`]: an N-in-a-row grid with placement, win and draw queries
//! - [`Game`]: the `InProgress → Won | Draw` state machine over a board
//! - [`Minimax`]: move selection for a computer opponent
//!
//! Nothing here performs I/O. Each game owns its board, and the search
//! borrows a board immutably and explores a private copy.
//!
//! ```
//! use tictactoe_core::{select_move, Board, Player};
//!
//! let board: Board = "XX_/OO_/___".parse().unwrap();
//! assert_eq!(select_move(&board, Player::X, Player::O, None), Some(2));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod error;
mod game;
pub mod invariants;
mod lines;
pub mod rules;
mod search;
mod types;

pub use action::Move;
pub use error::{BoardError, MoveError, ParseBoardError, PlacementError};
pub use game::{Game, GameStatus};
pub use lines::winning_lines;
pub use search::{
    default_depth, select_move, Minimax, SearchConfig, SearchOutcome, NODE_BUDGET, WIN_SCORE,
};
pub use types::{Board, Player, Square, DEFAULT_SIDE, MAX_SIDE};
