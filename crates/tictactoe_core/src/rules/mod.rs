//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating board state. Rules are separated from
//! board storage so the game state machine, the invariants and the search
//! all share one definition of a win and a draw.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, has_line, open_lines};
