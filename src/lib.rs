//! Tic-tac-toe sessions with a minimax computer opponent.
//!
//! # Architecture
//!
//! - **Core** ([`tictactoe_core`]): board state, rules and minimax search
//! - **Config**: TOML session configuration
//! - **Session**: menu ↔ board state machine with named seats
//! - **Terminal**: a line-oriented front end over any reader and writer
//!
//! # Example
//!
//! ```
//! use tictactoe::{Player, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default().versus_computer(Player::O));
//! session.start().unwrap();
//! session.play_turn(4).unwrap();
//! let (reply, _status) = session.computer_move().unwrap();
//! assert_ne!(reply, 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod session;
pub mod terminal;

pub use tictactoe_core::{Board, Game, GameStatus, Move, MoveError, Player, Square};

pub use config::{ConfigError, GameMode, SessionConfig};
pub use session::{Contestant, ContestantKind, Screen, Session, SessionError, COMPUTER_NAME};
