//! Game session: the menu ↔ board state machine around a single game.
//!
//! A session starts on the menu. [`Session::start`] opens the board with a
//! fresh game; when that game is won or drawn the session returns to the
//! menu carrying the outcome message, and `start` again plays another
//! round. Sessions share nothing, so any number can run side by side.

use crate::config::{GameMode, SessionConfig};
use derive_getters::Getters;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tictactoe_core::{BoardError, Game, GameStatus, Minimax, MoveError, Player, SearchConfig};
use tracing::{debug, info, instrument, warn};

/// Name given to the engine's seat.
pub const COMPUTER_NAME: &str = "Computer";

/// Who controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestantKind {
    /// Moves come from the presentation layer.
    Human,
    /// Moves come from the minimax engine.
    Computer,
}

/// A named seat bound to a token.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct Contestant {
    /// Display name.
    name: String,
    /// Token this seat plays.
    token: Player,
    /// Human or computer.
    kind: ContestantKind,
}

/// Which screen the session is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Waiting to start a round; carries the previous round's result.
    Menu {
        /// "X wins!" style message from the last finished game.
        last_outcome: Option<String>,
    },
    /// A game is being played.
    Board,
}

/// Errors from driving a session.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// A move was sent while the menu is showing.
    #[display("No game in progress")]
    NotPlaying,

    /// `start` was called while a game is in progress.
    #[display("A game is already in progress")]
    AlreadyPlaying,

    /// A human move was sent while the computer is to move.
    #[display("It's the computer's turn")]
    ComputerToMove,

    /// A computer move was requested while a human is to move.
    #[display("It's {}'s turn", _0)]
    HumanToMove(#[error(not(source))] String),

    /// The engine found no empty cell.
    #[display("No move available")]
    NoMoveAvailable,

    /// The game rejected the move.
    #[display("{}", _0)]
    #[from]
    Move(MoveError),

    /// The configured board could not be built.
    #[display("{}", _0)]
    #[from]
    Board(BoardError),
}

/// A single player-facing session.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    player_x: Contestant,
    player_o: Contestant,
    engine: Minimax,
    screen: Screen,
    game: Option<Game>,
}

impl Session {
    /// Creates a session on the menu screen.
    #[instrument(skip(config), fields(mode = ?config.mode(), side = config.side()))]
    pub fn new(config: SessionConfig) -> Self {
        let seat = |token: Player| {
            let computer = *config.mode() == GameMode::VersusComputer
                && *config.computer_plays() == token;
            if computer {
                Contestant::new(COMPUTER_NAME.to_string(), token, ContestantKind::Computer)
            } else {
                Contestant::new(config.name_for(token).to_string(), token, ContestantKind::Human)
            }
        };
        let player_x = seat(Player::X);
        let player_o = seat(Player::O);
        let cells = config.side().saturating_mul(*config.side());
        let engine = Minimax::new(SearchConfig::for_open_cells(cells, *config.max_depth()));

        info!(x = %player_x.name, o = %player_o.name, "Creating new session");
        Self {
            config,
            player_x,
            player_o,
            engine,
            screen: Screen::Menu { last_outcome: None },
            game: None,
        }
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the current screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Returns the current or most recently finished game.
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Returns the seat playing `token`.
    pub fn contestant(&self, token: Player) -> &Contestant {
        match token {
            Player::X => &self.player_x,
            Player::O => &self.player_o,
        }
    }

    /// Returns the seat to move, if a game is in progress.
    pub fn current(&self) -> Option<&Contestant> {
        match (&self.screen, &self.game) {
            (Screen::Board, Some(game)) => Some(self.contestant(game.to_move())),
            _ => None,
        }
    }

    /// Returns true if a game is in progress and the computer is to move.
    pub fn computer_to_move(&self) -> bool {
        self.current()
            .is_some_and(|seat| seat.kind == ContestantKind::Computer)
    }

    /// Leaves the menu and starts a fresh game ("Play again" does the same).
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<&Game, SessionError> {
        if self.screen == Screen::Board {
            warn!("Start requested during a game");
            return Err(SessionError::AlreadyPlaying);
        }
        let game = Game::with_side(*self.config.side())?;
        self.screen = Screen::Board;
        info!("Game started");
        Ok(self.game.insert(game))
    }

    /// Applies a human move at `position`.
    #[instrument(skip(self))]
    pub fn play_turn(&mut self, position: usize) -> Result<GameStatus, SessionError> {
        if self.computer_to_move() {
            return Err(SessionError::ComputerToMove);
        }
        self.apply(position)
    }

    /// Lets the engine pick and apply a move. Returns the chosen position
    /// and the resulting status.
    #[instrument(skip(self))]
    pub fn computer_move(&mut self) -> Result<(usize, GameStatus), SessionError> {
        let seat = self.current().ok_or(SessionError::NotPlaying)?;
        if seat.kind != ContestantKind::Computer {
            return Err(SessionError::HumanToMove(seat.name.clone()));
        }
        let token = seat.token;

        let game = self.game.as_ref().ok_or(SessionError::NotPlaying)?;
        let position = self
            .engine
            .select_move(game.board(), token, token.opponent())
            .ok_or(SessionError::NoMoveAvailable)?;
        debug!(position, "Computer chose move");

        let status = self.apply(position)?;
        Ok((position, status))
    }

    fn apply(&mut self, position: usize) -> Result<GameStatus, SessionError> {
        if self.screen != Screen::Board {
            return Err(SessionError::NotPlaying);
        }
        let game = self.game.as_mut().ok_or(SessionError::NotPlaying)?;
        let status = game.place(position).inspect_err(|e| {
            warn!(position, error = %e, "Invalid move");
        })?;

        if status.is_over() {
            let message = self.outcome_message(status);
            info!(%message, "Returning to menu");
            self.screen = Screen::Menu {
                last_outcome: Some(message),
            };
        }
        Ok(status)
    }

    /// Formats a finished game's result for the menu.
    pub fn outcome_message(&self, status: GameStatus) -> String {
        match status {
            GameStatus::Won(token) => format!("{} wins!", self.contestant(token).name),
            GameStatus::Draw => "Draw!".to_string(),
            GameStatus::InProgress => String::new(),
        }
    }
}
