//! Session configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_core::{Player, DEFAULT_SIDE, MAX_SIDE};
use tracing::{debug, info, instrument};

/// Who controls the second seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Two humans alternate on one board.
    #[default]
    TwoPlayers,
    /// One human against the minimax engine.
    VersusComputer,
}

/// Configuration for a game session.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board side length.
    side: usize,

    /// Two players or versus computer.
    mode: GameMode,

    /// Display name for the X seat.
    player_x_name: String,

    /// Display name for the O seat.
    player_o_name: String,

    /// Token the computer plays in versus-computer mode.
    computer_plays: Player,

    /// Search depth limit; unbounded when absent.
    max_depth: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            side: DEFAULT_SIDE,
            mode: GameMode::default(),
            player_x_name: "Player 1".to_string(),
            player_o_name: "Player 2".to_string(),
            computer_plays: Player::O,
            max_depth: None,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(side = config.side, mode = ?config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Checks values the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.side == 0 {
            return Err(ConfigError::new("side must be at least 1".to_string()));
        }
        if self.side > MAX_SIDE {
            return Err(ConfigError::new(format!(
                "side must be at most {}, got {}",
                MAX_SIDE, self.side
            )));
        }
        Ok(())
    }

    /// Sets the board side.
    pub fn with_side(mut self, side: usize) -> Self {
        self.side = side;
        self
    }

    /// Switches to versus-computer mode with the computer on `token`.
    pub fn versus_computer(mut self, token: Player) -> Self {
        self.mode = GameMode::VersusComputer;
        self.computer_plays = token;
        self
    }

    /// Sets the search depth limit.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the display name configured for `token`'s seat.
    pub fn name_for(&self, token: Player) -> &str {
        match token {
            Player::X => &self.player_x_name,
            Player::O => &self.player_o_name,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
