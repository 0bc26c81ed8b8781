//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand};
use tictactoe::Player;

/// Tic-tac-toe with a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play on the terminal
    Play {
        /// Path to a session config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Board side length (overrides config)
        #[arg(long)]
        side: Option<usize>,

        /// Token the computer plays; omit for two players
        #[arg(long)]
        computer: Option<Player>,

        /// Search depth limit (overrides config)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Keep offering new rounds until input ends
        #[arg(long)]
        repeat: bool,
    },

    /// Let the engine play both sides
    SelfPlay {
        /// Board side length
        #[arg(long, default_value = "3")]
        side: usize,

        /// Search depth limit
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print the move transcript as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the engine's move for a position
    BestMove {
        /// Board in row notation, e.g. "XX_/OO_/___"
        board: String,

        /// Token to move
        #[arg(long, default_value = "X")]
        token: Player,

        /// Search depth limit
        #[arg(long)]
        max_depth: Option<usize>,
    },
}
