//! Tictactoe - unified CLI

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io;
use tictactoe::{Board, Player};
use tictactoe::{terminal, Session, SessionConfig};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            side,
            computer,
            max_depth,
            repeat,
        } => run_play(config, side, computer, max_depth, repeat),
        Command::SelfPlay {
            side,
            max_depth,
            json,
        } => run_self_play(side, max_depth, json),
        Command::BestMove {
            board,
            token,
            max_depth,
        } => run_best_move(&board, token, max_depth),
    }
}

/// Run interactive rounds on stdin/stdout
#[instrument(skip(config_path))]
fn run_play(
    config_path: Option<std::path::PathBuf>,
    side: Option<usize>,
    computer: Option<Player>,
    max_depth: Option<usize>,
    repeat: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => SessionConfig::from_file(&path)?,
        None => SessionConfig::default(),
    };
    if let Some(side) = side {
        config = config.with_side(side);
    }
    if let Some(token) = computer {
        config = config.versus_computer(token);
    }
    if max_depth.is_some() {
        config = config.with_max_depth(max_depth);
    }
    config.validate()?;

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let finished = terminal::run_round(&mut session, stdin.lock(), &mut stdout)?;
        if !repeat || finished.is_none() {
            break;
        }
        info!("Starting another round");
    }
    Ok(())
}

/// Run the engine against itself
fn run_self_play(side: usize, max_depth: Option<usize>, json: bool) -> Result<()> {
    let game = terminal::self_play(side, max_depth)?;

    if json {
        println!("{}", serde_json::to_string_pretty(game.history())?);
    } else {
        println!("{}\n", terminal::render(game.board()));
        println!("{}", terminal::describe(game.status()));
    }
    Ok(())
}

/// Print the engine's choice for a position
fn run_best_move(notation: &str, token: Player, max_depth: Option<usize>) -> Result<()> {
    let board: Board = notation
        .parse()
        .with_context(|| format!("Invalid board {notation:?}"))?;

    match terminal::best_move(&board, token, max_depth) {
        Some(cell) => println!("{cell}"),
        None => println!("No move available"),
    }
    Ok(())
}
