//! Line-oriented terminal front end.
//!
//! Reads 1-based cell numbers from any `BufRead` and writes the board to
//! any `Write`, so the loop runs the same against stdin or a test buffer.

use crate::session::{Screen, Session, SessionError};
use anyhow::Result;
use std::io::{BufRead, Write};
use tictactoe_core::{Board, Game, GameStatus, Minimax, Move, Player, SearchConfig, Square};
use tracing::{debug, info, instrument};

/// Renders the board as a grid, numbering empty cells from 1.
pub fn render(board: &Board) -> String {
    let side = board.side();
    let width = board.len().to_string().len();
    let separator = vec!["-".repeat(width); side].join("+");

    let rows: Vec<String> = board
        .squares()
        .chunks(side)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, square)| match square {
                    Square::Empty => format!("{:>width$}", row * side + col + 1),
                    Square::Occupied(player) => format!("{:>width$}", player.to_string()),
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();

    rows.join(&format!("\n{separator}\n"))
}

/// Plays one round of `session` on the terminal.
///
/// Returns once the game ends or input runs out. Unparseable or illegal
/// input is reported and re-prompted.
#[instrument(skip_all)]
pub fn run_round<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut output: W,
) -> Result<Option<String>> {
    if matches!(session.screen(), Screen::Menu { .. }) {
        session.start()?;
    }

    loop {
        if let Screen::Menu { last_outcome } = session.screen() {
            let message = last_outcome.clone().unwrap_or_default();
            if let Some(game) = session.game() {
                writeln!(output, "{}\n", render(game.board()))?;
            }
            writeln!(output, "{message}")?;
            return Ok(Some(message));
        }

        if session.computer_to_move() {
            let (position, _) = session.computer_move()?;
            writeln!(output, "Computer plays {}", position + 1)?;
            continue;
        }

        let Some(seat) = session.current() else {
            return Ok(None);
        };
        let prompt = format!("{} ({}), choose a cell:", seat.name(), seat.token());
        if let Some(game) = session.game() {
            writeln!(output, "{}\n", render(game.board()))?;
        }
        writeln!(output, "{prompt}")?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            info!("Input closed mid-game");
            return Ok(None);
        }

        let Ok(cell) = line.trim().parse::<usize>() else {
            writeln!(output, "Enter a cell number")?;
            continue;
        };
        let Some(position) = cell.checked_sub(1) else {
            writeln!(output, "Cells are numbered from 1")?;
            continue;
        };

        match session.play_turn(position) {
            Ok(status) => debug!(position, ?status, "Turn played"),
            Err(e @ SessionError::Move(_)) => writeln!(output, "{e}")?,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Plays the engine against itself and returns the finished game.
#[instrument]
pub fn self_play(side: usize, max_depth: Option<usize>) -> Result<Game> {
    let cells = side.saturating_mul(side);
    let engine = Minimax::new(SearchConfig::for_open_cells(cells, max_depth));
    let mut game = Game::with_side(side)?;

    while !game.status().is_over() {
        let token = game.to_move();
        let position = engine
            .select_move(game.board(), token, token.opponent())
            .ok_or_else(|| anyhow::anyhow!("No move available on {}", game.board()))?;
        game.play(Move::new(token, position))?;
    }

    info!(status = ?game.status(), moves = game.history().len(), "Self-play finished");
    Ok(game)
}

/// Describes a finished game's status in words.
pub fn describe(status: GameStatus) -> String {
    match status {
        GameStatus::Won(player) => format!("{player} wins"),
        GameStatus::Draw => "Draw".to_string(),
        GameStatus::InProgress => "In progress".to_string(),
    }
}

/// Picks the best move for `token` on `board`, 1-based for display.
///
/// Without `max_depth`, large boards get a cutoff from the number of open cells.
pub fn best_move(board: &Board, token: Player, max_depth: Option<usize>) -> Option<usize> {
    let open = board.empty_positions().count();
    Minimax::new(SearchConfig::for_open_cells(open, max_depth))
        .select_move(board, token, token.opponent())
        .map(|pos| pos + 1)
}
