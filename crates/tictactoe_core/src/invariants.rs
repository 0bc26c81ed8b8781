//! First-class invariants for a game in progress.
//!
//! Invariants are logical properties that must hold after every move.
//! The game checks them in debug builds; tests check them directly.

use crate::game::Game;
use crate::types::{Board, Player};
use strum::IntoEnumIterator;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: at most one player owns a completed line.
pub struct SingleWinner;

impl Invariant<Board> for SingleWinner {
    fn holds(board: &Board) -> bool {
        let winners = Player::iter().filter(|p| board.check_win(*p)).count();
        if winners > 1 {
            warn!(board = %board, "Both players own a completed line");
        }
        winners <= 1
    }

    fn description() -> &'static str {
        "At most one player has a completed line"
    }
}

impl Invariant<Game> for SingleWinner {
    fn holds(game: &Game) -> bool {
        <Self as Invariant<Board>>::holds(game.board())
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}

/// Invariant: the first player has placed as many tokens as the second,
/// or exactly one more.
pub struct BalancedTokens;

impl Invariant<Game> for BalancedTokens {
    fn holds(game: &Game) -> bool {
        let first = game.board().count(game.first_player());
        let second = game.board().count(game.first_player().opponent());
        let valid = first == second || first == second + 1;
        if !valid {
            warn!(first, second, "Token counts out of balance");
        }
        valid
    }

    fn description() -> &'static str {
        "Players alternate, so token counts differ by at most one"
    }
}

/// Invariant: replaying the history onto an empty board reproduces the board.
pub struct HistoryConsistent;

impl Invariant<Game> for HistoryConsistent {
    fn holds(game: &Game) -> bool {
        let Ok(mut replayed) = Board::with_side(game.board().side()) else {
            return false;
        };
        let replays = game
            .history()
            .iter()
            .all(|mv| replayed.place(mv.player, mv.position).is_ok());
        let valid = replays && replayed == *game.board();
        if !valid {
            warn!(moves = game.history().len(), "History does not match board");
        }
        valid
    }

    fn description() -> &'static str {
        "Board equals the replayed move history"
    }
}

/// Every invariant the game state machine maintains.
pub type GameInvariants = (SingleWinner, BalancedTokens, HistoryConsistent);
