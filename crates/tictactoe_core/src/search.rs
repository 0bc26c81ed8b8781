//! Minimax move selection for the computer opponent.
//!
//! The engine never touches the caller's board: each call clones a scratch
//! board once and explores it with place/undo backtracking. Every
//! hypothetical placement is wrapped in a [`Hypothetical`] guard whose
//! `Drop` clears the cell, so the scratch board is restored on every exit
//! path, unwinding included.

use crate::rules::open_lines;
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument, trace};

/// Score of a terminal win for the searching side, before depth discounting.
///
/// Exceeds the cell count plus the line count of a
/// [`MAX_SIDE`](crate::MAX_SIDE) board, so a discounted win stays positive
/// and outranks the cutoff heuristic.
pub const WIN_SCORE: i32 = 1_000;

/// Leaf positions a default-depth search may expand from the root.
pub const NODE_BUDGET: u64 = 500_000;

/// Deepest cutoff whose full expansion over `open` empty cells stays within
/// [`NODE_BUDGET`], or `None` when the whole tree fits.
pub fn default_depth(open: usize) -> Option<usize> {
    let mut leaves: u64 = 1;
    for depth in 0..open {
        leaves = leaves.saturating_mul((open - depth) as u64);
        if leaves > NODE_BUDGET {
            return Some(depth.max(1));
        }
    }
    None
}

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum plies to explore before falling back to the heuristic.
    /// `None` searches to terminal positions.
    pub max_depth: Option<usize>,
    /// Subtract the ply count from terminal scores so quicker wins and
    /// slower losses are preferred.
    pub depth_discount: bool,
}

impl SearchConfig {
    /// Unbounded search with depth discounting.
    pub fn unbounded() -> Self {
        Self {
            max_depth: None,
            depth_discount: true,
        }
    }

    /// Search over `open` empty cells, using `max_depth` when given and
    /// [`default_depth`] otherwise.
    pub fn for_open_cells(open: usize, max_depth: Option<usize>) -> Self {
        Self {
            max_depth: max_depth.or_else(|| default_depth(open)),
            depth_discount: true,
        }
    }

    /// Depth-limited search with depth discounting.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            depth_discount: true,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Result of a search from one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Best position for the searching side, `None` if no cell is empty.
    pub position: Option<usize>,
    /// Minimax score of `position` from the searching side's view.
    pub score: i32,
    /// Number of positions evaluated.
    pub nodes: u64,
}

/// Minimax search engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minimax {
    config: SearchConfig,
}

impl Minimax {
    /// Creates an engine with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the best empty cell for `searching`, or `None` on a full board.
    ///
    /// Ties go to the lowest index.
    pub fn select_move(
        &self,
        board: &Board,
        searching: Player,
        opponent: Player,
    ) -> Option<usize> {
        self.search(board, searching, opponent).position
    }

    /// Runs a full search and reports the chosen move, its score and the
    /// number of nodes visited.
    #[instrument(skip(self, board), fields(board = %board, max_depth = ?self.config.max_depth))]
    pub fn search(&self, board: &Board, searching: Player, opponent: Player) -> SearchOutcome {
        let mut scratch = board.clone();
        let mut ctx = Context {
            searching,
            opponent,
            config: self.config,
            nodes: 0,
        };

        let mut best: Option<(usize, i32)> = None;
        let candidates: Vec<usize> = scratch.empty_positions().collect();
        for pos in candidates {
            let Some(mut next) = Hypothetical::place(&mut scratch, searching, pos) else {
                continue;
            };
            let score = ctx.minimax(&mut next, 1, false);
            trace!(position = pos, score, "Scored candidate");

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        let outcome = SearchOutcome {
            position: best.map(|(pos, _)| pos),
            score: best.map_or(0, |(_, score)| score),
            nodes: ctx.nodes,
        };
        debug!(
            position = ?outcome.position,
            score = outcome.score,
            nodes = outcome.nodes,
            "Search complete"
        );
        outcome
    }
}

/// Selects a move with a one-off engine.
///
/// `max_depth` of `None` searches to terminal positions.
pub fn select_move(
    board: &Board,
    searching: Player,
    opponent: Player,
    max_depth: Option<usize>,
) -> Option<usize> {
    let config = SearchConfig {
        max_depth,
        ..SearchConfig::default()
    };
    Minimax::new(config).select_move(board, searching, opponent)
}

/// Per-call search state.
struct Context {
    searching: Player,
    opponent: Player,
    config: SearchConfig,
    nodes: u64,
}

impl Context {
    /// Scores `board` with `depth` plies already placed below the root.
    ///
    /// `maximizing` is true when the searching side is to move.
    fn minimax(&mut self, board: &mut Board, depth: usize, maximizing: bool) -> i32 {
        self.nodes += 1;

        if board.check_win(self.searching) {
            return WIN_SCORE - self.discount(depth);
        }
        if board.check_win(self.opponent) {
            return -WIN_SCORE + self.discount(depth);
        }
        if board.is_full() {
            return 0;
        }
        if self.config.max_depth.is_some_and(|max| depth >= max) {
            return self.heuristic(board);
        }

        let (to_move, mut best) = if maximizing {
            (self.searching, i32::MIN)
        } else {
            (self.opponent, i32::MAX)
        };

        let candidates: Vec<usize> = board.empty_positions().collect();
        for pos in candidates {
            let Some(mut next) = Hypothetical::place(board, to_move, pos) else {
                continue;
            };
            let score = self.minimax(&mut next, depth + 1, !maximizing);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }

    fn discount(&self, depth: usize) -> i32 {
        if self.config.depth_discount {
            i32::try_from(depth).unwrap_or(WIN_SCORE)
        } else {
            0
        }
    }

    /// Estimate for non-terminal positions at the depth cutoff.
    fn heuristic(&self, board: &Board) -> i32 {
        let ours = open_lines(board, self.searching) as i32;
        let theirs = open_lines(board, self.opponent) as i32;
        ours - theirs
    }
}

/// A token placed for exploration, cleared again on drop.
struct Hypothetical<'a> {
    board: &'a mut Board,
    pos: usize,
}

impl<'a> Hypothetical<'a> {
    /// Places `player` at `pos`, or returns `None` if the cell is taken.
    fn place(board: &'a mut Board, player: Player, pos: usize) -> Option<Self> {
        board.place(player, pos).ok()?;
        Some(Self { board, pos })
    }
}

impl Deref for Hypothetical<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Hypothetical<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Hypothetical<'_> {
    fn drop(&mut self) {
        self.board.remove(self.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_SIDE;

    fn board(notation: &str) -> Board {
        notation.parse().unwrap()
    }

    #[test]
    fn test_full_board_has_no_move() {
        let outcome = Minimax::default().search(&board("XOX/OXO/OXO"), Player::X, Player::O);
        assert_eq!(outcome.position, None);
        assert_eq!(outcome.nodes, 0);
    }

    #[test]
    fn test_takes_immediate_win() {
        let outcome = Minimax::default().search(&board("XX_/OO_/___"), Player::X, Player::O);
        assert_eq!(outcome.position, Some(2));
        assert_eq!(outcome.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_blocks_immediate_loss() {
        // O threatens the middle row; X has no win of its own.
        let pos = select_move(&board("X__/OO_/__X"), Player::X, Player::O, None);
        assert_eq!(pos, Some(5));
    }

    #[test]
    fn test_discount_prefers_quicker_win() {
        // X can fork with 2 or 3 and win two plies later, or win at once on 8.
        let outcome = Minimax::default().search(&board("XO_/_XO/___"), Player::X, Player::O);
        assert_eq!(outcome.position, Some(8));
        assert_eq!(outcome.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_without_discount_all_wins_tie() {
        let config = SearchConfig {
            max_depth: None,
            depth_discount: false,
        };
        let outcome = Minimax::new(config).search(&board("XO_/_XO/___"), Player::X, Player::O);
        assert_eq!(outcome.score, WIN_SCORE);
        assert_eq!(outcome.position, Some(2));
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let original = board("X__/_O_/___");
        let copy = original.clone();
        let _ = Minimax::default().search(&original, Player::X, Player::O);
        assert_eq!(original, copy);
    }

    #[test]
    fn test_win_score_dominates_largest_board() {
        let cells = MAX_SIDE * MAX_SIDE;
        let lines = 2 * MAX_SIDE + 2;
        assert!(WIN_SCORE as usize > cells + lines);
    }

    #[test]
    fn test_default_depth_scales_with_open_cells() {
        assert_eq!(default_depth(9), None);
        assert_eq!(default_depth(16), Some(4));
        assert_eq!(default_depth(MAX_SIDE * MAX_SIDE), Some(2));
        assert_eq!(default_depth(0), None);
    }

    #[test]
    fn test_explicit_depth_overrides_default() {
        assert_eq!(SearchConfig::for_open_cells(16, Some(7)).max_depth, Some(7));
        assert_eq!(SearchConfig::for_open_cells(16, None).max_depth, Some(4));
        assert_eq!(SearchConfig::for_open_cells(9, None), SearchConfig::unbounded());
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let mut scratch = Board::new();
        {
            let next = Hypothetical::place(&mut scratch, Player::O, 7).unwrap();
            assert!(!next.is_vacant(7));
        }
        assert_eq!(scratch, Board::new());
    }

    #[test]
    fn test_guard_refuses_occupied_cell() {
        let mut scratch = board("X__/___/___");
        assert!(Hypothetical::place(&mut scratch, Player::O, 0).is_none());
        assert_eq!(scratch, board("X__/___/___"));
    }

    #[test]
    fn test_depth_cutoff_uses_heuristic() {
        let outcome = Minimax::new(SearchConfig::with_max_depth(1)).search(
            &Board::new(),
            Player::X,
            Player::O,
        );
        // The centre sits on four lines, more than any other cell.
        assert_eq!(outcome.position, Some(4));
        assert_eq!(outcome.score, 4);
        assert_eq!(outcome.nodes, 9);
    }
}
