//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Player, Square};

/// Returns true iff some winning line is fully occupied by `player`.
pub fn has_line(board: &Board, player: Player) -> bool {
    let target = Some(Square::Occupied(player));
    board
        .lines()
        .iter()
        .any(|line| line.iter().all(|&pos| board.get(pos) == target))
}

/// Checks if there is a winner on the board.
///
/// Returns the owner of the first completed line in line order. Under
/// alternating legal play at most one player can own a line.
pub fn check_winner(board: &Board) -> Option<Player> {
    board.lines().iter().find_map(|line| {
        let (&first, rest) = line.split_first()?;
        let owner = board.get(first)?.player()?;
        rest.iter()
            .all(|&pos| board.get(pos) == Some(Square::Occupied(owner)))
            .then_some(owner)
    })
}

/// Counts lines `player` could still complete (no opposing token on them).
pub fn open_lines(board: &Board, player: Player) -> usize {
    let blocker = Some(Square::Occupied(player.opponent()));
    board
        .lines()
        .iter()
        .filter(|line| line.iter().all(|&pos| board.get(pos) != blocker))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
        assert!(!has_line(&board, Player::X));
        assert!(!has_line(&board, Player::O));
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX/OO_/___".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Player::X));
        assert!(has_line(&board, Player::X));
        assert!(!has_line(&board, Player::O));
    }

    #[test]
    fn test_winner_diagonal() {
        let board: Board = "O_X/_OX/__O".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Player::O));
    }

    #[test]
    fn test_winner_anti_diagonal_four_by_four() {
        let board: Board = "___X/__X_/_X__/X___".parse().unwrap();
        assert!(has_line(&board, Player::X));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX_/___/___".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_open_lines() {
        let board = Board::new();
        assert_eq!(open_lines(&board, Player::X), 8);

        // O in the centre blocks both diagonals, the middle row and column.
        let board: Board = "___/_O_/___".parse().unwrap();
        assert_eq!(open_lines(&board, Player::X), 4);
        assert_eq!(open_lines(&board, Player::O), 8);
    }
}
