//! Tests verifying the minimax engine plays tic-tac-toe perfectly.
//!
//! Perfect play means never losing against any opponent and drawing
//! against another perfect player.

use tictactoe_core::{select_move, Board, Game, GameStatus, Minimax, Player, SearchConfig};

/// Plays every opponent reply against the engine and asserts it never loses.
fn assert_never_loses(game: &Game, engine_side: Player, engine: &Minimax) {
    match game.status() {
        GameStatus::Won(winner) => {
            assert_eq!(winner, engine_side, "engine lost: {}", game.board());
            return;
        }
        GameStatus::Draw => return,
        GameStatus::InProgress => {}
    }

    if game.to_move() == engine_side {
        let pos = engine
            .select_move(game.board(), engine_side, engine_side.opponent())
            .expect("in-progress game has an empty cell");
        let mut next = game.clone();
        next.place(pos).expect("engine picks an empty cell");
        assert_never_loses(&next, engine_side, engine);
    } else {
        for pos in game.valid_moves() {
            let mut next = game.clone();
            next.place(pos).expect("valid move");
            assert_never_loses(&next, engine_side, engine);
        }
    }
}

#[test]
fn test_engine_never_loses_as_x() {
    assert_never_loses(&Game::new(), Player::X, &Minimax::default());
}

#[test]
fn test_engine_never_loses_as_o() {
    assert_never_loses(&Game::new(), Player::O, &Minimax::default());
}

#[test]
fn test_self_play_is_draw() {
    let engine = Minimax::default();
    let mut game = Game::new();

    while !game.status().is_over() {
        let side = game.to_move();
        let pos = engine
            .select_move(game.board(), side, side.opponent())
            .expect("in-progress game has an empty cell");
        game.place(pos).unwrap();
    }

    assert_eq!(game.status(), GameStatus::Draw);
    assert_eq!(game.history().len(), 9);
}

#[test]
fn test_reply_to_centre_gives_o_no_forced_win() {
    let board: Board = "X__/_O_/___".parse().unwrap();
    let pos = select_move(&board, Player::X, Player::O, None).unwrap();

    let mut after = board.clone();
    after.place(Player::X, pos).unwrap();
    let reply = Minimax::default().search(&after, Player::O, Player::X);
    assert!(reply.score <= 0, "O can force a win after X plays {pos}");
}

#[test]
fn test_immediate_win_preferred() {
    let board: Board = "XX_/OO_/___".parse().unwrap();
    assert_eq!(select_move(&board, Player::X, Player::O, None), Some(2));
}

#[test]
fn test_o_takes_its_own_win_over_block() {
    // Both sides threaten; O to move wins on 5 rather than blocking 2.
    let board: Board = "XX_/OO_/X__".parse().unwrap();
    assert_eq!(select_move(&board, Player::O, Player::X, None), Some(5));
}

#[test]
fn test_full_board_returns_none() {
    let board: Board = "XOX/OXO/OXO".parse().unwrap();
    assert_eq!(select_move(&board, Player::X, Player::O, None), None);
}

#[test]
fn test_search_does_not_mutate_callers_board() {
    let board: Board = "X__/_O_/__X".parse().unwrap();
    let before = board.clone();
    let _ = Minimax::default().search(&board, Player::O, Player::X);
    assert_eq!(board, before);
}

#[test]
fn test_depth_limited_search_on_larger_board() {
    let mut board = Board::with_side(4).unwrap();
    for (player, pos) in [(Player::X, 0), (Player::O, 5), (Player::X, 1), (Player::O, 6)] {
        board.place(player, pos).unwrap();
    }
    // X holds 0 and 1 of the top row; O threatens nothing yet.
    let engine = Minimax::new(SearchConfig::with_max_depth(3));
    let pos = engine.select_move(&board, Player::X, Player::O).unwrap();
    assert!(board.is_vacant(pos));
}

#[test]
fn test_depth_limited_search_still_finds_immediate_win() {
    let board: Board = "XX_/OO_/___".parse().unwrap();
    assert_eq!(select_move(&board, Player::X, Player::O, Some(1)), Some(2));
}
