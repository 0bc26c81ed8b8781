//! Tests for the terminal front end.

use std::io::Cursor;
use tictactoe::terminal::run_round;
use tictactoe::{Player, Screen, Session, SessionConfig};

#[test]
fn test_round_reads_moves_until_win() {
    let mut session = Session::new(SessionConfig::default());
    let input = Cursor::new("1\n4\n2\n5\n3\n");
    let mut output = Vec::new();

    let outcome = run_round(&mut session, input, &mut output).unwrap();
    assert_eq!(outcome.as_deref(), Some("Player 1 wins!"));

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Player 2 (O), choose a cell:"));
    assert!(text.contains("X|X|X"));
}

#[test]
fn test_bad_input_is_reprompted() {
    let mut session = Session::new(SessionConfig::default());
    let input = Cursor::new("seven\n0\n5\n5\n");
    let mut output = Vec::new();

    let outcome = run_round(&mut session, input, &mut output).unwrap();
    assert_eq!(outcome, None);

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Enter a cell number"));
    assert!(text.contains("Cells are numbered from 1"));
    assert!(text.contains("Cell 4 is already occupied"));
    assert_eq!(session.screen(), &Screen::Board);
}

#[test]
fn test_round_against_computer() {
    let config = SessionConfig::default().versus_computer(Player::O);
    let mut session = Session::new(config);
    let input = Cursor::new("1\n2\n3\n6\n7\n8\n9\n");
    let mut output = Vec::new();

    let outcome = run_round(&mut session, input, &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Computer plays 5"));
    assert_ne!(outcome.as_deref(), Some("Player 1 wins!"));
}
