//! First-class move type for tic-tac-toe.
//!
//! Moves are domain events, not side effects: they can be validated
//! before application, serialized as a transcript and replayed.

use crate::types::Player;
use serde::{Deserialize, Serialize};

/// A player placing their token at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Row-major index of the target cell.
    pub position: usize,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position)
    }
}
