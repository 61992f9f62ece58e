//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for classifying boards according
//! to tic-tac-toe rules. Rules are separated from board storage so that the
//! controller, the contracts and the search all share one definition.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::check_winner;

use super::{Board, Outcome};

/// Classifies a board as won, drawn or still in progress.
///
/// Win detection takes precedence over fullness: a full board with a
/// completed line is a win, never a draw.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((player, line)) = check_winner(board) {
        Outcome::Win(player, line)
    } else if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
