//! Mark balance invariant: X leads O by at most one mark.

use super::super::{Board, GameState};
use super::Invariant;

/// Invariant: `count(X) - count(O)` is 0 or 1.
///
/// X moves first and turns strictly alternate, so X is never behind and
/// never more than one ply ahead.
pub struct MarkBalanceInvariant;

impl Invariant<Board> for MarkBalanceInvariant {
    fn holds(board: &Board) -> bool {
        board.to_move().is_some()
    }

    fn description() -> &'static str {
        "X leads O by zero or one mark"
    }
}

impl Invariant<GameState> for MarkBalanceInvariant {
    fn holds(state: &GameState) -> bool {
        <Self as Invariant<Board>>::holds(state.board())
            && state.board().to_move() == Some(state.turn())
    }

    fn description() -> &'static str {
        "X leads O by zero or one mark and the turn matches the counts"
    }
}
