//! History replay invariant: the board is exactly what the history built.

use super::super::{Board, GameState, Player};
use super::Invariant;

/// Invariant: replaying the history onto an empty board, X first and
/// alternating, reproduces the current board.
///
/// Each replayed move must land on an empty square, so squares are never
/// overwritten and every occupied square has exactly one move behind it.
pub struct HistoryReplayInvariant;

impl Invariant<GameState> for HistoryReplayInvariant {
    fn holds(state: &GameState) -> bool {
        let mut board = Board::new();
        let mut player = Player::X;

        for &index in state.history() {
            match board.apply(index, player) {
                Ok(next) => board = next,
                Err(_) => return false,
            }
            player = player.opponent();
        }

        board == *state.board()
    }

    fn description() -> &'static str {
        "Replaying the move history reproduces the board"
    }
}
