//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Square, WinningLine};

/// Checks if there is a winner on the board.
///
/// Lines are tested in the fixed order rows, columns, diagonals and the
/// first uniform non-empty line is returned together with its owner.
pub fn check_winner(board: &Board) -> Option<(Player, WinningLine)> {
    let squares = board.squares();
    WinningLine::ALL.into_iter().find_map(|line| {
        let [a, b, c] = line.indices();
        match squares[a] {
            Square::Occupied(player) if squares[a] == squares[b] && squares[b] == squares[c] => {
                Some((player, line))
            }
            _ => None,
        }
    })
}
