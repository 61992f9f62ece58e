//! Exhaustive minimax search for the engine side.
//!
//! Scores are always from O's point of view: an O win is [`WIN`], an X win
//! is [`LOSS`], a draw is [`DRAW`]. Depth does not discount a result, so a
//! win found nine plies down is worth the same as an immediate one.
//!
//! Every function here is a pure function of its arguments. Nothing is
//! cached between calls, so the search is safe to run on any thread.

use super::rules::evaluate;
use super::{Board, Outcome, Player, SQUARES};
use tracing::{debug, instrument};

/// Minimax value of a position.
pub type Score = i8;

/// O has won (or will, with best play).
pub const WIN: Score = 1;
/// Neither side can force a win.
pub const DRAW: Score = 0;
/// X has won (or will, with best play).
pub const LOSS: Score = -1;

/// Legal moves from `board` in ascending index order, with the board each
/// one produces.
fn children(board: &Board, to_move: Player) -> impl Iterator<Item = (usize, Board)> + '_ {
    (0..SQUARES).filter_map(move |i| board.apply(i, to_move).ok().map(|child| (i, child)))
}

/// Whether `candidate` is strictly better than `current` for `player`.
fn improves(player: Player, candidate: Score, current: Score) -> bool {
    match player {
        Player::O => candidate > current,
        Player::X => candidate < current,
    }
}

/// Minimax value of `board` with `to_move` about to play.
///
/// O maximizes and X minimizes. Terminal boards are scored directly.
pub fn score(board: &Board, to_move: Player) -> Score {
    match evaluate(board) {
        Outcome::Win(Player::O, _) => WIN,
        Outcome::Win(Player::X, _) => LOSS,
        Outcome::Draw => DRAW,
        Outcome::InProgress => {
            let values =
                children(board, to_move).map(|(_, child)| score(&child, to_move.opponent()));
            let best = match to_move {
                Player::O => values.max(),
                Player::X => values.min(),
            };
            best.unwrap_or(DRAW)
        }
    }
}

/// Scores every legal move for `to_move`, indexed by square.
///
/// Occupied squares are `None`.
pub fn analyze(board: &Board, to_move: Player) -> [Option<Score>; SQUARES] {
    let mut scores = [None; SQUARES];
    for (i, child) in children(board, to_move) {
        scores[i] = Some(score(&child, to_move.opponent()));
    }
    scores
}

/// Picks the optimal move for `to_move`.
///
/// Candidates are tried from square 0 to 8 and a later candidate replaces
/// the current choice only on strict improvement, so ties go to the lowest
/// index. Identical inputs always produce the identical move.
///
/// # Panics
///
/// If `board` has no empty square. Asking for a move on a full board is a
/// caller bug, not bad input.
#[instrument(skip(board), fields(empty = board.empty_squares().count()))]
pub fn best_move(board: &Board, to_move: Player) -> usize {
    assert!(
        !board.is_full(),
        "best_move called on a full board:\n{}",
        board
    );

    let mut best: Option<(usize, Score)> = None;
    for (i, child) in children(board, to_move) {
        let value = score(&child, to_move.opponent());
        match best {
            Some((_, current)) if !improves(to_move, value, current) => {}
            _ => best = Some((i, value)),
        }
    }

    match best {
        Some((index, value)) => {
            debug!(index, value, "Search chose move");
            index
        }
        None => unreachable!("non-full board has an empty square"),
    }
}
