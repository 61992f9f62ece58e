//! Property tests over boards reached by alternating legal play.

use proptest::prelude::*;
use strictly_minimax::{
    Board, GameState, InvalidMove, Outcome, Player, Square, Symmetry, WinningLine, evaluate,
};
use strum::IntoEnumIterator;

/// Plays the legal moves of `moves` in order, skipping illegal ones and
/// stopping once the round ends. Returns every state along the way.
fn play_out(moves: &[usize]) -> Vec<GameState> {
    let mut states = vec![GameState::new()];
    for &index in moves {
        let current = states.last().cloned().unwrap_or_default();
        if current.outcome().is_terminal() {
            break;
        }
        if let Ok(next) = current.play(index) {
            states.push(next);
        }
    }
    states
}

fn moves() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0usize..9, 0..20)
}

proptest! {
    #[test]
    fn mark_counts_stay_balanced(moves in moves()) {
        for state in play_out(&moves) {
            let x = state.board().count(Player::X);
            let o = state.board().count(Player::O);
            prop_assert!(x == o || x == o + 1, "x={} o={}", x, o);
        }
    }

    #[test]
    fn evaluate_commutes_with_symmetry(moves in moves()) {
        for state in play_out(&moves) {
            let board = state.board();
            let outcome = evaluate(board);
            for symmetry in Symmetry::iter() {
                let image = board.transform(symmetry);
                match (outcome, evaluate(&image)) {
                    (Outcome::Win(p, line), Outcome::Win(q, _)) => {
                        prop_assert_eq!(p, q);
                        let moved = line.transform(symmetry);
                        for i in moved.indices() {
                            prop_assert_eq!(image.get(i), Some(Square::Occupied(p)));
                        }
                    }
                    (a, b) => prop_assert_eq!(a, b),
                }
            }
        }
    }

    #[test]
    fn occupied_or_out_of_range_moves_fail(moves in moves(), index in 0usize..20) {
        let states = play_out(&moves);
        let board = states.last().map(|s| *s.board()).unwrap_or_default();
        let player = board.to_move().unwrap_or(Player::X);
        match board.get(index) {
            None => prop_assert_eq!(board.apply(index, player), Err(InvalidMove::OutOfRange(index))),
            Some(Square::Occupied(_)) => {
                prop_assert_eq!(board.apply(index, player), Err(InvalidMove::Occupied(index)))
            }
            Some(Square::Empty) => prop_assert!(board.apply(index, player).is_ok()),
        }
    }

    #[test]
    fn full_boards_are_never_in_progress(moves in proptest::collection::vec(0usize..9, 40..60)) {
        let states = play_out(&moves);
        let last = states.last().cloned().unwrap_or_default();
        if last.board().is_full() {
            let outcome = evaluate(last.board());
            prop_assert!(outcome.is_terminal());
            if outcome == Outcome::Draw {
                prop_assert!(no_uniform_line(last.board()));
            }
        }
    }
}

fn no_uniform_line(board: &Board) -> bool {
    WinningLine::ALL.iter().all(|line| {
        let [a, b, c] = line.indices();
        !(board.get(a) == board.get(b)
            && board.get(b) == board.get(c)
            && board.get(a) != Some(Square::Empty))
    })
}

#[test]
fn every_symmetry_is_a_permutation() {
    for symmetry in Symmetry::iter() {
        let mut seen: Vec<usize> = (0..9).map(|i| symmetry.map(i)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..9).collect::<Vec<_>>(), "{:?}", symmetry);
    }
}
