//! Outcome consistency invariant: the recorded outcome matches the board.

use super::super::rules::evaluate;
use super::super::GameState;
use super::Invariant;

/// Invariant: the stored outcome equals a fresh evaluation of the board.
pub struct OutcomeConsistentInvariant;

impl Invariant<GameState> for OutcomeConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        *state.outcome() == evaluate(state.board())
    }

    fn description() -> &'static str {
        "Recorded outcome matches the board"
    }
}
