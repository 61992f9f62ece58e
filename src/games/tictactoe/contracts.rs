//! Contract-based validation for tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::InvalidMove;
use super::invariants::{InvariantSet, InvariantViolation, TicTacToeInvariants};
use super::{GameState, Square};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), InvalidMove>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The round must still be in progress.
pub struct RoundInProgress;

impl RoundInProgress {
    /// Rejects moves once a win or draw has been recorded.
    pub fn check(state: &GameState) -> Result<(), InvalidMove> {
        if state.outcome().is_terminal() {
            Err(InvalidMove::RoundOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The index must name an empty square.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects out-of-range and occupied squares.
    pub fn check(index: usize, state: &GameState) -> Result<(), InvalidMove> {
        match state.board().get(index) {
            None => Err(InvalidMove::OutOfRange(index)),
            Some(Square::Occupied(_)) => Err(InvalidMove::Occupied(index)),
            Some(Square::Empty) => Ok(()),
        }
    }
}

/// Composite precondition: A move is legal if the round is live and the square is empty.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(index: usize, state: &GameState) -> Result<(), InvalidMove> {
        RoundInProgress::check(state)?;
        SquareIsEmpty::check(index, state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: exactly one square went from Empty to the mover's mark.
pub struct SingleSquareChanged;

impl SingleSquareChanged {
    /// Compares the boards before and after a move.
    pub fn holds(before: &GameState, after: &GameState) -> bool {
        let mover = Square::Occupied(before.turn());
        let changed: Vec<_> = before
            .board()
            .squares()
            .iter()
            .zip(after.board().squares())
            .filter(|(b, a)| b != a)
            .collect();

        let valid = matches!(changed.as_slice(), [(Square::Empty, a)] if **a == mover);
        if !valid {
            warn!(changed = changed.len(), "Single square transition violated");
        }
        valid
    }

    /// Human-readable description of the postcondition.
    pub fn description() -> &'static str {
        "Exactly one empty square received the mover's mark"
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Round must be in progress
/// - Square must be on the board and empty
///
/// Postconditions:
/// - Exactly one square changed, Empty to the mover's mark
/// - Mark balance, history replay and outcome consistency still hold
pub struct MoveContract;

impl Contract<GameState, usize> for MoveContract {
    fn pre(state: &GameState, index: &usize) -> Result<(), InvalidMove> {
        LegalMove::check(*index, state)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !SingleSquareChanged::holds(before, after) {
            violations.push(InvariantViolation::new(SingleSquareChanged::description()));
        }
        if let Err(mut rest) = TicTacToeInvariants::check_all(after) {
            violations.append(&mut rest);
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Applies `index` to `state` under the move contract.
///
/// Preconditions are always checked. Postconditions are checked in debug
/// builds only and panic on failure, since a violation means the transition
/// logic itself is broken.
#[instrument(skip(state), fields(turn = %state.turn()))]
pub fn checked_play(state: &GameState, index: usize) -> Result<GameState, InvalidMove> {
    MoveContract::pre(state, &index)?;
    let after = state.play(index)?;

    #[cfg(debug_assertions)]
    if let Err(violations) = MoveContract::post(state, &after) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        panic!("Postcondition failed: {}", descriptions);
    }

    Ok(after)
}
