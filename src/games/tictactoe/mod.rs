//! Tic-tac-toe: board model, rules, search and round controller.

mod action;
pub mod contracts;
mod controller;
pub mod invariants;
pub mod rules;
pub mod search;
mod types;

pub use action::InvalidMove;
pub use controller::{Controller, GameEvent};
pub use rules::evaluate;
pub use search::{Score, analyze, best_move};
pub use types::{
    Board, GameState, Outcome, ParseBoardError, Phase, Player, SQUARES, Square, Symmetry,
    WinningLine,
};
