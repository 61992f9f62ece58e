//! Strictly Minimax library - tic-tac-toe against an optimal engine
//!
//! The human plays X and moves first; the engine plays O and chooses every
//! move by exhaustive minimax search.
//!
//! # Architecture
//!
//! - **Board**: immutable 3x3 board values with validated moves
//! - **Rules**: classification of a board as won, drawn or in progress
//! - **Search**: the engine's move choice, deterministic with lowest-index tie-break
//! - **Controller**: one round's state machine with change notifications
//! - **Session**: a serialized async wrapper that runs the search off-thread
//!
//! # Example
//!
//! ```
//! use strictly_minimax::{Controller, Phase, Player};
//!
//! let mut controller = Controller::new();
//! let state = controller.submit_and_reply(0).unwrap();
//! // The engine answers a corner opening in the center.
//! assert_eq!(state.history(), &[0, 4]);
//! assert_eq!(controller.phase(), Phase::AwaitingMove(Player::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Session management
pub use session::{GameSession, SessionError};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Controller, GameEvent, GameState, InvalidMove, Outcome, ParseBoardError, Phase,
    Player, SQUARES, Score, Square, Symmetry, WinningLine, analyze, best_move, evaluate,
};

// Crate-level exports - Rule, contract and invariant building blocks
pub use games::tictactoe::{contracts, invariants, rules, search};
