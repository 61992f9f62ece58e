//! Move validation errors for tic-tac-toe.
//!
//! A move is a bare board index (0-8). Everything that can go wrong with
//! one supplied from outside the core is captured here.

/// Error returned when a move cannot be applied.
///
/// All variants are recoverable: the board and round state are left exactly
/// as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum InvalidMove {
    /// The index is not a square on the board.
    #[display("Square {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The square at the index is already occupied.
    #[display("Square {} is already occupied", _0)]
    Occupied(usize),

    /// The round is over; only a reset is accepted.
    #[display("Round is over")]
    RoundOver,
}

impl std::error::Error for InvalidMove {}
