//! Core domain types for tic-tac-toe.

use super::action::InvalidMove;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of squares on the board.
pub const SQUARES: usize = 9;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Player {
    /// Player X, the human side (goes first).
    #[display("X")]
    X,
    /// Player O, the engine side.
    #[display("O")]
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Player::X) => 'X',
            Square::Occupied(Player::O) => 'O',
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are values: [`Board::apply`] returns a new board and leaves the
/// receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; SQUARES],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; SQUARES],
        }
    }

    /// Builds a board directly from its squares.
    ///
    /// No balance check is made; use [`Board::to_move`] to find out whether
    /// the arrangement is reachable by alternating play.
    pub fn from_squares(squares: [Square; SQUARES]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; SQUARES] {
        &self.squares
    }

    /// Places `player`'s mark at `index`, returning the resulting board.
    ///
    /// # Errors
    ///
    /// [`InvalidMove::OutOfRange`] if `index` is not in 0-8 and
    /// [`InvalidMove::Occupied`] if the square already holds a mark.
    pub fn apply(&self, index: usize, player: Player) -> Result<Board, InvalidMove> {
        match self.get(index) {
            None => Err(InvalidMove::OutOfRange(index)),
            Some(Square::Occupied(_)) => Err(InvalidMove::Occupied(index)),
            Some(Square::Empty) => {
                let mut next = *self;
                next.squares[index] = Square::Occupied(player);
                Ok(next)
            }
        }
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Indices of the empty squares in ascending order.
    pub fn empty_squares(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(i, _)| i)
    }

    /// Number of marks `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Infers the side to move from the mark counts.
    ///
    /// Returns `None` when the counts cannot come from alternating play
    /// with X moving first.
    pub fn to_move(&self) -> Option<Player> {
        let x = self.count(Player::X);
        let o = self.count(Player::O);
        if x == o {
            Some(Player::X)
        } else if x == o + 1 {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Returns the board as seen through a rotation or reflection.
    pub fn transform(&self, symmetry: Symmetry) -> Board {
        let mut squares = [Square::Empty; SQUARES];
        for (i, square) in self.squares.iter().enumerate() {
            squares[symmetry.map(i)] = *square;
        }
        Board { squares }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.squares[row * 3 + col].symbol())?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Error parsing a [`Board`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// The text did not contain exactly nine squares.
    #[display("Expected 9 squares, found {}", _0)]
    WrongLength(usize),
    /// A character that is neither a mark nor an empty marker.
    #[display("Unexpected character {:?} in board", _0)]
    BadChar(char),
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine squares in row-major order.
    ///
    /// `X`/`O` (either case) are marks; `.`, `-`, `_` and space are empty.
    /// Newlines and `|` separators are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(SQUARES);
        for c in s.chars() {
            let square = match c {
                'x' | 'X' => Square::Occupied(Player::X),
                'o' | 'O' => Square::Occupied(Player::O),
                '.' | '-' | '_' | ' ' => Square::Empty,
                '\n' | '\r' | '|' => continue,
                other => return Err(ParseBoardError::BadChar(other)),
            };
            squares.push(square);
        }
        let squares: [Square; SQUARES] = squares
            .try_into()
            .map_err(|v: Vec<Square>| ParseBoardError::WrongLength(v.len()))?;
        Ok(Board { squares })
    }
}

/// One of the eight dihedral symmetries of the square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Symmetry {
    /// No change.
    Identity,
    /// Quarter turn clockwise.
    Rotate90,
    /// Half turn.
    Rotate180,
    /// Quarter turn counter-clockwise.
    Rotate270,
    /// Mirror left to right.
    FlipHorizontal,
    /// Mirror top to bottom.
    FlipVertical,
    /// Reflect across the 0-4-8 diagonal.
    FlipMainDiagonal,
    /// Reflect across the 2-4-6 diagonal.
    FlipAntiDiagonal,
}

impl Symmetry {
    /// Where square `index` lands under this symmetry.
    pub fn map(self, index: usize) -> usize {
        let (r, c) = (index / 3, index % 3);
        let (r, c) = match self {
            Symmetry::Identity => (r, c),
            Symmetry::Rotate90 => (c, 2 - r),
            Symmetry::Rotate180 => (2 - r, 2 - c),
            Symmetry::Rotate270 => (2 - c, r),
            Symmetry::FlipHorizontal => (r, 2 - c),
            Symmetry::FlipVertical => (2 - r, c),
            Symmetry::FlipMainDiagonal => (c, r),
            Symmetry::FlipAntiDiagonal => (2 - c, 2 - r),
        };
        r * 3 + c
    }
}

/// A row, column or diagonal: three indices in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine([usize; 3]);

impl WinningLine {
    /// All eight lines: rows, then columns, then diagonals.
    pub const ALL: [WinningLine; 8] = [
        WinningLine([0, 1, 2]),
        WinningLine([3, 4, 5]),
        WinningLine([6, 7, 8]),
        WinningLine([0, 3, 6]),
        WinningLine([1, 4, 7]),
        WinningLine([2, 5, 8]),
        WinningLine([0, 4, 8]),
        WinningLine([2, 4, 6]),
    ];

    /// The three board indices of the line.
    pub fn indices(&self) -> [usize; 3] {
        self.0
    }

    /// Whether `index` lies on the line.
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// The image of this line under `symmetry`, re-sorted.
    pub fn transform(&self, symmetry: Symmetry) -> WinningLine {
        let mut indices = self.0.map(|i| symmetry.map(i));
        indices.sort_unstable();
        WinningLine(indices)
    }
}

impl fmt::Display for WinningLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "({}, {}, {})", a, b, c)
    }
}

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Moves remain and nobody has won.
    InProgress,
    /// A player completed the given line.
    Win(Player, WinningLine),
    /// The board is full with no completed line.
    Draw,
}

impl Outcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player, _) => Some(*player),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn line(&self) -> Option<WinningLine> {
        match self {
            Outcome::Win(_, line) => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win(player, line) => write!(f, "Player {} wins along {}", player, line),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Where the round stands, derived from a [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the given player to move.
    AwaitingMove(Player),
    /// The round has ended.
    RoundOver(Outcome),
}

/// Complete state of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Player to move next.
    turn: Player,
    /// Classification of `board`.
    outcome: Outcome,
    /// Indices played this round, in order.
    history: Vec<usize>,
}

impl GameState {
    /// Creates a fresh round: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::X,
            outcome: Outcome::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the round outcome so far.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the indices played this round.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Returns who placed the most recent mark, or `None` on a fresh round.
    pub fn last_mover(&self) -> Option<Player> {
        match self.board.get(*self.history.last()?) {
            Some(Square::Occupied(player)) => Some(player),
            _ => None,
        }
    }

    /// Returns the controller phase this state corresponds to.
    pub fn phase(&self) -> Phase {
        if self.outcome.is_terminal() {
            Phase::RoundOver(self.outcome)
        } else {
            Phase::AwaitingMove(self.turn)
        }
    }

    /// Plays `index` for the player to move and returns the next state.
    ///
    /// # Errors
    ///
    /// [`InvalidMove::RoundOver`] once the round is decided, otherwise
    /// whatever [`Board::apply`] reports.
    pub fn play(&self, index: usize) -> Result<GameState, InvalidMove> {
        if self.outcome.is_terminal() {
            return Err(InvalidMove::RoundOver);
        }
        let board = self.board.apply(index, self.turn)?;
        let mut history = self.history.clone();
        history.push(index);
        Ok(GameState {
            board,
            turn: self.turn.opponent(),
            outcome: super::rules::evaluate(&board),
            history,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
