//! Keyboard mapping for the board.

use crossterm::event::KeyCode;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Play the given square.
    Play(usize),
    /// Play the square under the cursor.
    PlayCursor,
    /// Move the cursor to the given square.
    Cursor(usize),
    /// Start a new round.
    Reset,
    /// Leave the game.
    Quit,
}

/// Maps a key to an action, given the current cursor square.
///
/// Digits 1-9 pick squares directly, arrows move the cursor (stopping at
/// the edges), Enter or Space plays the cursor square.
pub fn action_for(key: KeyCode, cursor: usize) -> Option<Action> {
    let (row, col) = (cursor / 3, cursor % 3);
    match key {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Action::Play(d as usize - 1)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PlayCursor),
        KeyCode::Left if col > 0 => Some(Action::Cursor(cursor - 1)),
        KeyCode::Right if col < 2 => Some(Action::Cursor(cursor + 1)),
        KeyCode::Up if row > 0 => Some(Action::Cursor(cursor - 3)),
        KeyCode::Down if row < 2 => Some(Action::Cursor(cursor + 3)),
        _ => None,
    }
}
