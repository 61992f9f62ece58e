//! Tests for board values and move validation.

use strictly_minimax::{Board, GameState, InvalidMove, ParseBoardError, Player, Square};

#[test]
fn test_apply_sets_exactly_one_square() {
    let before = Board::new().apply(0, Player::X).unwrap();
    let after = before.apply(4, Player::O).unwrap();

    let changed: Vec<usize> = (0..9)
        .filter(|&i| before.get(i) != after.get(i))
        .collect();
    assert_eq!(changed, vec![4]);
    assert_eq!(after.get(4), Some(Square::Occupied(Player::O)));
}

#[test]
fn test_apply_leaves_original_untouched() {
    let board = Board::new();
    let _ = board.apply(4, Player::X).unwrap();
    assert_eq!(board, Board::new());
}

#[test]
fn test_apply_occupied_square_fails() {
    let board = Board::new().apply(4, Player::X).unwrap();
    assert_eq!(board.apply(4, Player::O), Err(InvalidMove::Occupied(4)));
    assert_eq!(board.apply(4, Player::X), Err(InvalidMove::Occupied(4)));
}

#[test]
fn test_apply_out_of_range_fails() {
    let board = Board::new();
    assert_eq!(board.apply(9, Player::X), Err(InvalidMove::OutOfRange(9)));
    assert_eq!(board.apply(usize::MAX, Player::X), Err(InvalidMove::OutOfRange(usize::MAX)));
}

#[test]
fn test_error_messages() {
    assert!(InvalidMove::Occupied(3).to_string().contains("occupied"));
    assert!(InvalidMove::OutOfRange(12).to_string().contains("out of range"));
}

#[test]
fn test_is_full_only_when_no_empty_square() {
    let mut board = Board::new();
    for (i, player) in [Player::X, Player::O].iter().cycle().take(9).enumerate() {
        assert!(!board.is_full());
        board = board.apply(i, *player).unwrap();
    }
    assert!(board.is_full());
    assert_eq!(board.empty_squares().count(), 0);
}

#[test]
fn test_parse_and_display() {
    let board: Board = "X.O\n.X.\nO..".parse().unwrap();
    assert_eq!(board.to_string(), "X.O\n.X.\nO..");
    assert_eq!(board.count(Player::X), 2);
    assert_eq!(board.count(Player::O), 2);
    assert_eq!(board.to_move(), Some(Player::X));
    assert_eq!(board.empty_squares().collect::<Vec<_>>(), vec![1, 3, 5, 7, 8]);
}

#[test]
fn test_parse_errors() {
    assert_eq!("XO".parse::<Board>(), Err(ParseBoardError::WrongLength(2)));
    assert_eq!("XO?......".parse::<Board>(), Err(ParseBoardError::BadChar('?')));
}

#[test]
fn test_to_move_rejects_impossible_counts() {
    let board: Board = "OO.......".parse().unwrap();
    assert_eq!(board.to_move(), None);
    let board: Board = "XXX......".parse().unwrap();
    assert_eq!(board.to_move(), None);
}

#[test]
fn test_last_mover_follows_history() {
    let state = GameState::new();
    assert_eq!(state.last_mover(), None);

    let state = state.play(0).unwrap();
    assert_eq!(state.last_mover(), Some(Player::X));

    let state = state.play(4).unwrap();
    assert_eq!(state.last_mover(), Some(Player::O));
}
