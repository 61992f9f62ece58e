//! Tests for the round controller.

use strictly_minimax::{
    Controller, GameEvent, InvalidMove, Outcome, Phase, Player, Square, WinningLine,
};

#[test]
fn test_starts_awaiting_x() {
    let controller = Controller::new();
    assert_eq!(controller.phase(), Phase::AwaitingMove(Player::X));
    assert!(controller.state().board().empty_squares().eq(0..9));
}

#[test]
fn test_submit_moves_to_engine_turn() {
    let mut controller = Controller::new();
    let state = controller.submit_move(0).unwrap();
    assert_eq!(state.phase(), Phase::AwaitingMove(Player::O));
    assert_eq!(state.board().get(0), Some(Square::Occupied(Player::X)));
}

#[test]
fn test_engine_answers_corner_with_center() {
    let mut controller = Controller::new();
    controller.submit_move(0).unwrap();
    let state = controller.engine_move();
    assert_eq!(state.board().get(4), Some(Square::Occupied(Player::O)));
    assert_eq!(controller.phase(), Phase::AwaitingMove(Player::X));
}

#[test]
fn test_invalid_move_leaves_state_unchanged() {
    let mut controller = Controller::new();
    controller.submit_and_reply(0).unwrap();
    let before = controller.state().clone();

    assert_eq!(controller.submit_move(4), Err(InvalidMove::Occupied(4)));
    assert_eq!(controller.submit_move(0), Err(InvalidMove::Occupied(0)));
    assert_eq!(controller.submit_move(9), Err(InvalidMove::OutOfRange(9)));

    assert_eq!(controller.state(), &before);
    assert_eq!(controller.phase(), Phase::AwaitingMove(Player::X));
}

#[test]
fn test_x_completes_top_row() {
    // X X . / O O . / . . . with X to move
    let mut controller = Controller::new();
    controller.submit_move(0).unwrap();
    controller.apply_engine_move(3);
    controller.submit_move(1).unwrap();
    controller.apply_engine_move(4);

    let state = controller.submit_move(2).unwrap();
    assert_eq!(
        state.outcome(),
        &Outcome::Win(Player::X, WinningLine::ALL[0])
    );
    assert_eq!(state.outcome().line().map(|l| l.indices()), Some([0, 1, 2]));
    assert_eq!(controller.phase(), Phase::RoundOver(*state.outcome()));
}

#[test]
fn test_round_over_rejects_moves() {
    let mut controller = Controller::new();
    controller.submit_move(0).unwrap();
    controller.apply_engine_move(3);
    controller.submit_move(1).unwrap();
    controller.apply_engine_move(4);
    controller.submit_move(2).unwrap();

    let before = controller.state().clone();
    assert_eq!(controller.submit_move(8), Err(InvalidMove::RoundOver));
    assert_eq!(controller.state(), &before);
}

#[test]
fn test_reset_after_any_outcome() {
    let mut controller = Controller::new();
    controller.submit_and_reply(0).unwrap();
    let state = controller.reset();
    assert_eq!(state.phase(), Phase::AwaitingMove(Player::X));
    assert!(state.history().is_empty());

    // Engine win: X keeps playing the lowest free square
    while let Phase::AwaitingMove(_) = controller.phase() {
        let index = controller.state().board().empty_squares().next().unwrap();
        controller.submit_and_reply(index).unwrap();
    }
    assert_eq!(controller.state().outcome().winner(), Some(Player::O));

    let state = controller.reset();
    assert_eq!(state.board().empty_squares().count(), 9);
    assert_eq!(controller.phase(), Phase::AwaitingMove(Player::X));
    assert_eq!(controller.snapshots().len(), 1);
}

#[test]
fn test_snapshots_record_each_transition() {
    let mut controller = Controller::new();
    controller.submit_and_reply(0).unwrap();
    let snapshots = controller.snapshots();
    assert_eq!(snapshots.len(), 3);
    assert!(snapshots[0].history().is_empty());
    assert_eq!(snapshots[1].history(), &[0]);
    assert_eq!(snapshots[2].history(), &[0, 4]);
}

#[test]
fn test_notifications_follow_transitions() {
    let mut controller = Controller::new();
    let mut events = controller.subscribe();

    controller.submit_move(0).unwrap();
    controller.apply_engine_move(3);
    controller.submit_move(1).unwrap();
    controller.apply_engine_move(4);
    controller.submit_move(2).unwrap();
    controller.reset();

    let received: Vec<GameEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert_eq!(received.len(), 7);
    assert!(
        received[..5]
            .iter()
            .all(|e| matches!(e, GameEvent::StateChanged(_)))
    );
    assert!(matches!(
        received[5],
        GameEvent::RoundOver(Outcome::Win(Player::X, _))
    ));
    match &received[6] {
        GameEvent::StateChanged(state) => assert!(state.history().is_empty()),
        other => panic!("expected reset state, got {:?}", other),
    }
}

#[test]
fn test_rejected_move_sends_no_notification() {
    let mut controller = Controller::new();
    let mut events = controller.subscribe();
    assert!(controller.submit_move(42).is_err());
    assert!(events.try_recv().is_err());
}

#[test]
fn test_dropped_subscriber_is_ignored() {
    let mut controller = Controller::new();
    drop(controller.subscribe());
    let mut live = controller.subscribe();
    controller.submit_move(4).unwrap();
    assert!(matches!(live.try_recv(), Ok(GameEvent::StateChanged(_))));
}

#[test]
#[should_panic(expected = "awaiting the engine")]
fn test_submit_during_engine_turn_panics() {
    let mut controller = Controller::new();
    controller.submit_move(0).unwrap();
    let _ = controller.submit_move(1);
}

#[test]
#[should_panic(expected = "outside the engine's turn")]
fn test_engine_move_during_human_turn_panics() {
    let mut controller = Controller::new();
    controller.engine_move();
}

#[test]
#[should_panic(expected = "illegal move")]
fn test_engine_move_on_occupied_square_panics() {
    let mut controller = Controller::new();
    controller.submit_move(0).unwrap();
    controller.apply_engine_move(0);
}
