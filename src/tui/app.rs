//! Application state for the terminal front end.

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use strictly_minimax::{GameEvent, GameState, Outcome, Phase, Player};
use tokio::sync::mpsc;
use tracing::debug;

/// Round results across the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    /// Rounds won by the human (X).
    pub human_wins: u32,
    /// Rounds won by the engine (O).
    pub engine_wins: u32,
    /// Drawn rounds.
    pub draws: u32,
}

impl Scoreboard {
    /// Counts a finished round.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Win(Player::X, _) => self.human_wins += 1,
            Outcome::Win(Player::O, _) => self.engine_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }
}

/// Main application state.
///
/// Session events are queued and applied in order. An event that reveals
/// the engine's move is held back for the configured delay first; a reset
/// drops whatever is still queued.
pub struct App {
    state: GameState,
    cursor: usize,
    status_message: String,
    scoreboard: Scoreboard,
    pending: VecDeque<GameEvent>,
    hold_until: Option<Instant>,
    engine_delay: Option<Duration>,
}

impl App {
    /// Creates a new application.
    pub fn new(engine_delay: Option<Duration>) -> Self {
        Self {
            state: GameState::new(),
            cursor: 4,
            status_message: "Your move (X).".to_string(),
            scoreboard: Scoreboard::default(),
            pending: VecDeque::new(),
            hold_until: None,
            engine_delay,
        }
    }

    /// The state currently on screen.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The cursor square.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Replaces the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Results so far.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Whether the screen is behind the session (engine move not shown yet).
    pub fn is_waiting(&self) -> bool {
        !self.pending.is_empty() || self.state.phase() == Phase::AwaitingMove(Player::O)
    }

    /// Queues an event from the session.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending.push_back(event);
    }

    /// Applies queued events whose time has come.
    pub fn tick(&mut self, now: Instant) {
        while let Some(event) = self.pending.front() {
            if reveals_engine_move(event) {
                match (self.engine_delay, self.hold_until) {
                    (Some(delay), None) => {
                        self.hold_until = Some(now + delay);
                        self.status_message = "Engine is thinking...".to_string();
                        return;
                    }
                    (Some(_), Some(until)) if now < until => return,
                    _ => self.hold_until = None,
                }
            }
            if let Some(event) = self.pending.pop_front() {
                self.apply(event);
            }
        }
    }

    /// Drops queued events and any pending delay.
    pub fn cancel_pending(&mut self) {
        self.pending.clear();
        self.hold_until = None;
    }

    /// Abandons the shown round after the session has been reset.
    ///
    /// Events still sitting in `events` ahead of the reset belong to the old
    /// round and are discarded. The session answers commands in order, so the
    /// first fresh state in the channel is the reset itself.
    pub fn start_over(&mut self, events: &mut mpsc::UnboundedReceiver<GameEvent>) {
        self.cancel_pending();
        while let Ok(event) = events.try_recv() {
            if let GameEvent::StateChanged(state) = &event
                && state.history().is_empty()
            {
                self.push_event(event);
                return;
            }
            debug!(?event, "Discarding event from abandoned round");
        }
    }

    fn apply(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::StateChanged(state) => {
                self.status_message = match state.phase() {
                    Phase::AwaitingMove(Player::X) if state.history().is_empty() => {
                        "New round. Your move (X).".to_string()
                    }
                    Phase::AwaitingMove(Player::X) => match state.history().last() {
                        Some(index) => format!("Engine played {}. Your move.", index + 1),
                        None => "Your move (X).".to_string(),
                    },
                    Phase::AwaitingMove(Player::O) => "Engine is thinking...".to_string(),
                    Phase::RoundOver(_) => self.status_message.clone(),
                };
                self.state = state;
            }
            GameEvent::RoundOver(outcome) => {
                self.scoreboard.record(&outcome);
                let headline = match outcome {
                    Outcome::Win(Player::X, _) => "You won!",
                    Outcome::Win(Player::O, _) => "Engine wins!",
                    _ => "Draw!",
                };
                self.status_message =
                    format!("{} Press 'r' to play again or 'q' to quit.", headline);
            }
        }
    }
}

/// True for the state change produced by O's move.
fn reveals_engine_move(event: &GameEvent) -> bool {
    match event {
        GameEvent::StateChanged(state) => state.last_mover() == Some(Player::O),
        GameEvent::RoundOver(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_minimax::Controller;

    #[test]
    fn test_scoreboard_records_each_outcome() {
        let mut board = Scoreboard::default();
        board.record(&Outcome::Draw);
        board.record(&Outcome::Draw);
        board.record(&Outcome::InProgress);
        assert_eq!(
            board,
            Scoreboard {
                human_wins: 0,
                engine_wins: 0,
                draws: 2
            }
        );
    }

    #[test]
    fn test_engine_move_held_for_delay() {
        let mut controller = Controller::new();
        let mut events = controller.subscribe();
        controller.submit_and_reply(0).unwrap();

        let mut app = App::new(Some(Duration::from_millis(500)));
        while let Ok(event) = events.try_recv() {
            app.push_event(event);
        }

        let start = Instant::now();
        app.tick(start);
        assert_eq!(app.state().history(), &[0]);
        assert!(app.is_waiting());

        app.tick(start + Duration::from_millis(100));
        assert_eq!(app.state().history(), &[0]);

        app.tick(start + Duration::from_millis(600));
        assert_eq!(app.state().history(), &[0, 4]);
        assert!(!app.is_waiting());
    }

    #[test]
    fn test_no_delay_applies_immediately() {
        let mut controller = Controller::new();
        let mut events = controller.subscribe();
        controller.submit_and_reply(0).unwrap();

        let mut app = App::new(None);
        while let Ok(event) = events.try_recv() {
            app.push_event(event);
        }
        app.tick(Instant::now());
        assert_eq!(app.state().history(), &[0, 4]);
    }

    #[test]
    fn test_cancel_drops_held_move() {
        let mut app = App::new(Some(Duration::from_secs(1)));
        let mut controller = Controller::new();
        let mut events = controller.subscribe();
        controller.submit_and_reply(4).unwrap();
        while let Ok(event) = events.try_recv() {
            app.push_event(event);
        }

        let start = Instant::now();
        app.tick(start);
        assert_eq!(app.state().history(), &[4]);

        app.cancel_pending();
        app.tick(start + Duration::from_secs(2));
        assert_eq!(app.state().history(), &[4]);
    }

    #[test]
    fn test_start_over_discards_abandoned_round() {
        let mut controller = Controller::new();
        let mut events = controller.subscribe();
        controller.submit_move(0).unwrap();
        controller.apply_engine_move(4);
        controller.submit_move(1).unwrap();
        controller.apply_engine_move(2);
        controller.submit_move(3).unwrap();

        let mut app = App::new(Some(Duration::from_millis(500)));
        for _ in 0..3 {
            app.push_event(events.try_recv().unwrap());
        }

        // O completes the 2-4-6 diagonal before the reset reaches the screen
        controller.apply_engine_move(6);
        controller.reset();
        app.start_over(&mut events);

        let start = Instant::now();
        for i in 0..10 {
            app.tick(start + Duration::from_secs(i));
        }
        assert_eq!(app.scoreboard(), &Scoreboard::default());
        assert_eq!(app.state(), &GameState::new());
        assert!(!app.is_waiting());
    }

    #[test]
    fn test_start_over_keeps_events_after_reset() {
        let mut controller = Controller::new();
        let mut events = controller.subscribe();
        controller.submit_and_reply(0).unwrap();
        controller.reset();
        controller.submit_move(8).unwrap();

        let mut app = App::new(None);
        app.start_over(&mut events);
        while let Ok(event) = events.try_recv() {
            app.push_event(event);
        }
        app.tick(Instant::now());
        assert_eq!(app.state().history(), &[8]);
    }
}
