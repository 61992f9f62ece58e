//! Round controller: turn alternation, validation and notifications.
//!
//! The controller owns the [`GameState`] for one round. X is the human side
//! and submits moves from outside; O is the engine side and its moves come
//! from [`best_move`], either computed inline by [`Controller::engine_move`]
//! or computed elsewhere and handed back through
//! [`Controller::apply_engine_move`].

use super::action::InvalidMove;
use super::contracts::checked_play;
use super::search::best_move;
use super::{GameState, Outcome, Phase, Player};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Notification emitted on every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The round state changed (move applied or reset).
    StateChanged(GameState),
    /// The round just ended.
    RoundOver(Outcome),
}

/// Drives one round at a time.
#[derive(Debug)]
pub struct Controller {
    state: GameState,
    snapshots: Vec<GameState>,
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl Controller {
    /// Creates a controller awaiting X's first move on an empty board.
    #[instrument]
    pub fn new() -> Self {
        let state = GameState::new();
        Self {
            snapshots: vec![state.clone()],
            state,
            subscribers: Vec::new(),
        }
    }

    /// Returns the current round state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Every state this round has passed through, oldest first.
    pub fn snapshots(&self) -> &[GameState] {
        &self.snapshots
    }

    /// Registers a new listener for [`GameEvent`]s.
    ///
    /// Listeners that drop their receiver are pruned on the next event.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Applies X's move at `index`.
    ///
    /// On success the controller moves to O's turn or to round over and the
    /// new state is returned. On error nothing changes.
    ///
    /// # Errors
    ///
    /// [`InvalidMove::OutOfRange`] or [`InvalidMove::Occupied`] for a bad
    /// square, and [`InvalidMove::RoundOver`] once the round has ended.
    ///
    /// # Panics
    ///
    /// If called while the engine is to move.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, index: usize) -> Result<GameState, InvalidMove> {
        match self.phase() {
            Phase::AwaitingMove(Player::X) => {}
            Phase::AwaitingMove(Player::O) => {
                panic!("submit_move called while awaiting the engine's move")
            }
            Phase::RoundOver(outcome) => {
                warn!(%outcome, "Move submitted after round end");
                return Err(InvalidMove::RoundOver);
            }
        }

        let next = checked_play(&self.state, index).inspect_err(|e| {
            warn!(error = %e, "Rejected move");
        })?;
        Ok(self.transition(next))
    }

    /// Computes and applies O's move.
    ///
    /// # Panics
    ///
    /// If it is not O's turn.
    #[instrument(skip(self))]
    pub fn engine_move(&mut self) -> GameState {
        assert_eq!(
            self.phase(),
            Phase::AwaitingMove(Player::O),
            "engine_move called outside the engine's turn"
        );
        let index = best_move(self.state.board(), Player::O);
        self.apply_engine_move(index)
    }

    /// Applies an O move that was computed elsewhere.
    ///
    /// # Panics
    ///
    /// If it is not O's turn, or if `index` is not an empty square.
    #[instrument(skip(self))]
    pub fn apply_engine_move(&mut self, index: usize) -> GameState {
        assert_eq!(
            self.phase(),
            Phase::AwaitingMove(Player::O),
            "engine move applied outside the engine's turn"
        );
        let next = checked_play(&self.state, index)
            .unwrap_or_else(|e| panic!("engine produced an illegal move: {}", e));
        self.transition(next)
    }

    /// Submits X's move and, if the round continues, plays O's reply.
    ///
    /// Returns the state after the reply (or after X's move if it ended the
    /// round).
    ///
    /// # Errors
    ///
    /// Same as [`Controller::submit_move`].
    pub fn submit_and_reply(&mut self, index: usize) -> Result<GameState, InvalidMove> {
        let state = self.submit_move(index)?;
        if state.phase() == Phase::AwaitingMove(Player::O) {
            Ok(self.engine_move())
        } else {
            Ok(state)
        }
    }

    /// Discards the round and starts a fresh one with X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> GameState {
        info!(previous = %self.state.outcome(), "Resetting round");
        let state = GameState::new();
        self.snapshots.clear();
        self.state = state.clone();
        self.snapshots.push(state.clone());
        self.notify(GameEvent::StateChanged(state.clone()));
        state
    }

    fn transition(&mut self, next: GameState) -> GameState {
        debug!(
            history = ?next.history(),
            phase = ?next.phase(),
            "Transition"
        );
        self.state = next.clone();
        self.snapshots.push(next.clone());
        self.notify(GameEvent::StateChanged(next.clone()));

        if let Phase::RoundOver(outcome) = next.phase() {
            info!(%outcome, "Round over");
            self.notify(GameEvent::RoundOver(outcome));
        }
        next
    }

    fn notify(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
