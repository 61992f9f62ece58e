//! Serialized game session for concurrent front ends.
//!
//! A [`GameSession`] is a cheap handle to a task that owns the
//! [`Controller`]. Every command goes through one channel, so transitions
//! never interleave. The engine's search runs on the blocking pool and its
//! answer comes back through the same task before it is applied.

use crate::games::tictactoe::{
    Controller, GameEvent, GameState, InvalidMove, Phase, Player, best_move,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

/// Error returned by [`GameSession`] commands.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// The move itself was rejected.
    #[display("Invalid move: {}", _0)]
    Move(InvalidMove),
    /// The engine is still choosing its reply.
    #[display("Engine is still thinking")]
    EngineThinking,
    /// The session task has stopped.
    #[display("Session closed")]
    Closed,
}

impl From<InvalidMove> for SessionError {
    fn from(err: InvalidMove) -> Self {
        SessionError::Move(err)
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Move(e) => Some(e),
            _ => None,
        }
    }
}

enum Command {
    Submit {
        index: usize,
        reply: oneshot::Sender<Result<GameState, SessionError>>,
    },
    Reset {
        reply: oneshot::Sender<GameState>,
    },
    Subscribe {
        reply: oneshot::Sender<mpsc::UnboundedReceiver<GameEvent>>,
    },
    State {
        reply: oneshot::Sender<GameState>,
    },
}

/// The engine's answer for the round numbered `round`.
struct EngineReply {
    round: u64,
    index: usize,
}

/// Handle to a running session task.
#[derive(Debug, Clone)]
pub struct GameSession {
    commands: mpsc::UnboundedSender<Command>,
}

impl GameSession {
    /// Spawns the session task on the current tokio runtime.
    #[instrument]
    pub fn spawn() -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(Controller::new(), rx));
        info!("Game session started");
        Self { commands }
    }

    /// Submits X's move. The engine's reply is delivered to subscribers.
    ///
    /// # Errors
    ///
    /// [`SessionError::Move`] for rejected moves,
    /// [`SessionError::EngineThinking`] while O is to move, and
    /// [`SessionError::Closed`] if the task is gone.
    pub async fn submit_move(&self, index: usize) -> Result<GameState, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Submit { index, reply })?;
        rx.await.map_err(|_| SessionError::Closed)?
    }

    /// Starts a fresh round, abandoning any pending engine reply.
    pub async fn reset(&self) -> Result<GameState, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Reset { reply })?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Listens for every future transition.
    pub async fn subscribe(&self) -> Result<mpsc::UnboundedReceiver<GameEvent>, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Subscribe { reply })?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Returns the current state.
    pub async fn state(&self) -> Result<GameState, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::State { reply })?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    fn send(&self, command: Command) -> Result<(), SessionError> {
        self.commands.send(command).map_err(|_| SessionError::Closed)
    }
}

/// Session task: the single path through which transitions happen.
async fn run(mut controller: Controller, mut commands: mpsc::UnboundedReceiver<Command>) {
    let (engine_tx, mut engine_rx) = mpsc::unbounded_channel::<EngineReply>();
    let mut round: u64 = 0;

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("All session handles dropped");
                    break;
                };
                match command {
                    Command::Submit { index, reply } => {
                        let result = submit(&mut controller, index);
                        if let Ok(state) = &result
                            && state.phase() == Phase::AwaitingMove(Player::O)
                        {
                            think(state, round, engine_tx.clone());
                        }
                        let _ = reply.send(result);
                    }
                    Command::Reset { reply } => {
                        round += 1;
                        let _ = reply.send(controller.reset());
                    }
                    Command::Subscribe { reply } => {
                        let _ = reply.send(controller.subscribe());
                    }
                    Command::State { reply } => {
                        let _ = reply.send(controller.state().clone());
                    }
                }
            }
            Some(EngineReply { round: replied, index }) = engine_rx.recv() => {
                if replied == round {
                    controller.apply_engine_move(index);
                } else {
                    debug!(replied, round, "Dropping engine reply from an earlier round");
                }
            }
        }
    }
}

fn submit(controller: &mut Controller, index: usize) -> Result<GameState, SessionError> {
    if controller.phase() == Phase::AwaitingMove(Player::O) {
        warn!(index, "Move submitted while the engine is thinking");
        return Err(SessionError::EngineThinking);
    }
    Ok(controller.submit_move(index)?)
}

/// Runs the search off the session task and posts the answer back.
fn think(state: &GameState, round: u64, engine_tx: mpsc::UnboundedSender<EngineReply>) {
    let board = *state.board();
    tokio::spawn(async move {
        match tokio::task::spawn_blocking(move || best_move(&board, Player::O)).await {
            Ok(index) => {
                let _ = engine_tx.send(EngineReply { round, index });
            }
            Err(e) => error!(error = %e, "Engine search task failed"),
        }
    });
}
