//! Terminal UI for Strictly Minimax

mod app;
mod input;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use strictly_minimax::{GameConfig, GameEvent, GameSession};
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

use app::App;
use input::{Action, action_for};

/// Run the TUI client
pub async fn run(config: GameConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(engine_delay_ms = config.engine_delay_ms(), "Starting Strictly Minimax TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let session = GameSession::spawn();
    let res = match session.subscribe().await {
        Ok(events) => run_game(&mut terminal, &session, events, App::new(config.engine_delay())).await,
        Err(e) => Err(e.into()),
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Draw, drain session events, handle one key, repeat.
#[instrument(skip_all)]
async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &GameSession,
    mut events: mpsc::UnboundedReceiver<GameEvent>,
    mut app: App,
) -> Result<()> {
    loop {
        while let Ok(event) = events.try_recv() {
            app.push_event(event);
        }
        app.tick(Instant::now());

        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for(key.code, app.cursor()) {
            Some(Action::Quit) => {
                info!("User quit");
                return Ok(());
            }
            Some(Action::Reset) => {
                session.reset().await?;
                app.start_over(&mut events);
            }
            Some(Action::Cursor(index)) => app.set_cursor(index),
            Some(Action::Play(index)) => {
                app.set_cursor(index);
                play(session, &mut app, index).await;
            }
            Some(Action::PlayCursor) => {
                let index = app.cursor();
                play(session, &mut app, index).await;
            }
            None => {}
        }
    }
}

async fn play(session: &GameSession, app: &mut App, index: usize) {
    if app.is_waiting() {
        app.set_status("Wait for the engine's move.");
        return;
    }
    if let Err(e) = session.submit_move(index).await {
        warn!(error = %e, index, "Move failed");
        app.set_status(e.to_string());
    }
}
