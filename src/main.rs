//! Strictly Minimax - CLI entry point.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use strictly_minimax::{
    Board, Controller, GameConfig, Outcome, Phase, Player, analyze, best_move, evaluate,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config } => {
            let config = GameConfig::from_file_or_default(&config)?;
            tui::run(config).await
        }
        Command::Best { board, json } => {
            init_tracing();
            run_best(&board, json)
        }
        Command::Selfplay { rounds } => {
            init_tracing();
            run_selfplay(rounds)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print every legal move's score and the engine's pick.
#[instrument]
fn run_best(text: &str, json: bool) -> Result<()> {
    let board: Board = text.parse().context("Failed to parse board")?;
    let Some(to_move) = board.to_move() else {
        bail!("Mark counts are impossible in alternating play (X moves first)");
    };

    let outcome = evaluate(&board);
    if outcome.is_terminal() {
        if json {
            println!("{}", serde_json::json!({ "board": board, "outcome": outcome }));
        } else {
            println!("{}\n\n{}", board, outcome);
        }
        return Ok(());
    }

    let scores = analyze(&board, to_move);
    let best = best_move(&board, to_move);

    if json {
        let value = serde_json::json!({
            "board": board,
            "to_move": to_move,
            "scores": scores,
            "best": best,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}\n", board);
    println!("{} to move. Scores are from O's point of view (+1 O wins, -1 X wins).", to_move);
    for (index, score) in scores.iter().enumerate() {
        if let Some(score) = score {
            println!("  square {}: {:+}", index, score);
        }
    }
    println!("Best move: {}", best);
    Ok(())
}

/// Engine against engine through the controller.
#[instrument]
fn run_selfplay(rounds: u32) -> Result<()> {
    let mut controller = Controller::new();
    let (mut x_wins, mut o_wins, mut draws) = (0u32, 0u32, 0u32);

    for round in 1..=rounds {
        loop {
            match controller.phase() {
                Phase::AwaitingMove(Player::X) => {
                    let index = best_move(controller.state().board(), Player::X);
                    controller.submit_move(index)?;
                }
                Phase::AwaitingMove(Player::O) => {
                    controller.engine_move();
                }
                Phase::RoundOver(outcome) => {
                    match outcome {
                        Outcome::Win(Player::X, _) => x_wins += 1,
                        Outcome::Win(Player::O, _) => o_wins += 1,
                        _ => draws += 1,
                    }
                    info!(round, %outcome, moves = ?controller.state().history(), "Round finished");
                    println!("Round {}: {}\n{}\n", round, outcome, controller.state().board());
                    controller.reset();
                    break;
                }
            }
        }
    }

    println!("X wins: {}  O wins: {}  Draws: {}", x_wins, o_wins, draws);
    Ok(())
}
