//! Command-line interface for strictly_minimax.

use clap::{Parser, Subcommand};

/// Strictly Minimax - tic-tac-toe against an engine that never loses
#[derive(Parser, Debug)]
#[command(name = "strictly_minimax")]
#[command(about = "Tic-tac-toe against an exhaustive minimax engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal (you are X and move first)
    Play {
        /// Path to the game config file
        #[arg(short, long, default_value = "strictly_minimax.toml")]
        config: std::path::PathBuf,
    },

    /// Score every move on a board and print the engine's choice
    Best {
        /// Nine squares in row-major order: X, O, or . for empty (e.g. "X...O....")
        board: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the engine play both sides
    Selfplay {
        /// Number of rounds to play
        #[arg(short, long, default_value = "1")]
        rounds: u32,
    },
}
