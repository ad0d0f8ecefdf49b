//! Degrid CLI - Command-line interface for running and viewing games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Degrid - a turn-based territory claim game engine
#[derive(Parser, Debug)]
#[command(name = "degrid")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single random-playout game
    Run {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum moves (default: 1000)
        #[arg(short, long, default_value = "1000")]
        moves: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save transcript to file
        #[arg(long)]
        save: Option<std::path::PathBuf>,

        /// Suppress the final board
        #[arg(short, long)]
        quiet: bool,
    },

    /// Interactive TUI to watch a game move by move
    Watch {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum moves (default: 1000)
        #[arg(short, long)]
        moves: Option<u32>,

        /// Move delay in milliseconds (default: 500)
        #[arg(long, default_value = "500")]
        speed: u64,

        /// Watch a saved transcript instead of a fresh game
        #[arg(short, long)]
        load: Option<std::path::PathBuf>,
    },

    /// Print a saved transcript move by move
    Replay {
        /// Transcript file (.json)
        #[arg(required = true)]
        transcript: std::path::PathBuf,

        /// Only print the final board
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run mass parallel games and aggregate statistics
    Simulate {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum moves per game (default: 1000)
        #[arg(short, long)]
        moves: Option<u32>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SimulateFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            seed,
            moves,
            format,
            save,
            quiet,
        } => cli::run::execute(seed, moves, format, save, quiet),

        Commands::Watch {
            seed,
            moves,
            speed,
            load,
        } => cli::watch::execute(seed, moves, speed, load),

        Commands::Replay { transcript, quiet } => cli::replay::execute(&transcript, quiet),

        Commands::Simulate {
            games,
            seed,
            threads,
            moves,
            format,
            progress,
        } => cli::simulate::execute(games, seed, threads, moves, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
