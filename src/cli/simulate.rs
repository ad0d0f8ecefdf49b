//! Simulate command implementation.

use super::output::{format_simulate_csv, format_simulate_text, SimulateStats};
use super::run::player_names;
use super::{seed_or_entropy, CliError, SimulateFormat};
use degrid::sim::{run_game, SimConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    moves: Option<u32>,
    format: SimulateFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_entropy(seed);
    let mut config = SimConfig::default();
    if let Some(m) = moves {
        config.max_moves = m;
    }

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::new(format!("invalid progress template: {e}")))?;
        pb.set_style(style.progress_chars("=>-"));
        Some(pb)
    } else {
        None
    };

    let names = player_names();
    let start = Instant::now();

    // Run games in parallel using a fold/reduce pattern: each thread
    // accumulates into its own SimulateStats, merged at the end.
    let stats = (0..games)
        .into_par_iter()
        .fold(
            || SimulateStats::new(names.len()),
            |mut local_stats, i| {
                let game_seed = base_seed.wrapping_add(i);
                let result = run_game(game_seed, &config);
                local_stats.add_result(&result);
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local_stats
            },
        )
        .reduce(
            || SimulateStats::new(names.len()),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    let elapsed = start.elapsed().as_secs_f64();

    match format {
        SimulateFormat::Text => {
            print!("{}", format_simulate_text(&stats, &names, elapsed));
        }
        SimulateFormat::Json => {
            let json = serde_json::to_string_pretty(&stats)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        SimulateFormat::Csv => {
            print!("{}", format_simulate_csv(&stats, &names));
        }
    }

    Ok(())
}
