//! Run command implementation.

use super::output::{format_text, JsonGameResult};
use super::{seed_or_entropy, CliError, OutputFormat};
use degrid::replay::{render_ascii, ReplayEngine};
use degrid::sim::{run_game, SimConfig};
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if saving the transcript or serializing output fails.
pub(crate) fn execute(
    seed: Option<u64>,
    moves: u32,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = seed_or_entropy(seed);
    let config = SimConfig { max_moves: moves };

    if !quiet {
        println!("Running game with seed {seed}...");
        println!();
    }

    let result = run_game(seed, &config);
    let names: Vec<String> = player_names();

    if let Some(save_path) = save {
        result.transcript.save(&save_path).map_err(|e| {
            CliError::new(format!("Failed to save transcript: {e}"))
        })?;
        if !quiet {
            println!("Transcript saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result, &names));
            if !quiet {
                println!();
                print!("{}", final_board(&result.transcript));
            }
        }
        OutputFormat::Json => {
            let json_result = JsonGameResult::from_sim_result(&result);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Replay the transcript to render the final board.
fn final_board(transcript: &degrid::replay::Transcript) -> String {
    let mut replay = ReplayEngine::new(transcript.clone());
    while !replay.is_finished() {
        if replay.step_forward().is_err() {
            break;
        }
    }
    render_ascii(replay.engine())
}

/// Display names of the standard roster, in id order.
pub(super) fn player_names() -> Vec<String> {
    degrid::GameEngine::with_seed(0)
        .players()
        .iter()
        .map(|p| p.name.clone())
        .collect()
}
