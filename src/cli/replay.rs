//! Replay command implementation - print a saved transcript.

use super::CliError;
use degrid::replay::{render_ascii, ReplayEngine, Transcript};
use std::path::Path;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the transcript cannot be loaded or diverges.
pub(crate) fn execute(path: &Path, quiet: bool) -> Result<(), CliError> {
    let transcript = Transcript::load(path)
        .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display())))?;

    println!(
        "Transcript: seed {}, {} moves",
        transcript.seed,
        transcript.moves.len()
    );
    println!();

    let mut replay = ReplayEngine::new(transcript);
    while !replay.is_finished() {
        let index = replay.cursor();
        let record = replay.next_move().copied();
        let outcome = replay.step_forward()?;
        if quiet {
            continue;
        }
        if let Some(record) = record {
            let verdict = if outcome.success { "took the cell" } else { "failed" };
            println!(
                "Move {:>3}: player {} -> ({}, {}): rolled {}, {verdict}",
                index + 1,
                record.player,
                record.x,
                record.y,
                outcome.attempt
            );
            if let Some(winner) = outcome.winner {
                println!("Player {winner} wins!");
            }
        }
    }

    println!();
    print!("{}", render_ascii(replay.engine()));
    Ok(())
}
