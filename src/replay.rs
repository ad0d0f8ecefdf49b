//! Game transcripts and replay.
//!
//! Because engine games are deterministic in the dice seed, a replayable
//! record needs only the seed and the sequence of moves; re-applying the
//! moves to a fresh engine with the same seed reproduces every roll. The
//! recorded attempt and outcome of each move are kept anyway so replay can
//! detect divergence (a corrupted or hand-edited transcript).
//!
//! # Time travel
//!
//! - **Forward**: apply the next recorded move
//! - **Backward**: re-run from move 0 to (`cursor` - 1)

mod render;

pub use render::render_ascii;

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::game::{ClaimOutcome, GameEngine, PlayerId, ResolveOutcome};

/// One resolved move in a recorded game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player that moved.
    pub player: PlayerId,
    /// Target x coordinate.
    pub x: u8,
    /// Target y coordinate.
    pub y: u8,
    /// The drawn attempt value.
    pub attempt: u8,
    /// Whether the attempt took the cell.
    pub success: bool,
}

/// A complete recorded game: seed, move limit, and every resolved move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// The dice seed the game was played with.
    pub seed: u64,
    /// The move limit the game was played with.
    pub max_moves: u32,
    /// Resolved moves in order.
    pub moves: Vec<MoveRecord>,
}

impl Transcript {
    /// Create an empty transcript.
    #[must_use]
    pub const fn new(seed: u64, max_moves: u32) -> Self {
        Self {
            seed,
            max_moves,
            moves: Vec::new(),
        }
    }

    /// Append a resolved move.
    pub fn push(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    /// Save as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations or serialization fail.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(io::Error::other)
    }

    /// Load from a JSON file produced by [`Transcript::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail or the JSON is invalid.
    pub fn load(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file)).map_err(io::Error::other)
    }
}

/// Errors produced while replaying a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayError {
    /// All recorded moves have been applied.
    EndOfTranscript,
    /// Re-applying a move produced a different roll or outcome than the
    /// transcript recorded.
    Diverged {
        /// Index of the diverging move.
        move_index: usize,
    },
    /// The engine rejected a recorded move outright.
    Rejected {
        /// Index of the rejected move.
        move_index: usize,
        /// The engine's error.
        error: EngineError,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::EndOfTranscript => write!(f, "end of transcript"),
            ReplayError::Diverged { move_index } => {
                write!(f, "replay diverged from transcript at move {move_index}")
            }
            ReplayError::Rejected { move_index, error } => {
                write!(f, "engine rejected recorded move {move_index}: {error}")
            }
        }
    }
}

impl std::error::Error for ReplayError {}

/// Steps a fresh engine through a recorded game.
#[derive(Debug)]
pub struct ReplayEngine {
    engine: GameEngine,
    transcript: Transcript,
    cursor: usize,
}

impl ReplayEngine {
    /// Create a replay positioned before the first move.
    #[must_use]
    pub fn new(transcript: Transcript) -> Self {
        Self {
            engine: GameEngine::with_seed(transcript.seed),
            transcript,
            cursor: 0,
        }
    }

    /// Apply the next recorded move, verifying it against the transcript.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::EndOfTranscript`] past the last move,
    /// [`ReplayError::Rejected`] if the engine refuses the move, and
    /// [`ReplayError::Diverged`] if the reproduced roll or outcome differs
    /// from the recording.
    pub fn step_forward(&mut self) -> Result<ResolveOutcome, ReplayError> {
        let Some(record) = self.transcript.moves.get(self.cursor).copied() else {
            return Err(ReplayError::EndOfTranscript);
        };
        let move_index = self.cursor;

        let requested = self
            .engine
            .request_claim(record.player, i32::from(record.x), i32::from(record.y))
            .map_err(|error| ReplayError::Rejected { move_index, error })?;
        let ClaimOutcome::Pending { challenge, .. } = requested else {
            // A recorded move was accepted when played, so an adjacency
            // miss here means the transcript does not match the seed.
            return Err(ReplayError::Diverged { move_index });
        };
        let outcome = self
            .engine
            .resolve_challenge(record.player, challenge)
            .map_err(|error| ReplayError::Rejected { move_index, error })?;

        if outcome.attempt != record.attempt || outcome.success != record.success {
            return Err(ReplayError::Diverged { move_index });
        }
        self.cursor += 1;
        Ok(outcome)
    }

    /// Step back one move by re-running from the start.
    ///
    /// # Errors
    ///
    /// Propagates replay errors from re-applying the prefix.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        let target = self.cursor.saturating_sub(1);
        self.rewind();
        while self.cursor < target {
            self.step_forward()?;
        }
        Ok(())
    }

    /// Rewind to before the first move.
    pub fn rewind(&mut self) {
        self.engine = GameEngine::with_seed(self.transcript.seed);
        self.cursor = 0;
    }

    /// Index of the next move to apply.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether every recorded move has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.transcript.moves.len()
    }

    /// The recorded move that `step_forward` will apply next.
    #[must_use]
    pub fn next_move(&self) -> Option<&MoveRecord> {
        self.transcript.moves.get(self.cursor)
    }

    /// The transcript being replayed.
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The engine at the current replay position.
    #[must_use]
    pub const fn engine(&self) -> &GameEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{run_game, SimConfig};

    #[test]
    fn test_replay_reproduces_recorded_game() {
        let result = run_game(2024, &SimConfig::default());
        let mut replay = ReplayEngine::new(result.transcript.clone());

        while !replay.is_finished() {
            replay.step_forward().expect("recorded move must replay");
        }
        assert_eq!(replay.engine().winner(), result.winner);
    }

    #[test]
    fn test_step_past_end() {
        let result = run_game(5, &SimConfig { max_moves: 3 });
        let mut replay = ReplayEngine::new(result.transcript);
        for _ in 0..3 {
            let _ = replay.step_forward();
        }
        assert!(matches!(
            replay.step_forward(),
            Err(ReplayError::EndOfTranscript)
        ));
    }

    #[test]
    fn test_tampered_transcript_diverges() {
        let result = run_game(77, &SimConfig::default());
        let mut transcript = result.transcript;
        if let Some(first) = transcript.moves.first_mut() {
            first.attempt = if first.attempt == 100 { 1 } else { first.attempt + 1 };
        }
        let mut replay = ReplayEngine::new(transcript);
        assert!(matches!(
            replay.step_forward(),
            Err(ReplayError::Diverged { move_index: 0 })
        ));
    }

    #[test]
    fn test_step_backward_rewinds_one_move() {
        let result = run_game(11, &SimConfig::default());
        let mut replay = ReplayEngine::new(result.transcript);
        replay.step_forward().unwrap();
        replay.step_forward().unwrap();
        replay.step_backward().unwrap();
        assert_eq!(replay.cursor(), 1);
        replay.step_backward().unwrap();
        assert_eq!(replay.cursor(), 0);
        // Backing up at the start stays at the start.
        replay.step_backward().unwrap();
        assert_eq!(replay.cursor(), 0);
    }
}
