//! Transcript save/load/replay round trip.
//!
//! Run with: cargo test replay_roundtrip

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use degrid::replay::{ReplayEngine, Transcript};
use degrid::sim::{run_game, SimConfig};

#[test]
fn test_saved_transcript_replays_to_same_winner() {
    let result = run_game(0xDEAD_BEEF, &SimConfig::default());
    assert!(result.winner.is_some());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.json");
    result.transcript.save(&path).unwrap();

    let loaded = Transcript::load(&path).unwrap();
    assert_eq!(loaded, result.transcript);

    let mut replay = ReplayEngine::new(loaded);
    while !replay.is_finished() {
        replay.step_forward().unwrap();
    }
    assert_eq!(replay.engine().winner(), result.winner);
    assert_eq!(replay.cursor(), result.transcript.moves.len());
}

#[test]
fn test_replay_midpoint_matches_fresh_prefix() {
    // Stepping halfway through a transcript must leave the engine in the
    // same state as a fresh replay of just that prefix.
    let result = run_game(31337, &SimConfig::default());
    let half = result.transcript.moves.len() / 2;
    assert!(half > 0);

    let mut full = ReplayEngine::new(result.transcript.clone());
    for _ in 0..half {
        full.step_forward().unwrap();
    }

    let mut prefix_transcript = result.transcript;
    prefix_transcript.moves.truncate(half);
    let mut prefix = ReplayEngine::new(prefix_transcript);
    while !prefix.is_finished() {
        prefix.step_forward().unwrap();
    }

    assert_eq!(full.engine().grid(), prefix.engine().grid());
    assert_eq!(full.engine().turn(), prefix.engine().turn());
}

#[test]
fn test_load_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Transcript::load(&path).is_err());
}
