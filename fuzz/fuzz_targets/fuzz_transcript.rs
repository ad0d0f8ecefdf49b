#![no_main]

//! Transcript replay fuzzer.
//!
//! Feeds arbitrary (mostly nonsensical) transcripts to the replay engine.
//! Replay must either apply each move cleanly or reject it with a replay
//! error; it must never panic or leave the engine inconsistent.

use arbitrary::Arbitrary;
use degrid::game::check_invariants;
use degrid::replay::{MoveRecord, ReplayEngine, Transcript};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated move record.
#[derive(Arbitrary, Debug)]
struct FuzzMove {
    player: u8,
    x: u8,
    y: u8,
    attempt: u8,
    success: bool,
}

/// Structured input for replay fuzzing.
#[derive(Arbitrary, Debug)]
struct TranscriptInput {
    seed: u64,
    moves: Vec<FuzzMove>,
}

fuzz_target!(|input: TranscriptInput| {
    let mut transcript = Transcript::new(input.seed, 1000);
    for m in input.moves.iter().take(200) {
        transcript.push(MoveRecord {
            player: m.player,
            x: m.x,
            y: m.y,
            attempt: m.attempt,
            success: m.success,
        });
    }

    let mut replay = ReplayEngine::new(transcript);
    while !replay.is_finished() {
        if replay.step_forward().is_err() {
            break;
        }
        let violations = check_invariants(replay.engine());
        assert!(violations.is_empty(), "invariants violated: {violations:?}");
    }
});
