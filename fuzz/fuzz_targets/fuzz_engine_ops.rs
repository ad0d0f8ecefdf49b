#![no_main]

//! Engine operation sequence fuzzer.
//!
//! Drives a deterministic engine through an arbitrary sequence of claim
//! requests, resolutions, profile updates, and resets, checking the
//! state-consistency invariants after every operation. This catches
//! state corruption that single-operation tests miss.

use arbitrary::Arbitrary;
use degrid::game::check_invariants;
use degrid::{ClaimOutcome, GameEngine};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated engine operation.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzOp {
    /// Request a claim at arbitrary (possibly invalid) coordinates.
    Request { player: u8, x: i32, y: i32 },
    /// Resolve the most recently created challenge.
    ResolveLast { player: u8 },
    /// Resolve a challenge id that may never have existed.
    ResolveRaw { player: u8, id: u64 },
    /// Update a player's color and description.
    Appearance { player: u8, color_tag: u8 },
    /// Discard everything and rebuild the starting layout.
    Reset,
}

/// Structured input for engine fuzzing.
#[derive(Arbitrary, Debug)]
struct EngineInput {
    /// Dice seed.
    seed: u64,
    /// Operations to apply in order.
    ops: Vec<FuzzOp>,
}

fuzz_target!(|input: EngineInput| {
    // Cap the sequence length to keep iterations fast
    let ops = &input.ops[..input.ops.len().min(256)];

    let mut engine = GameEngine::with_seed(input.seed);
    let mut last_challenge = None;

    for op in ops {
        match op.clone() {
            FuzzOp::Request { player, x, y } => {
                if let Ok(ClaimOutcome::Pending { challenge, .. }) =
                    engine.request_claim(player, x, y)
                {
                    last_challenge = Some(challenge);
                }
            }
            FuzzOp::ResolveLast { player } => {
                if let Some(challenge) = last_challenge {
                    let _ = engine.resolve_challenge(player, challenge);
                }
            }
            FuzzOp::ResolveRaw { player, id } => {
                let _ = engine.resolve_challenge(player, degrid::ChallengeId::from_raw(id));
            }
            FuzzOp::Appearance { player, color_tag } => {
                let update = degrid::game::AppearanceUpdate {
                    color: Some(format!("color-{color_tag}")),
                    description: None,
                };
                let _ = engine.update_appearance(player, update);
            }
            FuzzOp::Reset => {
                engine.reset();
                last_challenge = None;
            }
        }

        let violations = check_invariants(&engine);
        assert!(violations.is_empty(), "invariants violated: {violations:?}");
    }
});
