//! Multi-move integration tests for the game engine.
//!
//! These walk full game scenarios through the public API, checking the
//! state-consistency invariants after every operation.
//!
//! Run with: cargo test engine_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use degrid::game::{check_invariants, STARTING_COORDS};
use degrid::{ClaimOutcome, Coord, EngineError, GameEngine, ScriptedDice};

/// Engine with all 10 starting claim values fixed at 50, followed by the
/// given attempt rolls.
fn engine_with_rolls(attempts: &[u8]) -> GameEngine {
    let mut rolls = vec![50u8; 10];
    rolls.extend_from_slice(attempts);
    GameEngine::with_dice(Box::new(ScriptedDice::new(&rolls)))
}

fn assert_consistent(engine: &GameEngine) {
    let violations = check_invariants(engine);
    assert!(violations.is_empty(), "{violations:?}");
}

#[test]
fn test_fresh_state_layout() {
    let engine = GameEngine::with_seed(1234);
    assert_consistent(&engine);

    // Cell at (0,0) belongs to player 1 and is a starting cell.
    let origin = engine.board().cell_at(Coord::new(0, 0)).unwrap();
    assert_eq!(origin.owner, Some(1));
    assert!(origin.is_starting);
    assert!(origin.claim_value.is_some());

    // Cell at (5,5) is unowned with no claim value.
    let center = engine.board().cell_at(Coord::new(5, 5)).unwrap();
    assert_eq!(center.owner, None);
    assert_eq!(center.claim_value, None);
    assert!(!center.is_starting);

    // One starting cell per player, at the fixed coordinates.
    for (i, &(x, y)) in STARTING_COORDS.iter().enumerate() {
        let cell = engine.board().cell_at(Coord::new(x, y)).unwrap();
        assert_eq!(cell.owner, Some(u8::try_from(i + 1).unwrap()));
        assert!(cell.is_starting);
    }
}

#[test]
fn test_unowned_center_claim_wins_immediately() {
    let mut engine = engine_with_rolls(&[73]);

    // Player 1 requests the distant, unowned center cell: adjacency is
    // not required for unowned cells.
    let outcome = engine.request_claim(1, 5, 5).unwrap();
    let ClaimOutcome::Pending { challenge, cell } = outcome else {
        panic!("expected a pending challenge, got {outcome:?}");
    };
    assert_eq!((cell.x, cell.y), (5, 5));
    assert_consistent(&engine);

    // No claim value stored yet, so the resolve always succeeds.
    let resolved = engine.resolve_challenge(1, challenge).unwrap();
    assert!(resolved.success);
    assert_eq!(resolved.attempt, 73);
    assert_eq!(resolved.winner, Some(1));
    assert_eq!(resolved.next_player, 2);

    let cell = resolved.cell.unwrap();
    assert_eq!(cell.owner, Some(1));
    assert_eq!(cell.claim_value, Some(73));
    assert_consistent(&engine);
}

#[test]
fn test_adjacency_soft_failure_consumes_nothing() {
    let mut engine = engine_with_rolls(&[]);
    let before = engine.grid();

    // (0,4) is player 3's starting cell, nowhere near player 1.
    let outcome = engine.request_claim(1, 0, 4).unwrap();
    assert_eq!(outcome, ClaimOutcome::NotAdjacent);

    // No mutation, no challenge, no turn consumption.
    let after = engine.grid();
    assert_eq!(before.cells, after.cells);
    assert!(engine.challenges().is_empty());
    assert_eq!(engine.turn().current_player, 1);
    assert_consistent(&engine);
}

#[test]
fn test_all_requests_forbidden_after_win() {
    let mut engine = engine_with_rolls(&[40]);
    let challenge = engine
        .request_claim(1, 4, 4)
        .unwrap()
        .challenge_id()
        .unwrap();
    engine.resolve_challenge(1, challenge).unwrap();
    assert_eq!(engine.winner(), Some(1));

    for player in 1..=10 {
        assert_eq!(
            engine.request_claim(player, 7, 7),
            Err(EngineError::GameOver { winner: 1 })
        );
    }
    assert_consistent(&engine);
}

#[test]
fn test_reset_after_win_restores_everything() {
    let mut engine = engine_with_rolls(&[40, 60]);
    let challenge = engine
        .request_claim(1, 5, 5)
        .unwrap()
        .challenge_id()
        .unwrap();
    engine.resolve_challenge(1, challenge).unwrap();
    assert_eq!(engine.winner(), Some(1));
    assert_eq!(engine.player(1).unwrap().owned_cells.len(), 2);

    engine.reset();
    assert_consistent(&engine);
    assert_eq!(engine.winner(), None);
    assert_eq!(engine.turn().current_player, 1);

    // (5,5) is unowned again with no claim value.
    let center = engine.board().cell_at(Coord::new(5, 5)).unwrap();
    assert_eq!(center.owner, None);
    assert_eq!(center.claim_value, None);

    // Player 1 is back to exactly their starting cell, which has a fresh
    // claim value (the next scripted roll).
    let p1 = engine.player(1).unwrap();
    assert_eq!(p1.owned_cells.len(), 1);
    assert!(p1.owned_cells.contains(&1));
    let origin = engine.board().cell_at(Coord::new(0, 0)).unwrap();
    assert_eq!(origin.claim_value, Some(60));
}

#[test]
fn test_boundary_coordinates_rejected() {
    let mut engine = GameEngine::with_seed(9);
    for (x, y) in [(10, 0), (0, 10), (-1, 0), (0, -1), (100, 100)] {
        assert_eq!(
            engine.request_claim(1, x, y),
            Err(EngineError::OutOfBounds { x, y })
        );
    }
    assert_consistent(&engine);
}

#[test]
fn test_own_starting_cell_is_conflict() {
    let mut engine = GameEngine::with_seed(9);
    assert_eq!(
        engine.request_claim(1, 0, 0),
        Err(EngineError::AlreadyOwned { player: 1, cell: 1 })
    );
}

#[test]
fn test_abandoned_challenge_survives_until_reset() {
    let mut engine = engine_with_rolls(&[30, 30]);
    // Player 1 requests but never resolves; there is no expiry.
    let abandoned = engine
        .request_claim(1, 3, 3)
        .unwrap()
        .challenge_id()
        .unwrap();
    assert_eq!(engine.challenges().len(), 1);
    // The turn has not advanced, so player 1 may request again; the cell
    // link moves to the newer challenge but both stay resolvable.
    let second = engine
        .request_claim(1, 3, 4)
        .unwrap()
        .challenge_id()
        .unwrap();
    assert_eq!(engine.challenges().len(), 2);
    assert_consistent(&engine);

    engine.resolve_challenge(1, second).unwrap();
    assert!(engine.challenges().get(abandoned).is_some());

    engine.reset();
    assert!(engine.challenges().is_empty());
}

#[test]
fn test_takeover_transfers_between_owned_sets() {
    // Player 1 bridges to (0,1) then takes player 2's starting cell at
    // (0,2) with a roll equal to the threshold.
    let mut engine = engine_with_rolls(&[50]);
    let c = engine.request_claim(1, 0, 1).unwrap().challenge_id().unwrap();
    engine.resolve_challenge(1, c).unwrap();
    assert_consistent(&engine);

    // Players 2-10 each burn a turn on an unowned cell in the bottom row.
    for (i, player) in (2u8..=10).enumerate() {
        let x = i32::try_from(i + 1).unwrap();
        let c = engine
            .request_claim(player, x, 9)
            .unwrap()
            .challenge_id()
            .unwrap();
        engine.resolve_challenge(player, c).unwrap();
        assert_consistent(&engine);
    }

    let c = engine.request_claim(1, 0, 2).unwrap().challenge_id().unwrap();
    let outcome = engine.resolve_challenge(1, c).unwrap();
    assert!(outcome.success);
    assert_consistent(&engine);

    assert_eq!(engine.cell(21).unwrap().owner, Some(1));
    assert!(engine.player(1).unwrap().owned_cells.contains(&21));
    assert!(!engine.player(2).unwrap().owned_cells.contains(&21));
    // Player 2 still owns the cell they claimed in the filler round.
    assert_eq!(engine.player(2).unwrap().owned_cells.len(), 1);
}
