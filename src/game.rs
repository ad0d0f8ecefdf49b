//! Game layer for Degrid.
//!
//! Implements the territory claim rules:
//! - Board of 100 cells with 4-directional adjacency
//! - Roster of 10 players with ownership bookkeeping
//! - Cyclic turn controller
//! - Two-phase claim challenges (request, then resolve)
//! - Win condition on the four center cells

mod board;
mod challenge;
mod engine;
mod invariants;
mod rng;
mod roster;
mod turns;

pub use board::{Board, Cell, CellId, Coord, CENTER_COORDS, GRID_SIZE, STARTING_COORDS};
pub use challenge::{ChallengeId, ChallengeRegistry, PendingChallenge};
pub use engine::{
    AppearanceUpdate, CellRef, ClaimOutcome, GameEngine, GridSnapshot, ResolveOutcome,
    TurnSnapshot,
};
pub use invariants::{check_invariants, InvariantViolation};
pub use rng::{DiceRoller, ScriptedDice, XorShiftDice};
pub use roster::{Player, PlayerId, Roster, ROSTER_SIZE};
pub use turns::TurnController;
