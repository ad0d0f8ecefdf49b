// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Degrid: a turn-based territory claim game engine.
//!
//! Ten players share a fixed 10x10 board. Each player starts on one
//! perimeter cell; on their turn they may attempt to take over another
//! cell through a two-phase probabilistic challenge. The first player to
//! successfully claim one of the four center cells wins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         CLI / Simulation            │
//! ├─────────────────────────────────────┤
//! │     SharedEngine (mutex guard)      │
//! ├─────────────────────────────────────┤
//! │  GameEngine (board/roster/turns)    │
//! └─────────────────────────────────────┘
//! ```
//!
//! The engine is a single in-memory authority: every mutation flows
//! through [`GameEngine`] operations, and [`SharedEngine`] serializes
//! concurrent callers around the full read-validate-mutate sequence.

pub mod error;
pub mod game;
pub mod replay;
pub mod shared;
pub mod sim;

pub use error::{EngineError, EngineResult, ErrorKind};

// Re-export key game types at crate root for convenience
pub use game::{
    Board, Cell, CellId, ChallengeId, ChallengeRegistry, ClaimOutcome, Coord, DiceRoller,
    GameEngine, PendingChallenge, Player, PlayerId, ResolveOutcome, Roster, ScriptedDice,
    TurnController, XorShiftDice, GRID_SIZE,
};
pub use shared::SharedEngine;
