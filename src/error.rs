//! Error types for the game engine.

use std::fmt;

use crate::game::{CellId, ChallengeId, PlayerId};

/// Coarse error category, for mapping engine errors onto a transport layer
/// (HTTP status codes or similar) without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced player, cell, or challenge does not exist.
    NotFound,
    /// Malformed or out-of-range input.
    InvalidInput,
    /// Operation attempted out of turn, after the game ended, or against
    /// someone else's challenge.
    Forbidden,
    /// Operation conflicts with current state (for example claiming a cell
    /// the requester already owns).
    Conflict,
}

/// Errors produced by engine operations.
///
/// Soft failures (an adjacency miss, a losing roll) are *not* errors;
/// they are ordinary outcomes reported through [`crate::game::ClaimOutcome`]
/// and [`crate::game::ResolveOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A winner has been declared; no further moves are accepted.
    GameOver {
        /// The player that already won.
        winner: PlayerId,
    },
    /// Coordinates fall outside the 10x10 board.
    OutOfBounds {
        /// Requested x coordinate.
        x: i32,
        /// Requested y coordinate.
        y: i32,
    },
    /// No cell with this identifier exists.
    CellNotFound {
        /// The missing cell id.
        id: CellId,
    },
    /// No player with this identifier exists.
    PlayerNotFound {
        /// The missing player id.
        id: PlayerId,
    },
    /// The requesting player moved out of turn.
    NotYourTurn {
        /// The player that tried to move.
        player: PlayerId,
        /// The player whose turn it actually is.
        current: PlayerId,
    },
    /// The requester already owns the target cell.
    AlreadyOwned {
        /// The requesting player.
        player: PlayerId,
        /// The cell they already own.
        cell: CellId,
    },
    /// No pending challenge with this identifier exists.
    ChallengeNotFound {
        /// The missing challenge id.
        id: ChallengeId,
    },
    /// The challenge exists but was created by a different player.
    ChallengeOwnerMismatch {
        /// The challenge id.
        id: ChallengeId,
        /// The player that tried to resolve it.
        player: PlayerId,
    },
    /// A set-once description is already present; use replace instead.
    DescriptionExists {
        /// The player whose description is already set.
        player: PlayerId,
    },
    /// A required description field was missing or empty.
    DescriptionRequired,
}

impl EngineError {
    /// The coarse category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            EngineError::GameOver { .. }
            | EngineError::NotYourTurn { .. }
            | EngineError::ChallengeOwnerMismatch { .. } => ErrorKind::Forbidden,
            EngineError::OutOfBounds { .. } | EngineError::DescriptionRequired => {
                ErrorKind::InvalidInput
            }
            EngineError::CellNotFound { .. }
            | EngineError::PlayerNotFound { .. }
            | EngineError::ChallengeNotFound { .. } => ErrorKind::NotFound,
            EngineError::AlreadyOwned { .. } | EngineError::DescriptionExists { .. } => {
                ErrorKind::Conflict
            }
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::GameOver { winner } => {
                write!(f, "game over: player {winner} has already won")
            }
            EngineError::OutOfBounds { x, y } => {
                write!(f, "coordinates ({x}, {y}) are out of bounds")
            }
            EngineError::CellNotFound { id } => write!(f, "cell {id} not found"),
            EngineError::PlayerNotFound { id } => write!(f, "player {id} not found"),
            EngineError::NotYourTurn { player, current } => {
                write!(f, "not player {player}'s turn (current turn: player {current})")
            }
            EngineError::AlreadyOwned { player, cell } => {
                write!(f, "player {player} already owns cell {cell}")
            }
            EngineError::ChallengeNotFound { id } => {
                write!(f, "challenge {id} not found or already resolved")
            }
            EngineError::ChallengeOwnerMismatch { id, player } => {
                write!(f, "challenge {id} does not belong to player {player}")
            }
            EngineError::DescriptionExists { player } => {
                write!(f, "player {player} already has a description; replace it instead")
            }
            EngineError::DescriptionRequired => write!(f, "description required"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
