//! Pending claim challenges.

use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::game::{Board, CellId, PlayerId};

/// Opaque identifier for an in-flight claim attempt.
///
/// Generated from a monotonically increasing counter; the single-writer
/// discipline around the engine makes this collision-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChallengeId(u64);

impl ChallengeId {
    /// Construct an id from its raw counter value.
    ///
    /// Useful for wire formats and for probing the registry with ids that
    /// were never issued; lookups with such ids simply miss.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An outstanding two-phase claim attempt between request and resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingChallenge {
    /// The challenge identifier.
    pub id: ChallengeId,
    /// The requesting player.
    pub player: PlayerId,
    /// The target cell.
    pub cell: CellId,
    /// Creation time. Informational only; no expiry is enforced.
    pub created_at: SystemTime,
}

/// Registry of outstanding challenges keyed by id.
///
/// Challenges have no TTL: they persist until explicitly resolved or until
/// the game is reset.
#[derive(Debug, Clone, Default)]
pub struct ChallengeRegistry {
    pending: HashMap<ChallengeId, PendingChallenge>,
    next_id: u64,
}

impl ChallengeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh challenge and link it onto the target cell.
    ///
    /// A cell holds at most one challenge id; if one is already linked the
    /// newer id replaces it (the older registry entry stays resolvable).
    pub fn create(&mut self, board: &mut Board, player: PlayerId, cell: CellId) -> ChallengeId {
        self.next_id += 1;
        let id = ChallengeId(self.next_id);
        self.pending.insert(
            id,
            PendingChallenge {
                id,
                player,
                cell,
                created_at: SystemTime::now(),
            },
        );
        if let Some(target) = board.cell_by_id_mut(cell) {
            target.challenge = Some(id);
        }
        id
    }

    /// Look up a pending challenge.
    #[must_use]
    pub fn get(&self, id: ChallengeId) -> Option<&PendingChallenge> {
        self.pending.get(&id)
    }

    /// Remove a challenge and unlink it from its cell.
    ///
    /// Idempotent: a second removal is a no-op returning `false`. The cell
    /// back-link is only cleared if it still points at this id.
    pub fn remove(&mut self, board: &mut Board, id: ChallengeId) -> bool {
        let Some(entry) = self.pending.remove(&id) else {
            return false;
        };
        if let Some(cell) = board.cell_by_id_mut(entry.cell)
            && cell.challenge == Some(id)
        {
            cell.challenge = None;
        }
        true
    }

    /// Number of outstanding challenges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no challenges are outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterate over outstanding challenges in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingChallenge> {
        self.pending.values()
    }

    /// Discard all outstanding challenges without touching the board.
    ///
    /// Used by reset, which rebuilds the board anyway.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Coord;

    #[test]
    fn test_create_links_cell() {
        let mut board = Board::new();
        let mut registry = ChallengeRegistry::new();
        let cell_id = board.cell_at(Coord::new(3, 3)).unwrap().id;

        let id = registry.create(&mut board, 1, cell_id);
        assert_eq!(registry.get(id).unwrap().player, 1);
        assert_eq!(registry.get(id).unwrap().cell, cell_id);
        assert_eq!(board.cell_by_id(cell_id).unwrap().challenge, Some(id));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut board = Board::new();
        let mut registry = ChallengeRegistry::new();
        let a = registry.create(&mut board, 1, 5);
        let b = registry.create(&mut board, 2, 6);
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut board = Board::new();
        let mut registry = ChallengeRegistry::new();
        let id = registry.create(&mut board, 1, 7);

        assert!(registry.remove(&mut board, id));
        assert!(!registry.remove(&mut board, id));
        assert!(registry.get(id).is_none());
        assert_eq!(board.cell_by_id(7).unwrap().challenge, None);
    }

    #[test]
    fn test_newer_challenge_replaces_cell_link() {
        let mut board = Board::new();
        let mut registry = ChallengeRegistry::new();
        let old = registry.create(&mut board, 1, 9);
        let new = registry.create(&mut board, 2, 9);

        assert_eq!(board.cell_by_id(9).unwrap().challenge, Some(new));
        // Removing the stale entry must not clear the newer link.
        assert!(registry.remove(&mut board, old));
        assert_eq!(board.cell_by_id(9).unwrap().challenge, Some(new));
        assert!(registry.remove(&mut board, new));
        assert_eq!(board.cell_by_id(9).unwrap().challenge, None);
    }
}
