//! Player roster and ownership bookkeeping.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::game::CellId;

/// Unique identifier for a player, in `1..=10`.
pub type PlayerId = u8;

/// Number of players in the fixed roster.
pub const ROSTER_SIZE: u8 = 10;

/// Fixed roster names, in id order.
const DEFAULT_NAMES: [&str; 10] = [
    "Alice", "Bob", "Carol", "Dave", "Eve", "Frank", "Grace", "Heidi", "Ivan", "Judy",
];

/// Default display colors, in id order.
const DEFAULT_COLORS: [&str; 10] = [
    "red", "blue", "green", "orange", "purple", "cyan", "magenta", "lime", "brown", "teal",
];

/// One of the fixed 10 participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier in `1..=10`.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Display color; owned cells are painted with it.
    pub color: String,
    /// Free-form profile text, empty by default.
    pub description: String,
    /// Identifiers of the cells this player currently owns.
    pub owned_cells: BTreeSet<CellId>,
}

impl Player {
    /// Create a player with the default appearance for its id slot.
    ///
    /// Returns `None` if `id` is outside `1..=10`.
    #[must_use]
    pub fn standard(id: PlayerId) -> Option<Self> {
        if id == 0 || id > ROSTER_SIZE {
            return None;
        }
        let slot = usize::from(id) - 1;
        Some(Self {
            id,
            name: DEFAULT_NAMES[slot].to_string(),
            color: DEFAULT_COLORS[slot].to_string(),
            description: String::new(),
            owned_cells: BTreeSet::new(),
        })
    }
}

/// The fixed set of 10 players.
#[derive(Debug, Clone)]
pub struct Roster {
    /// Players in id order (id 1 at index 0).
    players: Vec<Player>,
}

impl Roster {
    /// Create the standard 10-player roster with default appearances and
    /// no owned cells.
    #[must_use]
    pub fn standard() -> Self {
        let players = (1..=ROSTER_SIZE)
            .filter_map(Player::standard)
            .collect();
        Self { players }
    }

    /// Get a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Get a mutable reference to a player by id.
    #[must_use]
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// All players in id order.
    #[must_use]
    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Player ids in roster order (the default turn order).
    #[must_use]
    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    /// Move a cell id from one player's owned set to another's.
    ///
    /// The caller is responsible for updating the cell's `owner` field in
    /// the same operation so the bidirectional invariant never observably
    /// breaks.
    pub fn transfer_cell(&mut self, cell: CellId, from: Option<PlayerId>, to: PlayerId) {
        if let Some(prev) = from
            && let Some(player) = self.player_mut(prev)
        {
            player.owned_cells.remove(&cell);
        }
        if let Some(player) = self.player_mut(to) {
            player.owned_cells.insert(cell);
        }
    }
}
