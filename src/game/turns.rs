//! Cyclic turn order.

use crate::game::PlayerId;

/// Tracks whose turn it is over a fixed cyclic order of player ids.
///
/// There is no terminal state: the cycle keeps advancing even after a
/// winner is declared. Mutating operations are gated on the winner check
/// upstream, so in practice play stops once someone wins.
#[derive(Debug, Clone)]
pub struct TurnController {
    /// Fixed sequence of player ids, set at game start.
    order: Vec<PlayerId>,
    /// Current position into `order`.
    index: usize,
}

impl TurnController {
    /// Create a controller over the given order, starting at the first
    /// player.
    #[must_use]
    pub fn new(order: Vec<PlayerId>) -> Self {
        Self { order, index: 0 }
    }

    /// The player whose turn it currently is.
    #[must_use]
    pub fn current(&self) -> PlayerId {
        self.order[self.index]
    }

    /// Advance to the next player and return their id.
    pub fn advance(&mut self) -> PlayerId {
        self.index = (self.index + 1) % self.order.len();
        self.current()
    }

    /// The fixed turn order.
    #[must_use]
    #[inline]
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    /// Current position into the order.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}
