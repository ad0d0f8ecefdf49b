//! Mutual exclusion wrapper for concurrent callers.
//!
//! The engine's invariants (turn ownership, single outstanding winner,
//! bidirectional ownership consistency) are only guaranteed under a
//! single-writer discipline. [`SharedEngine`] enforces it with one mutex
//! around the full read-validate-mutate sequence of every operation.
//! Reads take the same lock so they never observe a half-updated state.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::EngineResult;
use crate::game::{
    AppearanceUpdate, Cell, CellId, ChallengeId, ClaimOutcome, GameEngine, GridSnapshot, Player,
    PlayerId, ResolveOutcome, TurnSnapshot,
};

/// Cloneable, thread-safe handle to a single [`GameEngine`].
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<GameEngine>>,
}

impl SharedEngine {
    /// Wrap an engine for shared access.
    #[must_use]
    pub fn new(engine: GameEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Acquire the engine lock.
    ///
    /// A poisoned lock means a panic escaped mid-operation; the state it
    /// protects is still the single authority, so recover it rather than
    /// propagating the poison.
    fn lock(&self) -> MutexGuard<'_, GameEngine> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// See [`GameEngine::request_claim`].
    ///
    /// # Errors
    ///
    /// Propagates the engine's validation errors.
    pub fn request_claim(&self, player: PlayerId, x: i32, y: i32) -> EngineResult<ClaimOutcome> {
        self.lock().request_claim(player, x, y)
    }

    /// See [`GameEngine::resolve_challenge`].
    ///
    /// # Errors
    ///
    /// Propagates the engine's validation errors.
    pub fn resolve_challenge(
        &self,
        player: PlayerId,
        challenge: ChallengeId,
    ) -> EngineResult<ResolveOutcome> {
        self.lock().resolve_challenge(player, challenge)
    }

    /// See [`GameEngine::reset`].
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Ordered player summaries.
    #[must_use]
    pub fn players(&self) -> Vec<Player> {
        self.lock().players().to_vec()
    }

    /// See [`GameEngine::player`].
    ///
    /// # Errors
    ///
    /// Propagates [`crate::EngineError::PlayerNotFound`].
    pub fn player(&self, id: PlayerId) -> EngineResult<Player> {
        self.lock().player(id).cloned()
    }

    /// See [`GameEngine::cell`].
    ///
    /// # Errors
    ///
    /// Propagates [`crate::EngineError::CellNotFound`].
    pub fn cell(&self, id: CellId) -> EngineResult<Cell> {
        self.lock().cell(id).cloned()
    }

    /// See [`GameEngine::update_appearance`].
    ///
    /// # Errors
    ///
    /// Propagates the engine's validation errors.
    pub fn update_appearance(
        &self,
        id: PlayerId,
        update: AppearanceUpdate,
    ) -> EngineResult<Player> {
        self.lock().update_appearance(id, update)
    }

    /// See [`GameEngine::description`].
    ///
    /// # Errors
    ///
    /// Propagates [`crate::EngineError::PlayerNotFound`].
    pub fn description(&self, id: PlayerId) -> EngineResult<String> {
        self.lock().description(id).map(str::to_string)
    }

    /// See [`GameEngine::set_description`].
    ///
    /// # Errors
    ///
    /// Propagates the engine's validation errors.
    pub fn set_description(&self, id: PlayerId, text: &str) -> EngineResult<()> {
        self.lock().set_description(id, text)
    }

    /// See [`GameEngine::replace_description`].
    ///
    /// # Errors
    ///
    /// Propagates [`crate::EngineError::PlayerNotFound`].
    pub fn replace_description(&self, id: PlayerId, text: &str) -> EngineResult<()> {
        self.lock().replace_description(id, text)
    }

    /// See [`GameEngine::clear_description`].
    ///
    /// # Errors
    ///
    /// Propagates [`crate::EngineError::PlayerNotFound`].
    pub fn clear_description(&self, id: PlayerId) -> EngineResult<()> {
        self.lock().clear_description(id)
    }

    /// Consistent snapshot of the grid and winner.
    #[must_use]
    pub fn grid(&self) -> GridSnapshot {
        self.lock().grid()
    }

    /// Consistent snapshot of the turn state.
    #[must_use]
    pub fn turn(&self) -> TurnSnapshot {
        self.lock().turn()
    }

    /// The winner, if one has been declared.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.lock().winner()
    }
}
