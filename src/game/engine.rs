//! Game engine orchestration.
//!
//! [`GameEngine`] owns the entire game state and exposes the only
//! mutating and query operations external callers use. All validation
//! happens before any mutation: on any error or soft failure the state is
//! left completely unchanged.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::game::{
    Board, Cell, CellId, ChallengeId, ChallengeRegistry, Coord, DiceRoller, Player, PlayerId,
    Roster, TurnController, XorShiftDice, GRID_SIZE, STARTING_COORDS,
};

/// Compact reference to a cell, returned alongside a fresh challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRef {
    /// Stable cell identifier.
    pub id: CellId,
    /// X coordinate.
    pub x: u8,
    /// Y coordinate.
    pub y: u8,
}

/// Outcome of a claim request.
///
/// An adjacency miss is an expected outcome of normal play, reported here
/// rather than as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// A challenge was registered; resolve it to attempt the takeover.
    Pending {
        /// Identifier to pass to [`GameEngine::resolve_challenge`].
        challenge: ChallengeId,
        /// The target cell.
        cell: CellRef,
    },
    /// The target cell has an owner and is not orthogonally adjacent to
    /// any cell the requester owns. No state changed and no turn was
    /// consumed.
    NotAdjacent,
}

impl ClaimOutcome {
    /// The registered challenge id, if a challenge was created.
    #[must_use]
    pub const fn challenge_id(&self) -> Option<ChallengeId> {
        match self {
            ClaimOutcome::Pending { challenge, .. } => Some(*challenge),
            ClaimOutcome::NotAdjacent => None,
        }
    }
}

/// Outcome of resolving a challenge.
///
/// Returned for both winning and losing rolls; a losing roll is not an
/// error, but it still consumes the player's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveOutcome {
    /// Whether the attempt took the cell.
    pub success: bool,
    /// The drawn value in `[1, 100]`.
    pub attempt: u8,
    /// The updated cell, present only on success.
    pub cell: Option<Cell>,
    /// Whose turn it is after this resolution.
    pub next_player: PlayerId,
    /// The winner, if this resolution (or an earlier one) decided the game.
    pub winner: Option<PlayerId>,
}

/// Optional appearance fields for a profile update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppearanceUpdate {
    /// New display color, if given. Owned cells are repainted.
    pub color: Option<String>,
    /// New profile description, if given.
    pub description: Option<String>,
}

/// Snapshot of the whole grid plus the winner, for read-only callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSnapshot {
    /// Side length of the board.
    pub grid_size: u8,
    /// All 100 cells in row-major order.
    pub cells: Vec<Cell>,
    /// The winner, if one has been declared.
    pub winner: Option<PlayerId>,
}

/// Snapshot of the turn state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnSnapshot {
    /// The player whose turn it currently is.
    pub current_player: PlayerId,
    /// The fixed cyclic order of player ids.
    pub turn_order: Vec<PlayerId>,
}

/// The in-memory game authority.
///
/// Created once at process start (or via [`GameEngine::reset`]) with a
/// deterministic initial layout: 10 fixed perimeter coordinates assigned
/// one per player in roster order, each seeded with a random initial claim
/// value; the other 90 cells unclaimed.
pub struct GameEngine {
    board: Board,
    roster: Roster,
    turns: TurnController,
    challenges: ChallengeRegistry,
    winner: Option<PlayerId>,
    dice: Box<dyn DiceRoller + Send>,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("turn", &self.turns.current())
            .field("winner", &self.winner)
            .field("pending_challenges", &self.challenges.len())
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// Create an engine with dice seeded from the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dice(Box::new(XorShiftDice::from_entropy()))
    }

    /// Create an engine with deterministic dice from the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_dice(Box::new(XorShiftDice::new(seed)))
    }

    /// Create an engine with an injected dice roller.
    ///
    /// Seeding the initial layout consumes one draw per starting cell
    /// (10 draws) before the first move.
    #[must_use]
    pub fn with_dice(mut dice: Box<dyn DiceRoller + Send>) -> Self {
        let (board, roster) = Self::initial_layout(dice.as_mut());
        let turns = TurnController::new(roster.ids());
        Self {
            board,
            roster,
            turns,
            challenges: ChallengeRegistry::new(),
            winner: None,
            dice,
        }
    }

    /// Build the deterministic starting board and roster.
    ///
    /// Each starting cell gets a fresh random claim value; everything else
    /// is unclaimed.
    fn initial_layout(dice: &mut dyn DiceRoller) -> (Board, Roster) {
        let mut board = Board::new();
        let mut roster = Roster::standard();

        for (slot, &(x, y)) in STARTING_COORDS.iter().enumerate() {
            let id = PlayerId::try_from(slot + 1).unwrap_or(1);
            let Some(player) = roster.player_mut(id) else {
                continue;
            };
            if let Some(cell) = board.cell_at_mut(Coord::new(x, y)) {
                cell.owner = Some(id);
                cell.color = Some(player.color.clone());
                cell.is_starting = true;
                cell.claim_value = Some(dice.roll());
                player.owned_cells.insert(cell.id);
            }
        }

        (board, roster)
    }

    /// Discard the entire state and rebuild the deterministic initial
    /// layout with fresh random starting claim values. Always succeeds.
    pub fn reset(&mut self) {
        let (board, roster) = Self::initial_layout(self.dice.as_mut());
        self.turns = TurnController::new(roster.ids());
        self.board = board;
        self.roster = roster;
        self.challenges.clear();
        self.winner = None;
    }

    /// Request a claim on the cell at `(x, y)`.
    ///
    /// On success registers a pending challenge and returns its id; the
    /// caller must then call [`GameEngine::resolve_challenge`]. Requesting
    /// an owned cell that is not adjacent to the caller's territory is a
    /// soft failure ([`ClaimOutcome::NotAdjacent`]): nothing changes and
    /// the turn is not consumed. Unowned cells may be requested from
    /// anywhere on the board.
    ///
    /// # Errors
    ///
    /// - [`EngineError::GameOver`] if a winner has been declared
    /// - [`EngineError::OutOfBounds`] if either coordinate is outside `[0, 9]`
    /// - [`EngineError::CellNotFound`] if the cell is missing
    /// - [`EngineError::NotYourTurn`] if it is not the caller's turn
    /// - [`EngineError::PlayerNotFound`] if the caller does not exist
    /// - [`EngineError::AlreadyOwned`] if the caller already owns the cell
    pub fn request_claim(
        &mut self,
        player: PlayerId,
        x: i32,
        y: i32,
    ) -> EngineResult<ClaimOutcome> {
        if let Some(winner) = self.winner {
            return Err(EngineError::GameOver { winner });
        }
        let coord = Coord::checked(x, y).ok_or(EngineError::OutOfBounds { x, y })?;
        let target = self
            .board
            .cell_at(coord)
            .ok_or(EngineError::CellNotFound {
                id: coord.y * GRID_SIZE + coord.x + 1,
            })?;
        let (target_id, target_owner) = (target.id, target.owner);

        let current = self.turns.current();
        if current != player {
            return Err(EngineError::NotYourTurn { player, current });
        }
        if self.roster.player(player).is_none() {
            return Err(EngineError::PlayerNotFound { id: player });
        }
        if target_owner == Some(player) {
            return Err(EngineError::AlreadyOwned {
                player,
                cell: target_id,
            });
        }

        // Adjacency is only required when taking over an owned cell; any
        // unowned cell may be requested from anywhere.
        if target_owner.is_some() && !self.is_adjacent_to_player(player, coord) {
            return Ok(ClaimOutcome::NotAdjacent);
        }

        let challenge = self.challenges.create(&mut self.board, player, target_id);
        Ok(ClaimOutcome::Pending {
            challenge,
            cell: CellRef {
                id: target_id,
                x: coord.x,
                y: coord.y,
            },
        })
    }

    /// Resolve a pending challenge by drawing an attempt value.
    ///
    /// If the target cell has no stored claim value the attempt always
    /// succeeds (first acquisition); otherwise it succeeds iff
    /// `attempt <= claim_value`. On success ownership transfers and the
    /// drawn attempt becomes the cell's new claim value. The challenge is
    /// removed and the turn advances whether or not the attempt succeeded.
    ///
    /// # Errors
    ///
    /// - [`EngineError::GameOver`] if a winner has been declared
    /// - [`EngineError::PlayerNotFound`] if the caller does not exist
    /// - [`EngineError::ChallengeNotFound`] if the challenge id is unknown
    ///   or already resolved
    /// - [`EngineError::ChallengeOwnerMismatch`] if the challenge was
    ///   created by a different player
    /// - [`EngineError::CellNotFound`] if the target cell is missing
    pub fn resolve_challenge(
        &mut self,
        player: PlayerId,
        challenge: ChallengeId,
    ) -> EngineResult<ResolveOutcome> {
        if let Some(winner) = self.winner {
            return Err(EngineError::GameOver { winner });
        }
        if self.roster.player(player).is_none() {
            return Err(EngineError::PlayerNotFound { id: player });
        }
        let entry = *self
            .challenges
            .get(challenge)
            .ok_or(EngineError::ChallengeNotFound { id: challenge })?;
        if entry.player != player {
            return Err(EngineError::ChallengeOwnerMismatch {
                id: challenge,
                player,
            });
        }
        let target = self
            .board
            .cell_by_id(entry.cell)
            .ok_or(EngineError::CellNotFound { id: entry.cell })?;
        let (coord, prev_owner, claim_value) = (target.coord, target.owner, target.claim_value);

        let attempt = self.dice.roll();
        // First acquisition always succeeds; afterwards the stored value is
        // the threshold the challenger must not exceed.
        let success = claim_value.is_none_or(|threshold| attempt <= threshold);

        if success {
            self.roster.transfer_cell(entry.cell, prev_owner, player);
            let color = self.roster.player(player).map(|p| p.color.clone());
            if let Some(cell) = self.board.cell_by_id_mut(entry.cell) {
                cell.owner = Some(player);
                cell.color = color;
                cell.claim_value = Some(attempt);
            }
            // First successful acquisition of a center cell decides the game.
            if coord.is_center() {
                self.winner = Some(player);
            }
        }

        self.challenges.remove(&mut self.board, challenge);
        let next_player = self.turns.advance();

        Ok(ResolveOutcome {
            success,
            attempt,
            cell: if success {
                self.board.cell_by_id(entry.cell).cloned()
            } else {
                None
            },
            next_player,
            winner: self.winner,
        })
    }

    /// Whether `coord` is orthogonally adjacent to any cell owned by
    /// `player`.
    #[must_use]
    pub fn is_adjacent_to_player(&self, player: PlayerId, coord: Coord) -> bool {
        self.board
            .neighbors(coord)
            .iter()
            .any(|cell| cell.owner == Some(player))
    }

    /// All players in id order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }

    /// Look up a player.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlayerNotFound`] if the id is unknown.
    pub fn player(&self, id: PlayerId) -> EngineResult<&Player> {
        self.roster
            .player(id)
            .ok_or(EngineError::PlayerNotFound { id })
    }

    /// Look up a cell by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CellNotFound`] if the id is unknown.
    pub fn cell(&self, id: CellId) -> EngineResult<&Cell> {
        self.board
            .cell_by_id(id)
            .ok_or(EngineError::CellNotFound { id })
    }

    /// Update a player's display attributes.
    ///
    /// A color change repaints every cell the player owns. Returns the
    /// updated player.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlayerNotFound`] if the id is unknown.
    pub fn update_appearance(
        &mut self,
        id: PlayerId,
        update: AppearanceUpdate,
    ) -> EngineResult<Player> {
        let player = self
            .roster
            .player_mut(id)
            .ok_or(EngineError::PlayerNotFound { id })?;
        if let Some(color) = update.color {
            player.color = color;
        }
        if let Some(description) = update.description {
            player.description = description;
        }
        let (color, owned) = (player.color.clone(), player.owned_cells.clone());
        for cell_id in owned {
            if let Some(cell) = self.board.cell_by_id_mut(cell_id) {
                cell.color = Some(color.clone());
            }
        }
        self.player(id).cloned()
    }

    /// A player's profile description.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlayerNotFound`] if the id is unknown.
    pub fn description(&self, id: PlayerId) -> EngineResult<&str> {
        self.player(id).map(|p| p.description.as_str())
    }

    /// Set a player's description for the first time.
    ///
    /// # Errors
    ///
    /// - [`EngineError::PlayerNotFound`] if the id is unknown
    /// - [`EngineError::DescriptionRequired`] if `text` is empty
    /// - [`EngineError::DescriptionExists`] if a description is already set
    pub fn set_description(&mut self, id: PlayerId, text: &str) -> EngineResult<()> {
        if text.is_empty() {
            return Err(EngineError::DescriptionRequired);
        }
        let player = self
            .roster
            .player_mut(id)
            .ok_or(EngineError::PlayerNotFound { id })?;
        if !player.description.is_empty() {
            return Err(EngineError::DescriptionExists { player: id });
        }
        player.description = text.to_string();
        Ok(())
    }

    /// Replace a player's description unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlayerNotFound`] if the id is unknown.
    pub fn replace_description(&mut self, id: PlayerId, text: &str) -> EngineResult<()> {
        let player = self
            .roster
            .player_mut(id)
            .ok_or(EngineError::PlayerNotFound { id })?;
        player.description = text.to_string();
        Ok(())
    }

    /// Clear a player's description.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlayerNotFound`] if the id is unknown.
    pub fn clear_description(&mut self, id: PlayerId) -> EngineResult<()> {
        self.replace_description(id, "")
    }

    /// Snapshot of all 100 cells plus the current winner.
    #[must_use]
    pub fn grid(&self) -> GridSnapshot {
        GridSnapshot {
            grid_size: GRID_SIZE,
            cells: self.board.cells().to_vec(),
            winner: self.winner,
        }
    }

    /// Snapshot of the turn state.
    #[must_use]
    pub fn turn(&self) -> TurnSnapshot {
        TurnSnapshot {
            current_player: self.turns.current(),
            turn_order: self.turns.order().to_vec(),
        }
    }

    /// The winner, if one has been declared.
    #[must_use]
    pub const fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// The board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The roster.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The turn controller.
    #[must_use]
    pub const fn turns(&self) -> &TurnController {
        &self.turns
    }

    /// The outstanding challenge registry.
    #[must_use]
    pub const fn challenges(&self) -> &ChallengeRegistry {
        &self.challenges
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ScriptedDice;

    /// Engine whose 10 starting claim values are all 50, followed by the
    /// given attempt rolls.
    fn engine_with_rolls(attempts: &[u8]) -> GameEngine {
        let mut rolls = vec![50u8; 10];
        rolls.extend_from_slice(attempts);
        GameEngine::with_dice(Box::new(ScriptedDice::new(&rolls)))
    }

    #[test]
    fn test_initial_layout() {
        let engine = GameEngine::with_seed(7);
        let grid = engine.grid();
        assert_eq!(grid.cells.len(), 100);
        assert_eq!(grid.winner, None);

        let starting: Vec<_> = grid.cells.iter().filter(|c| c.is_starting).collect();
        assert_eq!(starting.len(), 10);
        for cell in &starting {
            assert!(cell.owner.is_some());
            assert!(cell.claim_value.is_some());
            assert!(STARTING_COORDS.contains(&(cell.coord.x, cell.coord.y)));
        }

        let origin = engine.board().cell_at(Coord::new(0, 0)).unwrap();
        assert_eq!(origin.owner, Some(1));
        assert!(origin.is_starting);

        let center = engine.board().cell_at(Coord::new(5, 5)).unwrap();
        assert_eq!(center.owner, None);
        assert_eq!(center.claim_value, None);

        assert_eq!(engine.turn().current_player, 1);
        assert_eq!(engine.turn().turn_order, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_request_claim_out_of_bounds() {
        let mut engine = GameEngine::with_seed(7);
        assert_eq!(
            engine.request_claim(1, 10, 0),
            Err(EngineError::OutOfBounds { x: 10, y: 0 })
        );
        assert_eq!(
            engine.request_claim(1, 0, -1),
            Err(EngineError::OutOfBounds { x: 0, y: -1 })
        );
    }

    #[test]
    fn test_request_claim_not_your_turn() {
        let mut engine = GameEngine::with_seed(7);
        assert_eq!(
            engine.request_claim(2, 5, 5),
            Err(EngineError::NotYourTurn { player: 2, current: 1 })
        );
    }

    #[test]
    fn test_request_claim_own_cell_is_conflict() {
        let mut engine = GameEngine::with_seed(7);
        // Player 1's own starting cell at (0,0).
        assert_eq!(
            engine.request_claim(1, 0, 0),
            Err(EngineError::AlreadyOwned { player: 1, cell: 1 })
        );
    }

    #[test]
    fn test_request_claim_unowned_cell_skips_adjacency() {
        let mut engine = GameEngine::with_seed(7);
        // (5,5) is unowned and nowhere near player 1's territory.
        let outcome = engine.request_claim(1, 5, 5).unwrap();
        assert!(outcome.challenge_id().is_some());
    }

    #[test]
    fn test_request_claim_owned_cell_requires_adjacency() {
        let mut engine = GameEngine::with_seed(7);
        // (0,2) is player 2's starting cell; player 1 at (0,0) is not
        // adjacent to it.
        let outcome = engine.request_claim(1, 0, 2).unwrap();
        assert_eq!(outcome, ClaimOutcome::NotAdjacent);
        // Soft failure: no challenge registered, turn not consumed.
        assert!(engine.challenges().is_empty());
        assert_eq!(engine.turn().current_player, 1);
    }

    #[test]
    fn test_first_acquisition_always_succeeds() {
        // Attempt of 100 would lose against any threshold, but the center
        // cell has no claim value yet.
        let mut engine = engine_with_rolls(&[100]);
        let challenge = engine.request_claim(1, 5, 5).unwrap().challenge_id().unwrap();
        let outcome = engine.resolve_challenge(1, challenge).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.attempt, 100);
        let cell = outcome.cell.unwrap();
        assert_eq!(cell.owner, Some(1));
        assert_eq!(cell.claim_value, Some(100));
        assert_eq!(cell.color.as_deref(), Some("red"));
        // Center cell: player 1 wins, turn still advances.
        assert_eq!(outcome.winner, Some(1));
        assert_eq!(outcome.next_player, 2);
        assert!(engine.player(1).unwrap().owned_cells.contains(&cell.id));
    }

    #[test]
    fn test_takeover_succeeds_at_or_below_threshold() {
        // Starting claim values are 50; an attempt of exactly 50 wins.
        let mut engine = engine_with_rolls(&[50]);
        // Player 1 first bridges to (0,1) so that player 2's starting cell
        // at (0,2) becomes adjacent.
        let c = engine.request_claim(1, 0, 1).unwrap().challenge_id().unwrap();
        let first = engine.resolve_challenge(1, c).unwrap();
        assert!(first.success);
        assert_eq!(first.winner, None);

        // Skip players 2..=10 by letting them each claim an unowned edge
        // cell; scripted dice repeats 50, so every claim succeeds.
        for (i, player) in (2..=10).enumerate() {
            let x = i32::try_from(i + 1).unwrap();
            let c = engine.request_claim(player, x, 9).unwrap().challenge_id().unwrap();
            engine.resolve_challenge(player, c).unwrap();
        }

        // Back to player 1, now adjacent to player 2's cell at (0,2).
        let c = engine.request_claim(1, 0, 2).unwrap().challenge_id().unwrap();
        let outcome = engine.resolve_challenge(1, c).unwrap();
        assert!(outcome.success, "attempt 50 against threshold 50 must win");
        assert_eq!(engine.cell(21).unwrap().owner, Some(1));
        assert!(!engine.player(2).unwrap().owned_cells.contains(&21));
    }

    #[test]
    fn test_failed_attempt_consumes_turn() {
        // Player 1 takes (0,1) with a roll of 50, then player 2 attempts
        // the same cell with 51 against the stored threshold of 50.
        let mut engine = engine_with_rolls(&[50, 51]);
        let c = engine.request_claim(1, 0, 1).unwrap().challenge_id().unwrap();
        engine.resolve_challenge(1, c).unwrap();

        // (0,1) is adjacent to player 2's starting cell (0,2).
        let c = engine.request_claim(2, 0, 1).unwrap().challenge_id().unwrap();
        let outcome = engine.resolve_challenge(2, c).unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.attempt, 51);
        assert_eq!(outcome.cell, None);
        // Ownership unchanged, threshold unchanged.
        assert_eq!(engine.cell(11).unwrap().owner, Some(1));
        assert_eq!(engine.cell(11).unwrap().claim_value, Some(50));
        // Turn consumed anyway.
        assert_eq!(outcome.next_player, 3);
    }

    #[test]
    fn test_resolved_challenge_cannot_be_resolved_again() {
        let mut engine = engine_with_rolls(&[50]);
        let c = engine.request_claim(1, 0, 1).unwrap().challenge_id().unwrap();
        engine.resolve_challenge(1, c).unwrap();
        assert_eq!(
            engine.resolve_challenge(2, c),
            Err(EngineError::ChallengeNotFound { id: c })
        );
    }

    #[test]
    fn test_resolve_foreign_challenge_is_forbidden() {
        let mut engine = engine_with_rolls(&[50]);
        let c = engine.request_claim(1, 0, 1).unwrap().challenge_id().unwrap();
        assert_eq!(
            engine.resolve_challenge(2, c),
            Err(EngineError::ChallengeOwnerMismatch { id: c, player: 2 })
        );
        // The challenge survives an ownership mismatch.
        assert_eq!(engine.challenges().len(), 1);
    }

    #[test]
    fn test_game_over_gates_all_moves() {
        let mut engine = engine_with_rolls(&[50]);
        let c = engine.request_claim(1, 4, 4).unwrap().challenge_id().unwrap();
        let outcome = engine.resolve_challenge(1, c).unwrap();
        assert_eq!(outcome.winner, Some(1));

        assert_eq!(
            engine.request_claim(2, 5, 5),
            Err(EngineError::GameOver { winner: 1 })
        );
        let mut other = engine_with_rolls(&[50]);
        let stale = other.request_claim(1, 0, 1).unwrap().challenge_id().unwrap();
        assert_eq!(
            engine.resolve_challenge(2, stale),
            Err(EngineError::GameOver { winner: 1 })
        );
    }

    #[test]
    fn test_reset_restores_initial_layout() {
        let mut engine = engine_with_rolls(&[50]);
        let c = engine.request_claim(1, 5, 5).unwrap().challenge_id().unwrap();
        engine.resolve_challenge(1, c).unwrap();
        assert_eq!(engine.winner(), Some(1));

        engine.reset();

        assert_eq!(engine.winner(), None);
        assert_eq!(engine.turn().current_player, 1);
        assert!(engine.challenges().is_empty());
        let center = engine.board().cell_at(Coord::new(5, 5)).unwrap();
        assert_eq!(center.owner, None);
        assert_eq!(center.claim_value, None);
        let p1 = engine.player(1).unwrap();
        assert_eq!(p1.owned_cells.len(), 1);
        assert!(p1.owned_cells.contains(&1));
    }

    #[test]
    fn test_update_appearance_repaints_owned_cells() {
        let mut engine = engine_with_rolls(&[50]);
        let c = engine.request_claim(1, 0, 1).unwrap().challenge_id().unwrap();
        engine.resolve_challenge(1, c).unwrap();

        let updated = engine
            .update_appearance(
                1,
                AppearanceUpdate {
                    color: Some("gold".to_string()),
                    description: Some("the first".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.color, "gold");
        assert_eq!(updated.description, "the first");
        assert_eq!(engine.cell(1).unwrap().color.as_deref(), Some("gold"));
        assert_eq!(engine.cell(11).unwrap().color.as_deref(), Some("gold"));
    }

    #[test]
    fn test_description_set_once_semantics() {
        let mut engine = GameEngine::with_seed(7);
        assert_eq!(engine.set_description(3, ""), Err(EngineError::DescriptionRequired));
        engine.set_description(3, "hello").unwrap();
        assert_eq!(engine.description(3).unwrap(), "hello");
        assert_eq!(
            engine.set_description(3, "again"),
            Err(EngineError::DescriptionExists { player: 3 })
        );
        engine.replace_description(3, "again").unwrap();
        assert_eq!(engine.description(3).unwrap(), "again");
        engine.clear_description(3).unwrap();
        assert_eq!(engine.description(3).unwrap(), "");
    }

    #[test]
    fn test_precondition_order_winner_before_bounds() {
        let mut engine = engine_with_rolls(&[50]);
        let c = engine.request_claim(1, 4, 4).unwrap().challenge_id().unwrap();
        engine.resolve_challenge(1, c).unwrap();
        // Out-of-bounds after a win still reports game over first.
        assert_eq!(
            engine.request_claim(2, 99, 99),
            Err(EngineError::GameOver { winner: 1 })
        );
    }
}
