//! Random-playout simulation.
//!
//! Provides a pure function interface: `(seed, config) -> SimResult`.
//! Each move, the current player picks a uniformly random legal target
//! (any unowned cell, or an opponent cell adjacent to their territory),
//! requests a claim, and resolves it. Useful for exercising the engine,
//! for benchmarks, and for producing transcripts to replay.

use crate::game::{ClaimOutcome, GameEngine, PlayerId, ROSTER_SIZE};
use crate::replay::{MoveRecord, Transcript};

/// Deterministic PRNG using xorshift64, for move selection.
///
/// Kept separate from the engine's dice so the policy does not perturb
/// the claim-value stream.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    #[allow(clippy::cast_possible_truncation)]
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}

/// Configuration for a simulated game.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Maximum resolved moves before the game is called a draw.
    pub max_moves: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { max_moves: 1000 }
    }
}

/// Per-player statistics for a simulated game.
#[derive(Debug, Clone, Copy)]
pub struct PlayerSimStats {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Challenges this player resolved.
    pub claims_attempted: u32,
    /// Challenges that transferred the cell.
    pub claims_won: u32,
    /// Cells owned at the end of the game.
    pub cells_owned: u32,
}

/// Final result of a simulated game.
#[derive(Debug, Clone)]
pub struct SimResult {
    /// The seed used for this game.
    pub seed: u64,
    /// The winning player (None if the move limit was reached first).
    pub winner: Option<PlayerId>,
    /// Total resolved moves.
    pub moves_played: u32,
    /// Per-player statistics, in id order.
    pub player_stats: Vec<PlayerSimStats>,
    /// Replayable record of the game.
    pub transcript: Transcript,
}

/// Run one random-playout game to completion.
///
/// Deterministic in `seed`: the same seed always produces the same moves,
/// rolls, and result.
#[must_use]
pub fn run_game(seed: u64, config: &SimConfig) -> SimResult {
    let mut engine = GameEngine::with_seed(seed);
    let mut policy = Rng::new(seed ^ 0x9E37_79B9_7F4A_7C15);
    let mut transcript = Transcript::new(seed, config.max_moves);
    let mut stats: Vec<PlayerSimStats> = (1..=ROSTER_SIZE)
        .map(|player_id| PlayerSimStats {
            player_id,
            claims_attempted: 0,
            claims_won: 0,
            cells_owned: 0,
        })
        .collect();

    let mut moves_played = 0;
    while moves_played < config.max_moves && engine.winner().is_none() {
        let player = engine.turn().current_player;
        let Some((x, y)) = pick_target(&engine, player, &mut policy) else {
            break;
        };

        let Ok(ClaimOutcome::Pending { challenge, .. }) =
            engine.request_claim(player, i32::from(x), i32::from(y))
        else {
            // Candidates are pre-validated, so this cannot happen; bail
            // rather than loop forever if it ever does.
            break;
        };
        let Ok(outcome) = engine.resolve_challenge(player, challenge) else {
            break;
        };

        transcript.push(MoveRecord {
            player,
            x,
            y,
            attempt: outcome.attempt,
            success: outcome.success,
        });
        if let Some(entry) = stats.get_mut(usize::from(player) - 1) {
            entry.claims_attempted += 1;
            if outcome.success {
                entry.claims_won += 1;
            }
        }
        moves_played += 1;
    }

    for entry in &mut stats {
        entry.cells_owned = engine
            .player(entry.player_id)
            .map(|p| u32::try_from(p.owned_cells.len()).unwrap_or(u32::MAX))
            .unwrap_or(0);
    }

    SimResult {
        seed,
        winner: engine.winner(),
        moves_played,
        player_stats: stats,
        transcript,
    }
}

/// Pick a uniformly random legal target for `player`.
///
/// Legal targets are every unowned cell, plus opponent cells orthogonally
/// adjacent to the player's territory. Returns `None` only if the player
/// somehow owns the whole board.
fn pick_target(engine: &GameEngine, player: PlayerId, policy: &mut Rng) -> Option<(u8, u8)> {
    let candidates: Vec<(u8, u8)> = engine
        .board()
        .cells()
        .iter()
        .filter(|cell| match cell.owner {
            None => true,
            Some(owner) if owner == player => false,
            Some(_) => engine.is_adjacent_to_player(player, cell.coord),
        })
        .map(|cell| (cell.coord.x, cell.coord.y))
        .collect();

    if candidates.is_empty() {
        return None;
    }
    Some(candidates[policy.next_index(candidates.len())])
}
