//! Output formatting utilities for CLI.

use degrid::sim::SimResult;
use degrid::PlayerId;
use serde::Serialize;

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult {
    /// Random seed used.
    pub(super) seed: u64,
    /// Winner player ID (null if the move limit was reached).
    pub(super) winner: Option<PlayerId>,
    /// Total resolved moves.
    pub(super) moves_played: u32,
    /// Per-player results.
    pub(super) players: Vec<JsonPlayerResult>,
}

/// JSON-serializable player result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerResult {
    /// Player ID (1-10).
    pub(super) id: PlayerId,
    /// Challenges resolved.
    pub(super) claims_attempted: u32,
    /// Challenges won.
    pub(super) claims_won: u32,
    /// Cells owned at game end.
    pub(super) cells_owned: u32,
}

impl JsonGameResult {
    /// Create from a `SimResult`.
    pub(super) fn from_sim_result(result: &SimResult) -> Self {
        Self {
            seed: result.seed,
            winner: result.winner,
            moves_played: result.moves_played,
            players: result
                .player_stats
                .iter()
                .map(|ps| JsonPlayerResult {
                    id: ps.player_id,
                    claims_attempted: ps.claims_attempted,
                    claims_won: ps.claims_won,
                    cells_owned: ps.cells_owned,
                })
                .collect(),
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &SimResult, names: &[String]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Game Result (seed: {})\n", result.seed));
    if let Some(winner) = result.winner {
        let name = names
            .get(usize::from(winner) - 1)
            .map_or("Unknown", String::as_str);
        output.push_str(&format!("  Winner: Player {winner} ({name})\n"));
    } else {
        output.push_str("  Winner: none (move limit reached)\n");
    }
    output.push_str(&format!("  Moves: {}\n\n", result.moves_played));

    for (i, stats) in result.player_stats.iter().enumerate() {
        let name = names.get(i).map_or("Unknown", String::as_str);
        output.push_str(&format!(
            "  Player {}: {} cells, {}/{} claims won ({})\n",
            stats.player_id, stats.cells_owned, stats.claims_won, stats.claims_attempted, name
        ));
    }

    output
}

/// Aggregated statistics across many simulated games.
#[derive(Debug, Clone, Serialize)]
pub(super) struct SimulateStats {
    /// Games that produced a winner.
    pub(super) decided: u64,
    /// Games that hit the move limit.
    pub(super) drawn: u64,
    /// Total resolved moves across all games.
    pub(super) total_moves: u64,
    /// Wins per player, index = id - 1.
    pub(super) wins: Vec<u64>,
}

impl SimulateStats {
    /// Empty statistics for `players` players.
    pub(super) fn new(players: usize) -> Self {
        Self {
            decided: 0,
            drawn: 0,
            total_moves: 0,
            wins: vec![0; players],
        }
    }

    /// Fold one game result in.
    pub(super) fn add_result(&mut self, result: &SimResult) {
        self.total_moves += u64::from(result.moves_played);
        match result.winner {
            Some(winner) => {
                self.decided += 1;
                if let Some(slot) = self.wins.get_mut(usize::from(winner) - 1) {
                    *slot += 1;
                }
            }
            None => self.drawn += 1,
        }
    }

    /// Merge another accumulator in (rayon reduce step).
    pub(super) fn merge(&mut self, other: &Self) {
        self.decided += other.decided;
        self.drawn += other.drawn;
        self.total_moves += other.total_moves;
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
    }

    /// Games folded in so far.
    pub(super) fn games(&self) -> u64 {
        self.decided + self.drawn
    }
}

/// Format aggregated statistics as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_simulate_text(
    stats: &SimulateStats,
    names: &[String],
    elapsed_secs: f64,
) -> String {
    let games = stats.games();
    let mut output = String::new();

    output.push_str(&format!("Simulated {games} games in {elapsed_secs:.2}s\n"));
    output.push_str(&format!(
        "  Decided: {}  Drawn: {}  Avg moves: {:.1}\n\n",
        stats.decided,
        stats.drawn,
        if games == 0 {
            0.0
        } else {
            stats.total_moves as f64 / games as f64
        }
    ));

    for (i, wins) in stats.wins.iter().enumerate() {
        let name = names.get(i).map_or("Unknown", String::as_str);
        let rate = if games == 0 {
            0.0
        } else {
            *wins as f64 * 100.0 / games as f64
        };
        output.push_str(&format!(
            "  Player {:>2} ({name}): {wins} wins ({rate:.1}%)\n",
            i + 1
        ));
    }

    output
}

/// Format aggregated statistics as CSV.
pub(super) fn format_simulate_csv(stats: &SimulateStats, names: &[String]) -> String {
    let mut output = String::from("player,name,wins,games\n");
    let games = stats.games();
    for (i, wins) in stats.wins.iter().enumerate() {
        let name = names.get(i).map_or("Unknown", String::as_str);
        output.push_str(&format!("{},{name},{wins},{games}\n", i + 1));
    }
    output
}
