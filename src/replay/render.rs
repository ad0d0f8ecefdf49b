//! ASCII renderer for terminal viewing with ANSI colors.

use crate::game::{Coord, GameEngine, GRID_SIZE};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// ANSI code for a player color name; unknown names render white.
fn ansi_color(name: &str) -> &'static str {
    match name {
        "red" => "\x1b[31m",
        "blue" => "\x1b[34m",
        "green" => "\x1b[32m",
        "orange" => "\x1b[33m",
        "purple" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "magenta" => "\x1b[95m",
        "lime" => "\x1b[92m",
        "brown" => "\x1b[91m",
        "teal" => "\x1b[96m",
        _ => "\x1b[37m",
    }
}

/// Single-character glyph for a player id (1-9, then 0 for player 10).
fn player_glyph(id: u8) -> char {
    char::from(b'0' + (id % 10))
}

/// Render the board to ASCII with ANSI colors.
///
/// Output format:
/// ```text
/// Turn: player 3 (Carol)
///     0 1 2 3 4 5 6 7 8 9
///   0 1 . . . . . . . . 0
///   1 . . . . . . . . . .
///   4 3 . . . + + . . . 8
/// ...
/// Legend: digit=owner  .=unclaimed  +=unclaimed center
///
/// Player 1 (Alice, red): 3 cells
/// ```
#[must_use]
pub fn render_ascii(engine: &GameEngine) -> String {
    let mut output = String::new();

    if let Some(winner) = engine.winner() {
        let name = engine
            .player(winner)
            .map_or("?", |p| p.name.as_str());
        output.push_str(&format!("{BOLD}Winner: player {winner} ({name}){RESET}\n"));
    } else {
        let turn = engine.turn();
        let name = engine
            .player(turn.current_player)
            .map_or("?", |p| p.name.as_str());
        output.push_str(&format!("Turn: player {} ({name})\n", turn.current_player));
    }

    output.push_str("    ");
    for x in 0..GRID_SIZE {
        output.push_str(&format!("{x} "));
    }
    output.push('\n');

    for y in 0..GRID_SIZE {
        output.push_str(&format!("  {y} "));
        for x in 0..GRID_SIZE {
            let coord = Coord::new(x, y);
            let Some(cell) = engine.board().cell_at(coord) else {
                continue;
            };
            match cell.owner {
                Some(owner) => {
                    let color = cell.color.as_deref().map_or("\x1b[37m", ansi_color);
                    output.push_str(color);
                    output.push(player_glyph(owner));
                    output.push_str(RESET);
                }
                None if coord.is_center() => {
                    output.push_str(BOLD);
                    output.push('+');
                    output.push_str(RESET);
                }
                None => {
                    output.push_str(DIM);
                    output.push('.');
                    output.push_str(RESET);
                }
            }
            output.push(' ');
        }
        output.push('\n');
    }

    output.push_str("\nLegend: digit=owner  .=unclaimed  +=unclaimed center\n\n");

    for player in engine.players() {
        let color = ansi_color(&player.color);
        output.push_str(&format!(
            "{color}Player {} ({}, {}){RESET}: {} cells\n",
            player.id,
            player.name,
            player.color,
            player.owned_cells.len()
        ));
    }

    output
}
