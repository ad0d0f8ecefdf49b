//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger in a correctly implemented engine. If they
//! do, it indicates a bug in an engine operation, not a recoverable
//! runtime condition.

use std::collections::BTreeSet;

use crate::game::{GameEngine, GRID_SIZE};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all engine invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(engine: &GameEngine) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    check_board(engine, &mut violations);
    check_ownership(engine, &mut violations);
    check_turns(engine, &mut violations);
    check_challenges(engine, &mut violations);

    violations
}

/// Board shape: exactly one cell per coordinate, ids consistent, claim
/// values in range, color mirrors the owner.
fn check_board(engine: &GameEngine, violations: &mut Vec<InvariantViolation>) {
    let cells = engine.board().cells();
    if cells.len() != usize::from(GRID_SIZE) * usize::from(GRID_SIZE) {
        violations.push(InvariantViolation {
            message: format!("board has {} cells, expected 100", cells.len()),
        });
    }

    for cell in cells {
        let expected_id = cell.coord.y * GRID_SIZE + cell.coord.x + 1;
        if cell.id != expected_id {
            violations.push(InvariantViolation {
                message: format!(
                    "cell at ({}, {}) has id {}, expected {}",
                    cell.coord.x, cell.coord.y, cell.id, expected_id
                ),
            });
        }
        if let Some(value) = cell.claim_value
            && !(1..=100).contains(&value)
        {
            violations.push(InvariantViolation {
                message: format!("cell {} has claim value {value} outside [1, 100]", cell.id),
            });
        }
        if cell.owner.is_some() && cell.claim_value.is_none() {
            violations.push(InvariantViolation {
                message: format!("owned cell {} has no claim value", cell.id),
            });
        }
        match (cell.owner, &cell.color) {
            (Some(owner), Some(color)) => {
                if let Some(player) = engine.roster().player(owner)
                    && player.color != *color
                {
                    violations.push(InvariantViolation {
                        message: format!(
                            "cell {} painted {color} but owner {owner} is {}",
                            cell.id, player.color
                        ),
                    });
                }
            }
            (Some(owner), None) => violations.push(InvariantViolation {
                message: format!("cell {} owned by {owner} has no color", cell.id),
            }),
            (None, Some(color)) => violations.push(InvariantViolation {
                message: format!("unclaimed cell {} is painted {color}", cell.id),
            }),
            (None, None) => {}
        }
    }
}

/// Bidirectional ownership: a cell's owner field and the players' owned
/// sets describe exactly the same relation.
fn check_ownership(engine: &GameEngine, violations: &mut Vec<InvariantViolation>) {
    for cell in engine.board().cells() {
        if let Some(owner) = cell.owner {
            match engine.roster().player(owner) {
                Some(player) if player.owned_cells.contains(&cell.id) => {}
                Some(_) => violations.push(InvariantViolation {
                    message: format!(
                        "cell {} claims owner {owner} but is missing from their owned set",
                        cell.id
                    ),
                }),
                None => violations.push(InvariantViolation {
                    message: format!("cell {} owned by nonexistent player {owner}", cell.id),
                }),
            }
        }
    }

    let mut seen = BTreeSet::new();
    for player in engine.roster().players() {
        for &cell_id in &player.owned_cells {
            if !seen.insert(cell_id) {
                violations.push(InvariantViolation {
                    message: format!("cell {cell_id} appears in more than one owned set"),
                });
            }
            match engine.board().cell_by_id(cell_id) {
                Some(cell) if cell.owner == Some(player.id) => {}
                Some(cell) => violations.push(InvariantViolation {
                    message: format!(
                        "player {} lists cell {cell_id} but the cell's owner is {:?}",
                        player.id, cell.owner
                    ),
                }),
                None => violations.push(InvariantViolation {
                    message: format!(
                        "player {} lists nonexistent cell {cell_id}",
                        player.id
                    ),
                }),
            }
        }
    }
}

/// Turn state: the order is a permutation of roster ids and the index is
/// in range (the controller guarantees the latter structurally; verify the
/// former).
fn check_turns(engine: &GameEngine, violations: &mut Vec<InvariantViolation>) {
    let order = engine.turns().order();
    let roster_ids: BTreeSet<_> = engine.roster().players().iter().map(|p| p.id).collect();
    let order_ids: BTreeSet<_> = order.iter().copied().collect();
    if order.len() != roster_ids.len() || order_ids != roster_ids {
        violations.push(InvariantViolation {
            message: format!("turn order {order:?} is not a permutation of roster ids"),
        });
    }
    if engine.turns().index() >= order.len() {
        violations.push(InvariantViolation {
            message: format!(
                "turn index {} out of range for {} players",
                engine.turns().index(),
                order.len()
            ),
        });
    }
}

/// Pending challenges reference existing cells and players; a cell's
/// back-link points at a live registry entry for that cell.
fn check_challenges(engine: &GameEngine, violations: &mut Vec<InvariantViolation>) {
    for pending in engine.challenges().iter() {
        if engine.board().cell_by_id(pending.cell).is_none() {
            violations.push(InvariantViolation {
                message: format!(
                    "challenge {} targets nonexistent cell {}",
                    pending.id, pending.cell
                ),
            });
        }
        if engine.roster().player(pending.player).is_none() {
            violations.push(InvariantViolation {
                message: format!(
                    "challenge {} belongs to nonexistent player {}",
                    pending.id, pending.player
                ),
            });
        }
    }

    for cell in engine.board().cells() {
        if let Some(id) = cell.challenge {
            match engine.challenges().get(id) {
                Some(pending) if pending.cell == cell.id => {}
                Some(pending) => violations.push(InvariantViolation {
                    message: format!(
                        "cell {} links challenge {id} which targets cell {}",
                        cell.id, pending.cell
                    ),
                }),
                None => violations.push(InvariantViolation {
                    message: format!("cell {} links dangling challenge {id}", cell.id),
                }),
            }
        }
    }
}
