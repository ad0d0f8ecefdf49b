//! Board and cell types.

use serde::{Deserialize, Serialize};

use crate::game::{ChallengeId, PlayerId};

/// Side length of the square board.
pub const GRID_SIZE: u8 = 10;

/// The four center cells; the first successful claim of any of them wins.
pub const CENTER_COORDS: [(u8, u8); 4] = [(4, 4), (5, 4), (4, 5), (5, 5)];

/// Perimeter coordinates seeded as starting positions, one per player in
/// roster order.
pub const STARTING_COORDS: [(u8, u8); 10] = [
    (0, 0),
    (0, 2),
    (0, 4),
    (0, 6),
    (0, 8),
    (9, 8),
    (9, 6),
    (9, 4),
    (9, 2),
    (9, 0),
];

/// Unique identifier for a cell, `y * 10 + x + 1`, in `1..=100`.
pub type CellId = u8;

/// A coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u8,
    /// Y coordinate (row).
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Validate possibly-out-of-range input coordinates.
    ///
    /// Returns `None` unless both components are within `[0, 9]`.
    #[must_use]
    pub fn checked(x: i32, y: i32) -> Option<Self> {
        let x = u8::try_from(x).ok().filter(|&v| v < GRID_SIZE)?;
        let y = u8::try_from(y).ok().filter(|&v| v < GRID_SIZE)?;
        Some(Self { x, y })
    }

    /// Get adjacent coordinates (up, down, left, right).
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices `0..count`.
    /// No diagonals, no wraparound.
    #[must_use]
    #[inline]
    pub fn adjacent(&self) -> ([Coord; 4], u8) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0u8;

        if self.y > 0 {
            result[count as usize] = Coord::new(self.x, self.y - 1); // up
            count += 1;
        }
        if self.y + 1 < GRID_SIZE {
            result[count as usize] = Coord::new(self.x, self.y + 1); // down
            count += 1;
        }
        if self.x > 0 {
            result[count as usize] = Coord::new(self.x - 1, self.y); // left
            count += 1;
        }
        if self.x + 1 < GRID_SIZE {
            result[count as usize] = Coord::new(self.x + 1, self.y); // right
            count += 1;
        }

        (result, count)
    }

    /// Whether this coordinate is one of the four center cells.
    #[must_use]
    pub fn is_center(&self) -> bool {
        CENTER_COORDS.contains(&(self.x, self.y))
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Stable identifier, unique per coordinate.
    pub id: CellId,
    /// Position on the board.
    pub coord: Coord,
    /// Current owner (`None` = unclaimed).
    pub owner: Option<PlayerId>,
    /// Threshold the next challenger must roll less than or equal to.
    /// `None` until a first successful acquisition stores a value.
    pub claim_value: Option<u8>,
    /// Display color mirroring the current owner, `None` when unclaimed.
    pub color: Option<String>,
    /// The at-most-one outstanding challenge targeting this cell.
    pub challenge: Option<ChallengeId>,
    /// True for the 10 cells seeded as initial positions. Immutable.
    pub is_starting: bool,
}

impl Cell {
    /// Create an unclaimed cell at the given coordinate.
    #[must_use]
    pub fn unclaimed(coord: Coord) -> Self {
        Self {
            id: coord.y * GRID_SIZE + coord.x + 1,
            coord,
            owner: None,
            claim_value: None,
            color: None,
            challenge: None,
            is_starting: false,
        }
    }
}

/// The game board: 100 cells in row-major order.
#[derive(Debug, Clone)]
pub struct Board {
    /// Cells stored in row-major order, index `y * 10 + x`.
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board of 100 unclaimed cells.
    #[must_use]
    pub fn new() -> Self {
        let cells = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Cell::unclaimed(Coord::new(x, y))))
            .collect();
        Self { cells }
    }

    /// Get the cell at a coordinate.
    #[must_use]
    pub fn cell_at(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(Self::index(coord)?)
    }

    /// Get a mutable reference to the cell at a coordinate.
    #[must_use]
    pub fn cell_at_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        let idx = Self::index(coord)?;
        self.cells.get_mut(idx)
    }

    /// Get a cell by its stable identifier.
    #[must_use]
    pub fn cell_by_id(&self, id: CellId) -> Option<&Cell> {
        if id == 0 {
            return None;
        }
        self.cells.get(usize::from(id) - 1)
    }

    /// Get a mutable reference to a cell by its stable identifier.
    #[must_use]
    pub fn cell_by_id_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        if id == 0 {
            return None;
        }
        self.cells.get_mut(usize::from(id) - 1)
    }

    /// The up-to-4 orthogonally adjacent cells that exist on the board.
    #[must_use]
    pub fn neighbors(&self, coord: Coord) -> Vec<&Cell> {
        let (adj, count) = coord.adjacent();
        adj[..count as usize]
            .iter()
            .filter_map(|&c| self.cell_at(c))
            .collect()
    }

    /// All cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(coord: Coord) -> Option<usize> {
        if coord.x < GRID_SIZE && coord.y < GRID_SIZE {
            Some(usize::from(coord.y) * usize::from(GRID_SIZE) + usize::from(coord.x))
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
