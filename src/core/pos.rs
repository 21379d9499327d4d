//! Grid coordinates.
//!
//! `x` grows to the right, `y` grows upward. Row `y = 0` is the bottom row
//! that pieces fall toward during collapse.
//!
//! Coordinates are signed so neighbor arithmetic near the edges never
//! underflows; the grid treats anything outside its bounds as absent.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    /// Sentinel position carried by pieces detached from the grid
    /// (planes in flight).
    pub const OFF_GRID: Pos = Pos { x: -999, y: -999 };

    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by the given delta.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// True for the off-grid sentinel.
    #[must_use]
    pub fn is_off_grid(self) -> bool {
        self == Self::OFF_GRID
    }

    /// True if `other` shares an edge with this cell.
    #[must_use]
    pub fn is_adjacent(self, other: Pos) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }

    /// This cell followed by its four orthogonal neighbors
    /// (left, right, down, up).
    #[must_use]
    pub fn plus(self) -> [Pos; 5] {
        [
            self,
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
