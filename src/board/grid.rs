//! Grid store: the board's cell contents.
//!
//! The `Grid` owns every piece while it sits on the board. It performs
//! bounds checks and nothing else - legality of moves is decided by the
//! session, matching by the scanner.
//!
//! Cells live in an `im::Vector`, so cloning a grid is O(1). Callers use
//! that to snapshot a board before a tentative swap and to hand immutable
//! copies to the presentation layer.
//!
//! ## Iteration order
//!
//! All iteration is column-major: `x` ascending, then `y` ascending (bottom
//! to top). Host selection, target candidate lists and destruction order
//! all inherit this order, which keeps placement decisions reproducible.
//!
//! ```
//! use match3_core::board::Grid;
//! use match3_core::core::{Color, Pos};
//!
//! let mut grid = Grid::new(4, 4);
//! let id = grid.spawn(Pos::new(1, 2), Color::new(3));
//!
//! assert_eq!(grid.get(Pos::new(1, 2)).map(|p| p.id), Some(id));
//! assert!(grid.get(Pos::new(-1, 0)).is_none());
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Color, Piece, PieceId, Pos, SpecialKind};

/// A fixed-size rectangular board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vector<Option<Piece>>,
    next_id: u32,
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: std::iter::repeat(None).take(width * height).collect(),
            next_id: 0,
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether a position lies on the board.
    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.x as usize * self.height + pos.y as usize)
        } else {
            None
        }
    }

    /// Piece at a position. `None` for empty or out-of-bounds cells.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<&Piece> {
        self.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    /// Mutable piece at a position.
    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut Piece> {
        let i = self.index(pos)?;
        self.cells.get_mut(i).and_then(Option::as_mut)
    }

    /// Put a piece into a cell, updating its stored coordinates.
    ///
    /// Returns the previous occupant. Out-of-bounds positions are ignored.
    pub fn set(&mut self, pos: Pos, mut piece: Piece) -> Option<Piece> {
        let i = self.index(pos)?;
        piece.pos = pos;
        self.cells.set(i, Some(piece))
    }

    /// Remove and return the piece in a cell.
    ///
    /// The returned piece carries the off-grid sentinel position.
    pub fn take(&mut self, pos: Pos) -> Option<Piece> {
        let i = self.index(pos)?;
        let mut piece = self.cells.set(i, None)?;
        piece.pos = Pos::OFF_GRID;
        Some(piece)
    }

    /// Exchange the pieces in two occupied cells.
    ///
    /// Returns `false` (and changes nothing) if either cell is empty or
    /// out of bounds.
    pub fn swap(&mut self, a: Pos, b: Pos) -> bool {
        if self.get(a).is_none() || self.get(b).is_none() {
            return false;
        }
        let (Some(first), Some(second)) = (self.take(a), self.take(b)) else {
            return false;
        };
        self.set(a, second);
        self.set(b, first);
        true
    }

    fn allocate_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a new normal piece in a cell.
    pub fn spawn(&mut self, pos: Pos, color: Color) -> PieceId {
        self.place(pos, color, SpecialKind::None)
    }

    /// Create a new piece of any kind in a cell, replacing any occupant.
    pub fn place(&mut self, pos: Pos, color: Color, special: SpecialKind) -> PieceId {
        let id = self.allocate_id();
        self.set(pos, Piece::new(id, color, pos).with_special(special));
        id
    }

    /// All positions, column-major.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let height = self.height as i32;
        (0..self.width as i32).flat_map(move |x| (0..height).map(move |y| Pos::new(x, y)))
    }

    /// All pieces on the board, column-major.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten()
    }

    /// Positions of every marked piece, column-major.
    #[must_use]
    pub fn marked_positions(&self) -> Vec<Pos> {
        self.pieces().filter(|p| p.marked).map(|p| p.pos).collect()
    }

    /// Clear every removal mark.
    pub fn clear_marks(&mut self) {
        let marked = self.marked_positions();
        for pos in marked {
            if let Some(piece) = self.get_mut(pos) {
                piece.marked = false;
            }
        }
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.pieces().count()
    }

    /// Locate a piece by identity.
    #[must_use]
    pub fn find(&self, id: PieceId) -> Option<Pos> {
        self.pieces().find(|p| p.id == id).map(|p| p.pos)
    }

    /// Whether the piece at `pos` has the given identity.
    #[must_use]
    pub fn holds(&self, pos: Pos, id: PieceId) -> bool {
        self.get(pos).is_some_and(|p| p.id == id)
    }

    /// Whether any normal piece of `color` is on the board.
    #[must_use]
    pub fn has_normal_of_color(&self, color: Color) -> bool {
        self.pieces().any(|p| !p.is_special() && p.color == color)
    }
}
