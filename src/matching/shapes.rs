//! Shape classification over scanned marks.
//!
//! The scanner only marks cells. This module reads those marks back as
//! shapes that can produce specials:
//!
//! - straight lines (length 4 makes a rocket, 5+ a disco ball)
//! - L/T intersections (a bomb)
//! - 2x2 squares (a plane)
//!
//! and decides which cell of a shape hosts the new special. Host choice is
//! deterministic: the pieces the player swapped win, otherwise a fixed
//! cell of the shape does.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Grid;
use crate::core::{Color, PieceId, Pos};

/// Axis of a straight match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The pieces moved by the current player action.
///
/// `a` is the piece the player dragged (or the tapped special), `b` its
/// swap partner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveContext {
    pub a: Option<PieceId>,
    pub b: Option<PieceId>,
}

impl MoveContext {
    /// Context for a swap of two pieces.
    #[must_use]
    pub fn swap(a: PieceId, b: PieceId) -> Self {
        Self { a: Some(a), b: Some(b) }
    }

    /// Context for a tap on a single piece.
    #[must_use]
    pub fn tap(piece: PieceId) -> Self {
        Self { a: Some(piece), b: None }
    }

    /// First of the given cells holding a swap participant, A before B.
    fn preferred_in(&self, grid: &Grid, cells: &[Pos]) -> Option<Pos> {
        [self.a, self.b]
            .into_iter()
            .flatten()
            .find_map(|id| cells.iter().copied().find(|&c| grid.holds(c, id)))
    }
}

/// A straight run of marked, same-colored normal pieces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchLine {
    pub color: Color,
    pub orientation: Orientation,
    /// Members in increasing coordinate order.
    pub cells: SmallVec<[Pos; 8]>,
}

impl MatchLine {
    /// Number of pieces in the run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Lines always hold at least three cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn marked_normal_color(grid: &Grid, pos: Pos) -> Option<Color> {
    grid.get(pos)
        .filter(|p| p.marked && !p.is_special())
        .map(|p| p.color)
}

fn collect_lines(
    grid: &Grid,
    starts: impl Iterator<Item = Pos>,
    length: i32,
    step: (i32, i32),
    orientation: Orientation,
    out: &mut Vec<MatchLine>,
) {
    for start in starts {
        let mut i = 0;
        while i < length {
            let at = start.offset(step.0 * i, step.1 * i);
            let Some(color) = marked_normal_color(grid, at) else {
                i += 1;
                continue;
            };

            let mut cells = SmallVec::new();
            let mut j = i;
            while j < length {
                let cell = start.offset(step.0 * j, step.1 * j);
                if marked_normal_color(grid, cell) != Some(color) {
                    break;
                }
                cells.push(cell);
                j += 1;
            }

            if cells.len() >= 3 {
                out.push(MatchLine { color, orientation, cells });
            }
            i = j;
        }
    }
}

/// Every marked line of length >= 3: horizontal lines (rows bottom to top),
/// then vertical lines (columns left to right).
#[must_use]
pub fn matched_lines(grid: &Grid) -> Vec<MatchLine> {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut lines = Vec::new();

    collect_lines(
        grid,
        (0..height).map(|y| Pos::new(0, y)),
        width,
        (1, 0),
        Orientation::Horizontal,
        &mut lines,
    );
    collect_lines(
        grid,
        (0..width).map(|x| Pos::new(x, 0)),
        height,
        (0, 1),
        Orientation::Vertical,
        &mut lines,
    );

    lines
}

/// Count marked same-colored normal neighbors walking from `from` along
/// `step`, not counting `from` itself.
fn extent(grid: &Grid, from: Pos, color: Color, step: (i32, i32)) -> i32 {
    let mut n = 0;
    while marked_normal_color(grid, from.offset(step.0 * (n + 1), step.1 * (n + 1))) == Some(color) {
        n += 1;
    }
    n
}

/// First marked cell (column-major) where a horizontal and a vertical run
/// of at least three cross: the host of an L/T bomb.
#[must_use]
pub fn find_bomb_host(grid: &Grid) -> Option<Pos> {
    grid.positions().find(|&pos| {
        let Some(color) = marked_normal_color(grid, pos) else {
            return false;
        };

        let horizontal = extent(grid, pos, color, (-1, 0)) + 1 + extent(grid, pos, color, (1, 0));
        let vertical = extent(grid, pos, color, (0, -1)) + 1 + extent(grid, pos, color, (0, 1));

        horizontal >= 3 && vertical >= 3
    })
}

/// Host of the first fully-marked 2x2 square (anchors column-major).
///
/// A swap participant inside the square wins; otherwise the top-right
/// cell hosts the plane.
#[must_use]
pub fn find_square_host(grid: &Grid, context: &MoveContext) -> Option<Pos> {
    for x in 0..grid.width() as i32 - 1 {
        for y in 0..grid.height() as i32 - 1 {
            let anchor = Pos::new(x, y);
            let cells = [anchor, anchor.offset(1, 0), anchor.offset(0, 1), anchor.offset(1, 1)];

            let Some(color) = marked_normal_color(grid, anchor) else {
                continue;
            };
            if !cells.iter().all(|&c| marked_normal_color(grid, c) == Some(color)) {
                continue;
            }

            return Some(context.preferred_in(grid, &cells).unwrap_or(cells[3]));
        }
    }
    None
}

/// Host of a straight line: a swap participant if one is in the line,
/// otherwise the last cell (rightmost or topmost).
#[must_use]
pub fn choose_line_host(grid: &Grid, line: &MatchLine, context: &MoveContext) -> Option<Pos> {
    context
        .preferred_in(grid, &line.cells)
        .or_else(|| line.cells.last().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scan;

    #[test]
    fn test_lines_from_marks() {
        let mut grid = Grid::parse(&[
            "1 0 3 0",
            "1 3 0 3",
            "1 2 2 2",
        ]).unwrap();
        scan(&mut grid);

        let lines = matched_lines(&grid);
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0].orientation, Orientation::Horizontal);
        assert_eq!(lines[0].color, Color::new(2));
        assert_eq!(lines[0].cells.as_slice(), &[Pos::new(1, 0), Pos::new(2, 0), Pos::new(3, 0)]);

        assert_eq!(lines[1].orientation, Orientation::Vertical);
        assert_eq!(lines[1].cells.as_slice(), &[Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)]);
    }

    #[test]
    fn test_bomb_host_on_l_corner() {
        let mut grid = Grid::parse(&[
            "4 0 1",
            "4 1 0",
            "4 4 4",
        ]).unwrap();
        scan(&mut grid);

        assert_eq!(find_bomb_host(&grid), Some(Pos::new(0, 0)));
    }

    #[test]
    fn test_bomb_host_on_t_stem() {
        let mut grid = Grid::parse(&[
            "0 4 1",
            "1 4 0",
            "4 4 4",
        ]).unwrap();
        scan(&mut grid);

        assert_eq!(find_bomb_host(&grid), Some(Pos::new(1, 0)));
    }

    #[test]
    fn test_no_bomb_for_straight_line() {
        let mut grid = Grid::parse(&["4 4 4 4"]).unwrap();
        scan(&mut grid);
        assert_eq!(find_bomb_host(&grid), None);
    }

    #[test]
    fn test_square_host_fallback_is_top_right() {
        let mut grid = Grid::parse(&[
            "0 3 3",
            "1 3 3",
        ]).unwrap();
        scan(&mut grid);

        assert_eq!(find_square_host(&grid, &MoveContext::default()), Some(Pos::new(2, 1)));
    }

    #[test]
    fn test_square_host_prefers_swap_piece() {
        let mut grid = Grid::parse(&[
            "0 3 3",
            "1 3 3",
        ]).unwrap();
        scan(&mut grid);

        let b = grid.get(Pos::new(1, 0)).unwrap().id;
        let outsider = grid.get(Pos::new(0, 0)).unwrap().id;

        let context = MoveContext::swap(outsider, b);
        assert_eq!(find_square_host(&grid, &context), Some(Pos::new(1, 0)));
    }

    #[test]
    fn test_line_host_priority() {
        let mut grid = Grid::parse(&["2 2 2 2"]).unwrap();
        scan(&mut grid);
        let line = &matched_lines(&grid)[0];

        assert_eq!(choose_line_host(&grid, line, &MoveContext::default()), Some(Pos::new(3, 0)));

        let a = grid.get(Pos::new(1, 0)).unwrap().id;
        let b = grid.get(Pos::new(2, 0)).unwrap().id;
        assert_eq!(choose_line_host(&grid, line, &MoveContext::swap(a, b)), Some(Pos::new(1, 0)));
        assert_eq!(choose_line_host(&grid, line, &MoveContext::swap(PieceId(999), b)), Some(Pos::new(2, 0)));
    }
}
