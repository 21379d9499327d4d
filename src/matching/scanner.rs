//! Line and square detection.
//!
//! A scan resets every mark and then runs three independent passes:
//! horizontal runs, vertical runs, 2x2 squares. Cells can be marked by more
//! than one pass; shape classification relies on that overlap.

use crate::board::Grid;
use crate::core::{Color, Pos};

/// Outcome of a full-board scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Every marked cell, column-major.
    pub marked: Vec<Pos>,
}

impl ScanResult {
    /// True if the scan found no match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Number of marked cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.marked.len()
    }
}

fn matchable_color(grid: &Grid, pos: Pos) -> Option<Color> {
    grid.get(pos).filter(|p| p.is_matchable()).map(|p| p.color)
}

fn mark(grid: &mut Grid, pos: Pos) {
    if let Some(piece) = grid.get_mut(pos) {
        piece.marked = true;
    }
}

/// Mark every maximal run of >= 3 matchable, same-colored pieces along
/// `step` starting from each cell of `starts`.
fn mark_runs(grid: &mut Grid, starts: Vec<Pos>, length: i32, step: (i32, i32)) {
    for start in starts {
        let mut i = 0;
        while i < length - 2 {
            let at = start.offset(step.0 * i, step.1 * i);
            let Some(color) = matchable_color(grid, at) else {
                i += 1;
                continue;
            };

            let mut run = 1;
            while i + run < length
                && matchable_color(grid, start.offset(step.0 * (i + run), step.1 * (i + run)))
                    == Some(color)
            {
                run += 1;
            }

            if run >= 3 {
                for k in 0..run {
                    mark(grid, start.offset(step.0 * (i + k), step.1 * (i + k)));
                }
            }
            i += run;
        }
    }
}

fn mark_squares(grid: &mut Grid) {
    for x in 0..grid.width() as i32 - 1 {
        for y in 0..grid.height() as i32 - 1 {
            let anchor = Pos::new(x, y);
            let cells = [anchor, anchor.offset(1, 0), anchor.offset(0, 1), anchor.offset(1, 1)];

            let Some(color) = matchable_color(grid, anchor) else {
                continue;
            };
            if cells.iter().all(|&c| matchable_color(grid, c) == Some(color)) {
                for cell in cells {
                    mark(grid, cell);
                }
            }
        }
    }
}

/// Reset all marks, then mark every line and square match on the board.
///
/// Scanning is idempotent: a second scan without mutation in between
/// produces exactly the same marks.
pub fn scan(grid: &mut Grid) -> ScanResult {
    grid.clear_marks();

    let width = grid.width() as i32;
    let height = grid.height() as i32;

    let row_starts = (0..height).map(|y| Pos::new(0, y)).collect();
    mark_runs(grid, row_starts, width, (1, 0));

    let column_starts = (0..width).map(|x| Pos::new(x, 0)).collect();
    mark_runs(grid, column_starts, height, (0, 1));

    mark_squares(grid);

    ScanResult {
        marked: grid.marked_positions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_run() {
        let mut grid = Grid::parse(&[
            "0 1 0 1",
            "2 2 2 0",
        ]).unwrap();

        let result = scan(&mut grid);
        assert_eq!(result.marked, vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)]);
    }

    #[test]
    fn test_vertical_run() {
        let mut grid = Grid::parse(&[
            "3 0 1",
            "3 1 0",
            "3 0 1",
        ]).unwrap();

        let result = scan(&mut grid);
        assert_eq!(result.len(), 3);
        assert!(result.marked.iter().all(|p| p.x == 0));
    }

    #[test]
    fn test_specials_break_runs() {
        let mut grid = Grid::parse(&["2 2 2H 2 2"]).unwrap();
        assert!(scan(&mut grid).is_empty());
    }

    #[test]
    fn test_square_detection() {
        let mut grid = Grid::parse(&[
            "0 4 4",
            "1 4 4",
        ]).unwrap();

        let result = scan(&mut grid);
        assert_eq!(
            result.marked,
            vec![Pos::new(1, 0), Pos::new(1, 1), Pos::new(2, 0), Pos::new(2, 1)]
        );
    }

    #[test]
    fn test_square_with_special_is_void() {
        let mut grid = Grid::parse(&[
            "4 4B",
            "4 4",
        ]).unwrap();
        assert!(scan(&mut grid).is_empty());
    }

    #[test]
    fn test_scan_resets_stale_marks() {
        let mut grid = Grid::parse(&["1 2 3"]).unwrap();
        grid.get_mut(Pos::new(1, 0)).unwrap().marked = true;

        assert!(scan(&mut grid).is_empty());
        assert!(grid.marked_positions().is_empty());
    }

    #[test]
    fn test_empty_cells_break_runs() {
        let mut grid = Grid::parse(&["1 1 . 1 1"]).unwrap();
        assert!(scan(&mut grid).is_empty());
    }
}
