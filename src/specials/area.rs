//! Areas of effect.
//!
//! Each helper returns the on-board cells of a shape, column-major, so that
//! marking order is stable. Cells may be empty; callers skip those.

use crate::board::Grid;
use crate::core::Pos;

/// Every cell of row `y`.
#[must_use]
pub fn row(grid: &Grid, y: i32) -> Vec<Pos> {
    (0..grid.width() as i32)
        .map(|x| Pos::new(x, y))
        .filter(|&p| grid.contains(p))
        .collect()
}

/// Every cell of column `x`.
#[must_use]
pub fn column(grid: &Grid, x: i32) -> Vec<Pos> {
    (0..grid.height() as i32)
        .map(|y| Pos::new(x, y))
        .filter(|&p| grid.contains(p))
        .collect()
}

/// The square of side `2 * radius + 1` centered on `center`, clipped to
/// the board. Radius 1 is a bomb blast, radius 2 a double-bomb blast.
#[must_use]
pub fn square(grid: &Grid, center: Pos, radius: i32) -> Vec<Pos> {
    let mut cells = Vec::new();
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            let pos = center.offset(dx, dy);
            if grid.contains(pos) {
                cells.push(pos);
            }
        }
    }
    cells
}

/// Three full rows and three full columns centered on `center`.
///
/// Used by both Rocket+Rocket and Bomb+Rocket.
#[must_use]
pub fn thick_cross(grid: &Grid, center: Pos) -> Vec<Pos> {
    grid.positions()
        .filter(|p| (p.x - center.x).abs() <= 1 || (p.y - center.y).abs() <= 1)
        .collect()
}
