//! Text layouts for hand-built boards.
//!
//! A layout is a list of rows, top row first. Each row holds
//! whitespace-separated tokens:
//!
//! - `.` - empty cell
//! - `<color>` - normal piece, e.g. `3`
//! - `<color><kind>` - special piece, where kind is `H` (horizontal rocket),
//!   `V` (vertical rocket), `B` (bomb), `D` (disco ball) or `P` (plane)
//!
//! ```
//! use match3_core::board::Grid;
//! use match3_core::core::{Pos, SpecialKind};
//!
//! let grid = Grid::parse(&[
//!     "0 1 2",
//!     "2 0H 1",
//!     "1 2 .",
//! ]).unwrap();
//!
//! assert_eq!(grid.get(Pos::new(1, 1)).unwrap().special, SpecialKind::RocketHorizontal);
//! assert!(grid.get(Pos::new(2, 0)).is_none());
//! ```

use thiserror::Error;

use crate::core::{Color, Pos, SpecialKind};

use super::Grid;

/// Reasons a layout cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("bad token {token:?} at row {row}, column {column}")]
    BadToken {
        row: usize,
        column: usize,
        token: String,
    },
}

fn parse_token(token: &str) -> Option<Option<(Color, SpecialKind)>> {
    if token == "." {
        return Some(None);
    }

    let split = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, suffix) = token.split_at(split);
    let color = digits.parse::<u8>().ok()?;

    let special = match suffix {
        "" => SpecialKind::None,
        "H" => SpecialKind::RocketHorizontal,
        "V" => SpecialKind::RocketVertical,
        "B" => SpecialKind::Bomb,
        "D" => SpecialKind::DiscoBall,
        "P" => SpecialKind::Plane,
        _ => return None,
    };

    Some(Some((Color::new(color), special)))
}

impl Grid {
    /// Build a grid from a text layout, top row first.
    pub fn parse(rows: &[&str]) -> Result<Grid, LayoutError> {
        let tokens: Vec<Vec<&str>> = rows.iter().map(|r| r.split_whitespace().collect()).collect();

        let height = tokens.len();
        let width = tokens.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut grid = Grid::new(width, height);

        for (row, cells) in tokens.iter().enumerate() {
            if cells.len() != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }

            let y = (height - 1 - row) as i32;
            for (column, token) in cells.iter().enumerate() {
                let parsed = parse_token(token).ok_or_else(|| LayoutError::BadToken {
                    row,
                    column,
                    token: (*token).to_string(),
                })?;

                if let Some((color, special)) = parsed {
                    grid.place(Pos::new(column as i32, y), color, special);
                }
            }
        }

        Ok(grid)
    }
}
