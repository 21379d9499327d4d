//! Gravity and refill.
//!
//! After a wave removes pieces, each column is compacted downward and the
//! vacated cells at the top are refilled with random normal pieces. No
//! matching decisions are made here; the next scan does that.

use crate::core::{GameRng, Pos};
use crate::events::BoardEvent;

use super::Grid;

/// What collapse changed, for callers that don't consume the event stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollapseReport {
    /// Pieces that fell: `(from, to)`.
    pub moved: Vec<(Pos, Pos)>,
    /// Cells that received a new piece.
    pub spawned: Vec<Pos>,
}

/// Compact every column and refill vacancies.
///
/// Survivors keep their relative order within a column. New pieces get a
/// uniformly random color from `0..palette_size`.
pub fn collapse_and_refill(
    grid: &mut Grid,
    rng: &mut GameRng,
    palette_size: u8,
    events: &mut Vec<BoardEvent>,
) -> CollapseReport {
    let mut report = CollapseReport::default();
    let height = grid.height() as i32;

    for x in 0..grid.width() as i32 {
        let mut next_row = 0;

        for y in 0..height {
            let from = Pos::new(x, y);
            if grid.get(from).is_none() {
                continue;
            }

            let to = Pos::new(x, next_row);
            if to != from {
                if let Some(piece) = grid.take(from) {
                    events.push(BoardEvent::Moved { id: piece.id, from, to });
                    grid.set(to, piece);
                    report.moved.push((from, to));
                }
            }
            next_row += 1;
        }

        for y in next_row..height {
            let pos = Pos::new(x, y);
            let color = rng.color(palette_size);
            let id = grid.spawn(pos, color);
            events.push(BoardEvent::Spawned { id, pos, color });
            report.spawned.push(pos);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn test_column_compacts_in_order() {
        // Column 0 from bottom: 1, ., 2, ., 3
        let mut grid = Grid::parse(&["3", ".", "2", ".", "1"]).unwrap();
        let ids: Vec<_> = grid.pieces().map(|p| p.id).collect();
        let mut rng = GameRng::new(1);
        let mut events = Vec::new();

        let report = collapse_and_refill(&mut grid, &mut rng, 6, &mut events);

        assert_eq!(grid.get(Pos::new(0, 0)).unwrap().id, ids[0]);
        assert_eq!(grid.get(Pos::new(0, 1)).unwrap().id, ids[1]);
        assert_eq!(grid.get(Pos::new(0, 2)).unwrap().id, ids[2]);
        assert_eq!(grid.get(Pos::new(0, 1)).unwrap().color, Color::new(2));

        assert_eq!(report.moved, vec![(Pos::new(0, 2), Pos::new(0, 1)), (Pos::new(0, 4), Pos::new(0, 2))]);
        assert_eq!(report.spawned, vec![Pos::new(0, 3), Pos::new(0, 4)]);
        assert_eq!(grid.occupied_count(), 5);
    }

    #[test]
    fn test_full_column_untouched() {
        let mut grid = Grid::parse(&["1 2", "3 4"]).unwrap();
        let before = grid.clone();
        let mut events = Vec::new();

        let report = collapse_and_refill(&mut grid, &mut GameRng::new(5), 6, &mut events);

        assert_eq!(report, CollapseReport::default());
        assert!(events.is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_empty_column_refilled() {
        let mut grid = Grid::new(2, 3);
        let mut events = Vec::new();

        collapse_and_refill(&mut grid, &mut GameRng::new(9), 4, &mut events);

        assert_eq!(grid.occupied_count(), 6);
        assert_eq!(events.len(), 6);
        assert!(events.iter().all(|e| matches!(e, BoardEvent::Spawned { .. })));
        assert!(grid.pieces().all(|p| p.color.raw() < 4 && !p.is_special()));
    }

    #[test]
    fn test_moved_events_report_new_positions() {
        let mut grid = Grid::parse(&["5", "."]).unwrap();
        let mut events = Vec::new();

        collapse_and_refill(&mut grid, &mut GameRng::new(2), 6, &mut events);

        let piece = grid.get(Pos::new(0, 0)).unwrap();
        assert_eq!(piece.color, Color::new(5));
        assert_eq!(piece.pos, Pos::new(0, 0));
        assert!(matches!(
            events[0],
            BoardEvent::Moved { from, to, .. } if from == Pos::new(0, 1) && to == Pos::new(0, 0)
        ));
    }
}
